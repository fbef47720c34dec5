use anyhow::Result;
use opentelemetry::KeyValue;
use std::time::Instant;
use tracing::info;

use corn_lending_core::lending::ProtocolConfig;
use corn_lending_core::{telemetry, AccountId, Asset, LendingEngine, Reserves, WAD};

fn main() -> Result<()> {
    // OTLP só quando há coletor configurado; senão apenas logs no terminal
    let tel = if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        Some(telemetry::init("corn-lending-core")?)
    } else {
        telemetry::init_fmt_only()?;
        None
    };

    let config = ProtocolConfig::from_env()?;
    let mut engine = LendingEngine::new(config, Reserves::new(1_000 * WAD, 1_000 * WAD))?;
    let alice = AccountId::from("alice");
    let bob = AccountId::from("bob");

    let t0 = Instant::now();
    engine.deposit(&alice, 100 * WAD)?;
    engine.borrow(&alice, 80 * WAD)?;
    if let Err(err) = engine.borrow(&alice, 5 * WAD) {
        info!(error = %err, "borrow acima do limite rejeitado");
    }

    // mercado derruba o preço até a posição ficar liquidável
    engine.swap(500 * WAD, Asset::Base)?;
    info!(price = engine.price()?, liquidatable = engine.is_liquidatable(&alice)?, "após swap");
    let receipt = engine.liquidate(&alice, &bob)?;
    let bad_debt_total = engine.total_bad_debt()?;
    info!(
        seized = receipt.seizure.collateral_seized,
        residual_debt = receipt.seizure.residual_debt,
        bad_debt_total = bad_debt_total,
        "liquidação concluída"
    );
    info!(
        accounts = engine.ledger().accounts().count(),
        total_collateral = engine.ledger().total_collateral(),
        total_debt = engine.ledger().total_debt(),
        payout_bob = engine.payout(&bob),
        "resumo do livro"
    );

    for event in engine.drain_events() {
        println!("{}", event.to_json());
    }

    if let Some(tel) = tel {
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        tel.op_latency_ms.record(elapsed_ms, &[KeyValue::new("op", "demo")]);
        if let Some(ratio) = engine.health_ratio(&alice)? {
            tel.health_ratio.record(ratio as f64 / WAD as f64, &[KeyValue::new("account", "alice")]);
        }
        tel.shutdown();
    }
    Ok(())
}
