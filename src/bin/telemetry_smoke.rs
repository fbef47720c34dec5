use anyhow::Result;
use tracing::{info, span, Level};

use corn_lending_core::{telemetry, AccountId, LendingEngine, ProtocolConfig, Reserves, WAD};

fn main() -> Result<()> {
    let tel = telemetry::init("corn-lending-core")?;
    let span = span!(Level::INFO, "smoke_span", otel.name = "telemetry_smoke");
    let _e = span.enter();
    info!("emitindo uma operação rejeitada e finalizando…");
    let mut engine = LendingEngine::new(ProtocolConfig::default(), Reserves::new(WAD, WAD))?;
    // rejeição proposital: alimenta op_rejections_total
    let _ = engine.borrow(&AccountId::from("smoke"), WAD);
    std::thread::sleep(std::time::Duration::from_millis(200));
    tel.shutdown();
    Ok(())
}
