//! Liquidação sem permissão de posições abaixo da razão mínima.
//!
//! Qualquer conta pode liquidar qualquer posição liquidável; o incentivo é o
//! bônus sobre o colateral apreendido. Quando o colateral não cobre a dívida,
//! tudo é apreendido e o resto fica como dívida residual (bad debt) visível.

use tracing::warn;

use crate::amm::types::{Ppm, Wad, PPM_SCALE, U256, WAD};
use crate::error::{ProtocolError, Result};
use crate::error_catalog::ErrorCode;
use crate::obs::metrics;
use crate::protocol_err;

use super::engine::{to_delta, LendingEngine, Receipt};
use super::events::LendingEvent;
use super::health;
use super::types::{AccountId, Position};

/// Divisão do resultado de uma liquidação.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seizure {
    pub collateral_seized: Wad,
    pub debt_repaid: Wad,
    pub residual_debt: Wad,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiquidationReceipt {
    pub seizure: Seizure,
    pub position: Position,
    pub event: LendingEvent,
}

impl Receipt for LiquidationReceipt {
    fn event(&self) -> &LendingEvent { &self.event }
}

/// `seize = min(collateral, floor(debt * (1 + bonus) / price))`.
/// Se o colateral não basta, o pagamento cobre só `min(debt, valor do colateral)`.
pub fn compute_seizure(position: &Position, price: Wad, bonus_ppm: Ppm) -> Result<Seizure> {
    let debt = position.debt;
    if price > 0 {
        let n = U256::from(debt) * U256::from(PPM_SCALE + bonus_ppm) * U256::from(WAD);
        let d = U256::from(PPM_SCALE) * U256::from(price);
        let needed = n / d;
        if needed <= U256::from(position.collateral) {
            return Ok(Seizure {
                collateral_seized: needed.as_u128(),
                debt_repaid: debt,
                residual_debt: 0,
            });
        }
    }
    let covered = health::collateral_value(position.collateral, price)?.min(debt);
    Ok(Seizure {
        collateral_seized: position.collateral,
        debt_repaid: covered,
        residual_debt: debt - covered,
    })
}

impl LendingEngine {
    /// `debt > 0` e razão abaixo do mínimo ao preço atual.
    pub fn is_liquidatable(&self, account: &AccountId) -> Result<bool> {
        health::is_liquidatable(&self.ledger.get(account), self.price()?, self.config.min_ratio_ppm)
    }

    /// Contas liquidáveis ao preço atual, em ordem estável.
    pub fn liquidatable_accounts(&self) -> Result<Vec<AccountId>> {
        let price = self.price()?;
        let mut out = Vec::new();
        for (account, position) in self.ledger.open_positions() {
            if health::is_liquidatable(position, price, self.config.min_ratio_ppm)? {
                out.push(account.clone());
            }
        }
        Ok(out)
    }

    /// Apreende colateral de `account` em favor de `caller`, que quita a dívida.
    pub fn liquidate(&mut self, account: &AccountId, caller: &AccountId) -> Result<LiquidationReceipt> {
        self.run("liquidate", |engine| {
            let price = engine.pool.price()?;
            let current = engine.ledger.get(account);
            if !health::is_liquidatable(&current, price, engine.config.min_ratio_ppm)? {
                return Err(protocol_err!(ErrorCode::NotLiquidatable, account => account, price => price));
            }

            let seizure = compute_seizure(&current, price, engine.config.liquidation_bonus_ppm)?;
            let payout = engine
                .payout(caller)
                .checked_add(seizure.collateral_seized)
                .ok_or_else(|| ProtocolError::new(ErrorCode::Overflow))?;
            let position = engine.ledger.mutate(
                account,
                -to_delta(seizure.collateral_seized)?,
                -to_delta(seizure.debt_repaid)?,
            )?;
            engine.payouts.insert(caller.clone(), payout);

            metrics::record_liquidation(seizure.residual_debt);
            if seizure.residual_debt > 0 {
                warn!(
                    account = %account,
                    residual_debt = seizure.residual_debt,
                    price = price,
                    "liquidation left bad debt"
                );
            }

            Ok(LiquidationReceipt {
                seizure,
                position,
                event: LendingEvent::Liquidated {
                    account: account.clone(),
                    caller: caller.clone(),
                    price,
                    debt_repaid: seizure.debt_repaid,
                    collateral_seized: seizure.collateral_seized,
                    residual_debt: seizure.residual_debt,
                    position,
                },
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::types::{Asset, Reserves};
    use crate::lending::config::{ProtocolConfig, LIQUIDATION_BONUS_PPM};

    fn pos(collateral: u128, debt: u128) -> Position {
        Position::new(collateral * WAD, debt * WAD)
    }

    #[test]
    fn seizure_with_enough_collateral_pays_bonus() {
        // preço 0.9: 80 de dívida * 1.1 / 0.9 = 97.777…
        let s = compute_seizure(&pos(100, 80), 900_000_000_000_000_000, LIQUIDATION_BONUS_PPM).unwrap();
        assert_eq!(s.collateral_seized, 97_777_777_777_777_777_777);
        assert_eq!(s.debt_repaid, 80 * WAD);
        assert_eq!(s.residual_debt, 0);
    }

    #[test]
    fn seizure_bad_debt_scenario() {
        // preço 0.5: min(100, 176) = 100, cobre 50, resta 30
        let s = compute_seizure(&pos(100, 80), WAD / 2, LIQUIDATION_BONUS_PPM).unwrap();
        assert_eq!(s.collateral_seized, 100 * WAD);
        assert_eq!(s.debt_repaid, 50 * WAD);
        assert_eq!(s.residual_debt, 30 * WAD);
    }

    #[test]
    fn seizure_covers_debt_but_not_full_bonus() {
        // preço 0.84: valor 84 cobre 80, mas 80*1.1/0.84 ≈ 104.76 > 100
        let s = compute_seizure(&pos(100, 80), 840_000_000_000_000_000, LIQUIDATION_BONUS_PPM).unwrap();
        assert_eq!(s.collateral_seized, 100 * WAD);
        assert_eq!(s.debt_repaid, 80 * WAD);
        assert_eq!(s.residual_debt, 0);
    }

    #[test]
    fn seizure_at_zero_price_takes_everything() {
        let s = compute_seizure(&pos(10, 5), 0, LIQUIDATION_BONUS_PPM).unwrap();
        assert_eq!(s, Seizure { collateral_seized: 10 * WAD, debt_repaid: 0, residual_debt: 5 * WAD });
    }

    fn crashed_engine() -> (LendingEngine, AccountId) {
        let mut e = LendingEngine::new(
            ProtocolConfig::default(),
            Reserves::new(1_000 * WAD, 1_000 * WAD),
        )
        .unwrap();
        let alice = AccountId::from("alice");
        e.deposit(&alice, 100 * WAD).unwrap();
        e.borrow(&alice, 80 * WAD).unwrap();
        // ~0.916 CORN/ETH: razão ~1.145, colateral ainda cobre dívida + bônus
        e.swap(45 * WAD, Asset::Base).unwrap();
        (e, alice)
    }

    #[test]
    fn healthy_position_is_not_liquidatable() {
        let mut e = LendingEngine::new(ProtocolConfig::default(), Reserves::new(1_000 * WAD, 1_000 * WAD)).unwrap();
        let alice = AccountId::from("alice");
        e.deposit(&alice, 100 * WAD).unwrap();
        e.borrow(&alice, 80 * WAD).unwrap();
        assert!(!e.is_liquidatable(&alice).unwrap());
        let err = e.liquidate(&alice, &AccountId::from("bob")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotLiquidatable);
        assert_eq!(e.position(&alice), pos(100, 80));
        assert_eq!(e.payout(&AccountId::from("bob")), 0);
    }

    #[test]
    fn anyone_can_liquidate_after_price_move() {
        let (mut e, alice) = crashed_engine();
        let bob = AccountId::from("bob");
        assert!(e.is_liquidatable(&alice).unwrap());
        assert_eq!(e.liquidatable_accounts().unwrap(), vec![alice.clone()]);

        let r = e.liquidate(&alice, &bob).unwrap();
        assert_eq!(r.seizure.residual_debt, 0);
        assert_eq!(r.seizure.debt_repaid, 80 * WAD);
        assert_eq!(r.position.debt, 0);
        assert_eq!(r.position.collateral, 100 * WAD - r.seizure.collateral_seized);
        assert!(r.position.collateral > 0);
        assert_eq!(e.payout(&bob), r.seizure.collateral_seized);
        assert!(!e.is_liquidatable(&alice).unwrap());
        assert_eq!(e.total_bad_debt().unwrap(), 0);
        assert_eq!(e.events().last().unwrap().kind(), "liquidated");
    }

    #[test]
    fn residual_debt_is_queryable_bad_debt() {
        let (mut e, alice) = crashed_engine();
        // derruba mais o preço até o colateral não cobrir a dívida
        e.swap(2_000 * WAD, Asset::Base).unwrap();
        let r = e.liquidate(&alice, &AccountId::from("bob")).unwrap();
        assert!(r.seizure.residual_debt > 0);
        assert_eq!(r.position.collateral, 0);
        assert_eq!(e.position(&alice).debt, r.seizure.residual_debt);
        assert_eq!(e.total_bad_debt().unwrap(), r.seizure.residual_debt);
    }

    #[test]
    fn drained_position_cannot_be_liquidated_again() {
        let (mut e, alice) = crashed_engine();
        e.swap(2_000 * WAD, Asset::Base).unwrap();
        let bob = AccountId::from("bob");
        let r = e.liquidate(&alice, &bob).unwrap();
        assert_eq!(r.position.collateral, 0);

        let events = e.events().len();
        let payout = e.payout(&bob);
        for _ in 0..3 {
            assert!(!e.is_liquidatable(&alice).unwrap());
            let err = e.liquidate(&alice, &bob).unwrap_err();
            assert_eq!(err.code, ErrorCode::NotLiquidatable);
        }
        assert_eq!(e.events().len(), events);
        assert_eq!(e.position(&alice), r.position);
        assert_eq!(e.payout(&bob), payout);
        assert!(e.liquidatable_accounts().unwrap().is_empty());
        assert_eq!(e.total_bad_debt().unwrap(), r.seizure.residual_debt);
    }

    #[test]
    fn dust_deposit_does_not_hide_bad_debt() {
        let (mut e, alice) = crashed_engine();
        e.swap(2_000 * WAD, Asset::Base).unwrap();
        let residual = e.liquidate(&alice, &AccountId::from("bob")).unwrap().seizure.residual_debt;
        e.deposit(&alice, 1).unwrap();
        let price = e.price().unwrap();
        let covered = health::collateral_value(1, price).unwrap();
        assert_eq!(e.total_bad_debt().unwrap(), residual - covered);
        assert!(e.total_bad_debt().unwrap() > 0);
    }
}
