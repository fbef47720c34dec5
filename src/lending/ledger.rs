//! Livro de posições: conta → (colateral, dívida). Puro; não lê preço.

use std::collections::BTreeMap;

use crate::amm::types::Wad;
use crate::error::ProtocolError;
use crate::error_catalog::ErrorCode;
use crate::protocol_err;

use super::types::{AccountId, Position};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionLedger {
    positions: BTreeMap<AccountId, Position>,
}

fn apply_delta(current: Wad, delta: i128, field: &'static str, account: &AccountId) -> Result<Wad, ProtocolError> {
    let next = if delta >= 0 {
        current.checked_add(delta.unsigned_abs())
    } else {
        current.checked_sub(delta.unsigned_abs())
    };
    next.ok_or_else(|| {
        let code = if delta < 0 { ErrorCode::NegativeBalance } else { ErrorCode::Overflow };
        protocol_err!(code, account => account, field => field, current => current, delta => delta)
    })
}

impl PositionLedger {
    pub fn new() -> Self { Self::default() }

    /// Posição da conta; zerada se nunca existiu.
    pub fn get(&self, account: &AccountId) -> Position {
        self.positions.get(account).copied().unwrap_or_default()
    }

    /// Aplica deltas assinados de forma atômica: ou os dois campos mudam, ou nenhum.
    pub fn mutate(&mut self, account: &AccountId, delta_collateral: i128, delta_debt: i128) -> Result<Position, ProtocolError> {
        let current = self.get(account);
        let next = Position {
            collateral: apply_delta(current.collateral, delta_collateral, "collateral", account)?,
            debt: apply_delta(current.debt, delta_debt, "debt", account)?,
        };
        // registros zerados ficam no mapa: "apagados" logicamente
        self.positions.insert(account.clone(), next);
        Ok(next)
    }

    /// Contas com registro (inclusive zeradas), em ordem estável.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &Position)> {
        self.positions.iter()
    }

    /// Contas com posição não vazia.
    pub fn open_positions(&self) -> impl Iterator<Item = (&AccountId, &Position)> {
        self.positions.iter().filter(|(_, p)| !p.is_empty())
    }

    pub fn total_debt(&self) -> Wad {
        self.positions.values().fold(0u128, |acc, p| acc.saturating_add(p.debt))
    }

    pub fn total_collateral(&self) -> Wad {
        self.positions.values().fold(0u128, |acc, p| acc.saturating_add(p.collateral))
    }
}
