//! Motor de empréstimos: deposit, withdraw, borrow, repay (+ swap/move_price do pool).
//!
//! Cada operação é uma unidade indivisível: lê o preço do oráculo **uma vez** no
//! início, calcula e valida o estado tentativo, e só então escreve. Qualquer
//! falha retorna sem tocar no pool nem no livro.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::amm::pool::{Pool, SwapOutcome};
use crate::amm::price_mover;
use crate::amm::types::{Asset, Reserves, Wad};
use crate::error::{ProtocolError, Result};
use crate::error_catalog::ErrorCode;
use crate::error_map::from_balance_inputs;
use crate::obs::{metrics, wrap};
use crate::protocol_err;
use crate::telemetry::make_info_span;

use super::config::ProtocolConfig;
use super::events::LendingEvent;
use super::health;
use super::ledger::PositionLedger;
use super::types::{AccountId, Position};

/// Recibo de uma operação da própria conta.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpReceipt {
    pub position: Position,
    pub event: LendingEvent,
}

/// Recibo de um swap no pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapReceipt {
    pub outcome: SwapOutcome,
    pub event: LendingEvent,
}

pub(super) trait Receipt {
    fn event(&self) -> &LendingEvent;
}

impl Receipt for OpReceipt {
    fn event(&self) -> &LendingEvent { &self.event }
}

impl Receipt for SwapReceipt {
    fn event(&self) -> &LendingEvent { &self.event }
}

/// Estado completo do protocolo, possuído explicitamente pelo chamador.
#[derive(Clone, Debug)]
pub struct LendingEngine {
    pub(super) config: ProtocolConfig,
    pub(super) pool: Pool,
    pub(super) ledger: PositionLedger,
    pub(super) payouts: BTreeMap<AccountId, Wad>,
    events: Vec<LendingEvent>,
    next_op_id: u64,
}

pub(super) fn to_delta(amount: Wad) -> Result<i128> {
    i128::try_from(amount).map_err(|_| protocol_err!(ErrorCode::Overflow, amount => amount))
}

impl LendingEngine {
    pub fn new(config: ProtocolConfig, reserves: Reserves) -> Result<Self> {
        config.validate()?;
        let pool = Pool::new(reserves, config.swap_fee_ppm)?;
        Ok(Self {
            config,
            pool,
            ledger: PositionLedger::new(),
            payouts: BTreeMap::new(),
            events: Vec::new(),
            next_op_id: 0,
        })
    }

    /// Envelope comum: span, latência, log de commit/rejeição e registro do evento.
    pub(super) fn run<T, F>(&mut self, op: &'static str, f: F) -> Result<T>
    where
        T: Receipt,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.next_op_id += 1;
        let span = make_info_span(op, self.next_op_id, "lending_engine");
        let _guard = span.enter();
        match wrap::time(op, || f(self)) {
            Ok(receipt) => {
                info!(event = %receipt.event().to_json(), "commit");
                self.events.push(receipt.event().clone());
                Ok(receipt)
            }
            Err(err) => {
                warn!(code = %err.code, error = %err.to_log_json(), "rollback");
                metrics::record_rejection(op, err.code);
                Err(err)
            }
        }
    }

    // --------- Operações da conta ---------

    pub fn deposit(&mut self, account: &AccountId, amount: Wad) -> Result<OpReceipt> {
        self.run("deposit", |engine| {
            let _price = engine.pool.price()?;
            if amount == 0 {
                return Err(protocol_err!(ErrorCode::InvalidAmount, amount => amount));
            }
            let position = engine.ledger.mutate(account, to_delta(amount)?, 0)?;
            Ok(OpReceipt {
                position,
                event: LendingEvent::CollateralDeposited { account: account.clone(), amount, position },
            })
        })
    }

    pub fn withdraw(&mut self, account: &AccountId, amount: Wad) -> Result<OpReceipt> {
        self.run("withdraw", |engine| {
            let price = engine.pool.price()?;
            let current = engine.ledger.get(account);
            if let Some(code) = from_balance_inputs(amount, current.collateral) {
                return Err(protocol_err!(code, amount => amount, available => current.collateral));
            }
            let tentative = Position::new(current.collateral - amount, current.debt);
            engine.ensure_healthy(&tentative, price)?;
            let position = engine.ledger.mutate(account, -to_delta(amount)?, 0)?;
            Ok(OpReceipt {
                position,
                event: LendingEvent::CollateralWithdrawn { account: account.clone(), amount, position },
            })
        })
    }

    pub fn borrow(&mut self, account: &AccountId, amount: Wad) -> Result<OpReceipt> {
        self.run("borrow", |engine| {
            let price = engine.pool.price()?;
            if amount == 0 {
                return Err(protocol_err!(ErrorCode::InvalidAmount, amount => amount));
            }
            let current = engine.ledger.get(account);
            let debt = current
                .debt
                .checked_add(amount)
                .ok_or_else(|| ProtocolError::new(ErrorCode::Overflow))?;
            engine.ensure_healthy(&Position::new(current.collateral, debt), price)?;
            let position = engine.ledger.mutate(account, 0, to_delta(amount)?)?;
            Ok(OpReceipt {
                position,
                event: LendingEvent::Borrowed { account: account.clone(), amount, price, position },
            })
        })
    }

    pub fn repay(&mut self, account: &AccountId, amount: Wad) -> Result<OpReceipt> {
        self.run("repay", |engine| {
            let _price = engine.pool.price()?;
            let current = engine.ledger.get(account);
            if let Some(code) = from_balance_inputs(amount, current.debt) {
                return Err(protocol_err!(code, amount => amount, available => current.debt));
            }
            let position = engine.ledger.mutate(account, 0, -to_delta(amount)?)?;
            Ok(OpReceipt {
                position,
                event: LendingEvent::Repaid { account: account.clone(), amount, position },
            })
        })
    }

    fn ensure_healthy(&self, tentative: &Position, price: Wad) -> Result<()> {
        if health::is_healthy(tentative, price, self.config.min_ratio_ppm)? {
            return Ok(());
        }
        let ratio = health::health_ratio(tentative, price)?.unwrap_or(u128::MAX);
        Err(protocol_err!(
            ErrorCode::InsufficientCollateral,
            ratio_wad => ratio,
            min_ratio_ppm => self.config.min_ratio_ppm,
            price => price,
        ))
    }

    // --------- Pool (atividade de mercado) ---------

    pub fn swap(&mut self, amount_in: Wad, asset_in: Asset) -> Result<SwapReceipt> {
        self.run("swap", |engine| {
            let outcome = engine.pool.swap(amount_in, asset_in)?;
            Ok(swap_receipt(outcome))
        })
    }

    /// `size > 0` vende base (preço cai); `size < 0` vende quote (preço sobe).
    pub fn move_price(&mut self, size: i128) -> Result<SwapReceipt> {
        self.run("move_price", |engine| {
            let outcome = price_mover::move_price(&mut engine.pool, size)?;
            Ok(swap_receipt(outcome))
        })
    }

    // --------- Consultas ---------

    pub fn price(&self) -> Result<Wad> {
        self.pool.price()
    }

    pub fn position(&self, account: &AccountId) -> Position {
        self.ledger.get(account)
    }

    pub fn collateral_value(&self, account: &AccountId) -> Result<Wad> {
        health::collateral_value(self.ledger.get(account).collateral, self.price()?)
    }

    /// Razão em WAD; `None` sem dívida.
    pub fn health_ratio(&self, account: &AccountId) -> Result<Option<Wad>> {
        health::health_ratio(&self.ledger.get(account), self.price()?)
    }

    pub fn max_borrow(&self, account: &AccountId) -> Result<Wad> {
        health::max_borrow(&self.ledger.get(account), self.price()?, self.config.min_ratio_ppm)
    }

    pub fn max_withdrawable(&self, account: &AccountId) -> Result<Wad> {
        health::max_withdrawable(&self.ledger.get(account), self.price()?, self.config.min_ratio_ppm)
    }

    /// Colateral apreendido creditado a um liquidante.
    pub fn payout(&self, account: &AccountId) -> Wad {
        self.payouts.get(account).copied().unwrap_or(0)
    }

    /// Dívida não coberta pelo colateral ao preço atual, somada sobre todas as posições.
    /// Inclui o resíduo de liquidações mesmo depois de novos depósitos de poeira.
    pub fn total_bad_debt(&self) -> Result<Wad> {
        let price = self.price()?;
        let mut total = 0u128;
        for (_, position) in self.ledger.open_positions() {
            total = total.saturating_add(health::shortfall(position, price)?);
        }
        Ok(total)
    }

    pub fn config(&self) -> &ProtocolConfig { &self.config }

    pub fn pool(&self) -> &Pool { &self.pool }

    pub fn ledger(&self) -> &PositionLedger { &self.ledger }

    pub fn events(&self) -> &[LendingEvent] { &self.events }

    pub fn drain_events(&mut self) -> Vec<LendingEvent> {
        std::mem::take(&mut self.events)
    }
}

fn swap_receipt(outcome: SwapOutcome) -> SwapReceipt {
    SwapReceipt {
        event: LendingEvent::Swapped {
            asset_in: outcome.asset_in,
            amount_in: outcome.amount_in,
            amount_out: outcome.amount_out,
            reserves: outcome.reserves,
        },
        outcome,
    }
}
