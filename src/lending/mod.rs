pub mod types;        // AccountId, Position
pub mod config;       // parâmetros de risco
pub mod health;       // valor do colateral, razão de saúde, capacidade
pub mod ledger;       // conta → posição
pub mod events;       // eventos para a camada de exibição
pub mod engine;       // deposit/withdraw/borrow/repay + swap
pub mod liquidation;  // is_liquidatable/liquidate

pub use config::ProtocolConfig;
pub use engine::{LendingEngine, OpReceipt, SwapReceipt};
pub use events::LendingEvent;
pub use liquidation::{LiquidationReceipt, Seizure};
pub use types::{AccountId, Position};
