//! Núcleo de empréstimo sobre-colateralizado com oráculo de preço AMM (x·y=k).
//!
//! - [`amm`]: pool de dois ativos, preço spot e swap com taxa
//! - [`lending`]: livro de posições, motor de empréstimos e liquidação
//! - [`error`]: erro estruturado com catálogo estável

pub mod amm;
pub mod lending;

pub mod error_catalog;
pub mod error;
pub mod error_map;

pub mod obs;
pub mod telemetry;

pub use amm::types::{Asset, Ppm, Reserves, Wad, PPM_SCALE, U256, WAD};
pub use error::{ProtocolError, Result};
pub use error_catalog::ErrorCode;
pub use lending::{AccountId, LendingEngine, LendingEvent, Position, ProtocolConfig};
