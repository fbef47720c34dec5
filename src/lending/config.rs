//! Parâmetros de risco do protocolo.
//!
//! Defaults: razão mínima 120%, bônus de liquidação 10%, taxa de swap 0,3%.
//! `from_env` aceita overrides via `LENDING_MIN_RATIO_PPM`,
//! `LENDING_LIQUIDATION_BONUS_PPM` e `LENDING_SWAP_FEE_PPM`.

use crate::amm::types::{Ppm, PPM_SCALE};
use crate::error::ProtocolError;
use crate::error_catalog::ErrorCode;
use crate::protocol_err;

pub const MIN_RATIO_PPM: Ppm = 1_200_000;
pub const LIQUIDATION_BONUS_PPM: Ppm = 100_000;
pub const SWAP_FEE_PPM: Ppm = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub min_ratio_ppm: Ppm,
    pub liquidation_bonus_ppm: Ppm,
    pub swap_fee_ppm: Ppm,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            min_ratio_ppm: MIN_RATIO_PPM,
            liquidation_bonus_ppm: LIQUIDATION_BONUS_PPM,
            swap_fee_ppm: SWAP_FEE_PPM,
        }
    }
}

fn env_ppm(var: &str, default: Ppm) -> Result<Ppm, ProtocolError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<Ppm>()
            .map_err(|_| protocol_err!(ErrorCode::InvalidConfig, param => var, value => raw)),
        Err(_) => Ok(default),
    }
}

impl ProtocolConfig {
    pub fn from_env() -> Result<Self, ProtocolError> {
        let defaults = Self::default();
        let cfg = Self {
            min_ratio_ppm: env_ppm("LENDING_MIN_RATIO_PPM", defaults.min_ratio_ppm)?,
            liquidation_bonus_ppm: env_ppm("LENDING_LIQUIDATION_BONUS_PPM", defaults.liquidation_bonus_ppm)?,
            swap_fee_ppm: env_ppm("LENDING_SWAP_FEE_PPM", defaults.swap_fee_ppm)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.min_ratio_ppm <= PPM_SCALE {
            return Err(protocol_err!(ErrorCode::InvalidConfig, param => "min_ratio_ppm", value => self.min_ratio_ppm));
        }
        if self.liquidation_bonus_ppm > PPM_SCALE {
            return Err(protocol_err!(ErrorCode::InvalidConfig, param => "liquidation_bonus_ppm", value => self.liquidation_bonus_ppm));
        }
        if self.swap_fee_ppm >= PPM_SCALE {
            return Err(protocol_err!(ErrorCode::InvalidConfig, param => "swap_fee_ppm", value => self.swap_fee_ppm));
        }
        Ok(())
    }
}
