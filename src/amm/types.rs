//! Tipos básicos do pool (escala fixa) + U256 para intermediários.

use serde::Serialize;
use uint::construct_uint;
construct_uint! {
    /// Inteiro de 256 bits para contas intermediárias seguras.
    pub struct U256(4);
}

pub type Wad = u128;   // escala 1e18
pub type Ppm = u32;    // partes por milhão

pub const WAD: Wad = 1_000_000_000_000_000_000u128; // 1e18
pub const PPM_SCALE: Ppm = 1_000_000;                // 1e6 (ppm)
pub const MIN_RESERVE: Wad = 1;                      // reservas sempre estritamente positivas

/// Ativo negociado no pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    /// Ativo de colateral (ETH).
    Base,
    /// Ativo emprestado (CORN).
    Quote,
}

impl core::fmt::Display for Asset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Asset::Base => "base",
            Asset::Quote => "quote",
        })
    }
}

/// Reservas do pool: `base` (colateral) e `quote` (ativo emprestado).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Reserves { pub base: Wad, pub quote: Wad }
impl Reserves {
    pub fn new(base: Wad, quote: Wad) -> Self { Self { base, quote } }

    /// Produto constante `k = base * quote` em 256 bits.
    pub fn k(&self) -> U256 { U256::from(self.base) * U256::from(self.quote) }

    /// Par (entrada, saída) para um swap que recebe `asset_in`.
    pub fn oriented(&self, asset_in: Asset) -> (Wad, Wad) {
        match asset_in {
            Asset::Base => (self.base, self.quote),
            Asset::Quote => (self.quote, self.base),
        }
    }
}
