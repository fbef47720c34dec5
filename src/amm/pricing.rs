//! Utilitários de preço: spot (oráculo), preço de execução e impacto de um swap.

use crate::error::ProtocolError;

use super::guardrails::{div_floor_u256_to_u128, ensure_nonzero, ensure_reserves};
use super::swap::get_amount_out;
use super::types::{Asset, Ppm, Reserves, Wad, PPM_SCALE, U256, WAD};

// --------- Spot price ---------
/// Preço à vista de 1 base em quote: **p = quote/base** (em WAD, floor).
/// É o preço do oráculo: recalculado a cada leitura, nunca cacheado.
pub fn spot_price(reserves: &Reserves) -> Result<Wad, ProtocolError> {
    ensure_reserves(reserves.base, reserves.quote)?;
    let n = U256::from(reserves.quote) * U256::from(WAD);
    div_floor_u256_to_u128(n, U256::from(reserves.base))
}

/// Preço marginal do lado de entrada: quanto do ativo de saída vale 1 unidade de `asset_in`.
pub fn spot_price_for(reserves: &Reserves, asset_in: Asset) -> Result<Wad, ProtocolError> {
    let (r_in, r_out) = reserves.oriented(asset_in);
    ensure_reserves(r_in, r_out)?;
    div_floor_u256_to_u128(U256::from(r_out) * U256::from(WAD), U256::from(r_in))
}

// --------- Execução e impacto ---------
/// Preço efetivo da troca para um input **bruto** (inclui taxa): **p_exec = out/in** (em WAD).
pub fn execution_price(reserves: &Reserves, asset_in: Asset, amount_in: Wad, fee_ppm: Ppm) -> Result<Wad, ProtocolError> {
    ensure_nonzero(amount_in)?;
    let (r_in, r_out) = reserves.oriented(asset_in);
    let out = get_amount_out(r_in, r_out, amount_in, fee_ppm)?;
    div_floor_u256_to_u128(U256::from(out) * U256::from(WAD), U256::from(amount_in))
}

/// Impacto relativo em **PPM** comparando `p_exec` vs spot (sempre ≥0, teto 1e6).
pub fn price_impact_ppm(reserves: &Reserves, asset_in: Asset, amount_in: Wad, fee_ppm: Ppm) -> Result<Ppm, ProtocolError> {
    let spot = spot_price_for(reserves, asset_in)?;
    let exec = execution_price(reserves, asset_in, amount_in, fee_ppm)?;
    if exec >= spot || spot == 0 { return Ok(0); }
    let num = (U256::from(spot) - U256::from(exec)) * U256::from(PPM_SCALE);
    let q = div_floor_u256_to_u128(num, U256::from(spot))?;
    Ok(q.min(u128::from(PPM_SCALE)) as Ppm)
}
