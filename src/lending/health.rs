//! Matemática de solvência. Funções puras: o preço é sempre injetado pelo chamador.
//!
//! Arredondamentos a favor do protocolo:
//! - valor do colateral: floor
//! - checagem de razão: multiplicação cruzada exata `valor * 1e6 >= dívida * min_ratio`
//! - capacidade (max_borrow / max_withdrawable): floor

use crate::amm::guardrails::{ceil_div_u256, div_floor_u256_to_u128, u256_to_u128_checked};
use crate::amm::types::{Ppm, Wad, PPM_SCALE, U256, WAD};
use crate::error::ProtocolError;

use super::types::Position;

/// `collateral * price / WAD` em quote, floor.
pub fn collateral_value(collateral: Wad, price: Wad) -> Result<Wad, ProtocolError> {
    div_floor_u256_to_u128(U256::from(collateral) * U256::from(price), U256::from(WAD))
}

/// Razão de saúde em WAD (`1.25 = 1.25e18`). `None` quando não há dívida (∞).
/// Valores acima de `u128::MAX` saturam.
pub fn health_ratio(position: &Position, price: Wad) -> Result<Option<Wad>, ProtocolError> {
    if position.debt == 0 {
        return Ok(None);
    }
    let value = collateral_value(position.collateral, price)?;
    let ratio = U256::from(value) * U256::from(WAD) / U256::from(position.debt);
    Ok(Some(if ratio > U256::from(u128::MAX) { u128::MAX } else { ratio.as_u128() }))
}

/// Verdadeiro se a posição respeita `min_ratio_ppm` ao preço dado (sem dívida é sempre saudável).
pub fn is_healthy(position: &Position, price: Wad, min_ratio_ppm: Ppm) -> Result<bool, ProtocolError> {
    if position.debt == 0 {
        return Ok(true);
    }
    let value = collateral_value(position.collateral, price)?;
    let lhs = U256::from(value) * U256::from(PPM_SCALE);
    let rhs = U256::from(position.debt) * U256::from(min_ratio_ppm);
    Ok(lhs >= rhs)
}

/// `debt > 0`, colateral a apreender e razão abaixo do mínimo.
/// Sem colateral a dívida restante é só bad debt: nada a liquidar.
pub fn is_liquidatable(position: &Position, price: Wad, min_ratio_ppm: Ppm) -> Result<bool, ProtocolError> {
    Ok(position.debt > 0 && position.collateral > 0 && !is_healthy(position, price, min_ratio_ppm)?)
}

/// Parte da dívida que o colateral não cobre ao preço dado.
pub fn shortfall(position: &Position, price: Wad) -> Result<Wad, ProtocolError> {
    let value = collateral_value(position.collateral, price)?;
    Ok(position.debt - value.min(position.debt))
}

/// Maior dívida adicional que mantém a posição saudável.
pub fn max_borrow(position: &Position, price: Wad, min_ratio_ppm: Ppm) -> Result<Wad, ProtocolError> {
    let value = collateral_value(position.collateral, price)?;
    let cap = div_floor_u256_to_u128(
        U256::from(value) * U256::from(PPM_SCALE),
        U256::from(min_ratio_ppm),
    )?;
    Ok(cap.saturating_sub(position.debt))
}

/// Maior retirada de colateral que mantém a posição saudável.
pub fn max_withdrawable(position: &Position, price: Wad, min_ratio_ppm: Ppm) -> Result<Wad, ProtocolError> {
    if position.debt == 0 {
        return Ok(position.collateral);
    }
    if price == 0 {
        return Ok(0);
    }
    // valor mínimo exigido, depois o menor colateral que o atinge (ambos ceil)
    let required_value = ceil_div_u256(
        U256::from(position.debt) * U256::from(min_ratio_ppm),
        U256::from(PPM_SCALE),
    )?;
    let required_collateral = ceil_div_u256(required_value * U256::from(WAD), U256::from(price))?;
    if required_collateral >= U256::from(position.collateral) {
        return Ok(0);
    }
    let required = u256_to_u128_checked(required_collateral)?;
    Ok(position.collateral - required)
}
