//! Mapeamento entre condições de domínio e códigos de erro.
use crate::amm::types::{Ppm, Wad, PPM_SCALE};
use crate::error_catalog::ErrorCode;

/// Determina o código de erro para um swap a partir dos inputs brutos,
/// antes de qualquer aritmética de curva.
pub fn from_swap_inputs(amount_in: Wad, reserves: (Wad, Wad), fee_ppm: Ppm) -> Option<ErrorCode> {
    if amount_in == 0 {
        return Some(ErrorCode::InvalidAmount);
    }
    if reserves.0 == 0 || reserves.1 == 0 {
        return Some(ErrorCode::DivisionByZero);
    }
    if fee_ppm >= PPM_SCALE {
        return Some(ErrorCode::InvalidConfig);
    }
    if reserves.0.checked_add(amount_in).is_none() {
        return Some(ErrorCode::Overflow);
    }
    None
}

/// Determina o código de erro para uma retirada de `amount` contra `available`
/// (withdraw contra colateral, repay contra dívida).
pub fn from_balance_inputs(amount: Wad, available: Wad) -> Option<ErrorCode> {
    if amount == 0 {
        return Some(ErrorCode::InvalidAmount);
    }
    if amount > available {
        return Some(ErrorCode::InsufficientBalance);
    }
    None
}
