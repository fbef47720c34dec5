//! Validações e helpers numéricos seguros para o pool e o livro de posições.
//! Objetivo: entradas seguras e divisões/multiplicações sem estouro.

use crate::error::ProtocolError;
use crate::error_catalog::ErrorCode;
use crate::protocol_err;

use super::types::{Wad, MIN_RESERVE, U256};

#[inline]
pub fn ensure_nonzero(amount: Wad) -> Result<(), ProtocolError> {
    if amount == 0 {
        Err(protocol_err!(ErrorCode::InvalidAmount, amount => amount))
    } else {
        Ok(())
    }
}

#[inline]
pub fn ensure_reserves(base: Wad, quote: Wad) -> Result<(), ProtocolError> {
    if base == 0 || quote == 0 {
        return Err(protocol_err!(ErrorCode::DivisionByZero, base => base, quote => quote));
    }
    if base < MIN_RESERVE || quote < MIN_RESERVE {
        return Err(protocol_err!(ErrorCode::InsufficientLiquidity, base => base, quote => quote));
    }
    Ok(())
}

#[inline]
pub fn checked_add(a: Wad, b: Wad) -> Result<Wad, ProtocolError> {
    a.checked_add(b).ok_or_else(|| ProtocolError::new(ErrorCode::Overflow))
}

#[inline]
pub fn checked_sub(a: Wad, b: Wad) -> Result<Wad, ProtocolError> {
    a.checked_sub(b).ok_or_else(|| ProtocolError::new(ErrorCode::Overflow))
}

#[inline]
pub fn mul_u128_to_u256(a: Wad, b: Wad) -> U256 {
    U256::from(a) * U256::from(b)
}

#[inline]
pub fn u256_to_u128_checked(v: U256) -> Result<Wad, ProtocolError> {
    if v > U256::from(u128::MAX) {
        Err(ProtocolError::new(ErrorCode::Overflow))
    } else {
        Ok(v.as_u128())
    }
}

/// (n + d - 1) / d em U256; `d` zero vira `DivisionByZero`.
#[inline]
pub fn ceil_div_u256(n: U256, d: U256) -> Result<U256, ProtocolError> {
    if d.is_zero() {
        return Err(ProtocolError::new(ErrorCode::DivisionByZero));
    }
    let (q, r) = n.div_mod(d);
    Ok(if r.is_zero() { q } else { q + U256::from(1u8) })
}

/// Divisão com arredondamento para baixo em U256 → u128.
#[inline]
pub fn div_floor_u256_to_u128(n: U256, d: U256) -> Result<Wad, ProtocolError> {
    if d.is_zero() {
        return Err(ProtocolError::new(ErrorCode::DivisionByZero));
    }
    u256_to_u128_checked(n / d)
}

/// Divisão com arredondamento para cima em U256 → u128.
#[inline]
pub fn div_ceil_u256_to_u128(n: U256, d: U256) -> Result<Wad, ProtocolError> {
    u256_to_u128_checked(ceil_div_u256(n, d)?)
}
