//! Funções puras de swap (CPMM x·y=k) com taxa sobre o input.
//! - get_amount_out: entrega `amount_in` de um lado e recebe do outro
//! - fee_on_input_ceil: parcela da taxa retida no pool

use crate::error::ProtocolError;
use crate::error_catalog::ErrorCode;
use crate::protocol_err;

use super::guardrails::{checked_add, div_ceil_u256_to_u128, ensure_nonzero, ensure_reserves};
use super::types::{Ppm, Wad, MIN_RESERVE, PPM_SCALE, U256};

/// Taxa cobrada sobre o input, arredondada para cima.
#[inline]
pub fn fee_on_input_ceil(amount_in: Wad, fee_ppm: Ppm) -> Result<Wad, ProtocolError> {
    if fee_ppm == 0 { return Ok(0); }
    let n = U256::from(amount_in) * U256::from(fee_ppm);
    div_ceil_u256_to_u128(n, U256::from(PPM_SCALE))
}

/// Calcula o `amount_out` ao enviar `amount_in` contra reservas (in, out).
/// `amount_out = reserve_out - (reserve_in * reserve_out) / (reserve_in + amount_in * (1 - f))`
/// Política de arredondamento:
/// - fee(input): ceil
/// - reserva de saída pós-swap k/x': ceil
/// - fronteira (out): floor via subtração inteira (y - y*)
///
/// Com isso `x' * y' >= x * y` vale sempre, com ou sem taxa.
pub fn get_amount_out(reserve_in: Wad, reserve_out: Wad, amount_in: Wad, fee_ppm: Ppm) -> Result<Wad, ProtocolError> {
    ensure_reserves(reserve_in, reserve_out)?;
    ensure_nonzero(amount_in)?;

    let fee = fee_on_input_ceil(amount_in, fee_ppm)?;
    let net = amount_in
        .checked_sub(fee)
        .ok_or_else(|| ProtocolError::new(ErrorCode::Overflow))?;
    if net == 0 {
        return Err(protocol_err!(ErrorCode::InvalidAmount, amount_in => amount_in, reason => "input líquido após taxa é 0"));
    }

    let x1 = checked_add(reserve_in, net)?;
    let k = U256::from(reserve_in) * U256::from(reserve_out);
    let y_star = div_ceil_u256_to_u128(k, U256::from(x1))?;

    let out = reserve_out
        .checked_sub(y_star)
        .ok_or_else(|| ProtocolError::new(ErrorCode::Overflow))?;
    if out >= reserve_out || reserve_out - out < MIN_RESERVE {
        return Err(protocol_err!(ErrorCode::InsufficientLiquidity, amount_out => out, reserve_out => reserve_out));
    }
    if out == 0 {
        return Err(protocol_err!(ErrorCode::InvalidAmount, amount_in => amount_in, reason => "output arredondado é 0"));
    }
    Ok(out)
}
