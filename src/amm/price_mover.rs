//! Movimentador de preço: atalho para deslocar a razão do pool com um único swap.
//!
//! `size > 0` vende `size` de base no pool (preço cai); `size < 0` vende `|size|`
//! de quote (preço sobe). Passa pelo mesmo caminho de `Pool::swap`.

use crate::error::ProtocolError;
use crate::error_catalog::ErrorCode;
use crate::protocol_err;

use super::pool::{Pool, SwapOutcome};
use super::types::Asset;

/// Direção e montante de um movimento assinado.
pub fn split_size(size: i128) -> Result<(Asset, u128), ProtocolError> {
    match size {
        0 => Err(protocol_err!(ErrorCode::InvalidAmount, size => size)),
        s if s > 0 => Ok((Asset::Base, s.unsigned_abs())),
        s => Ok((Asset::Quote, s.unsigned_abs())),
    }
}

pub fn move_price(pool: &mut Pool, size: i128) -> Result<SwapOutcome, ProtocolError> {
    let (asset_in, amount_in) = split_size(size)?;
    pool.swap(amount_in, asset_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::types::{Reserves, WAD};

    fn pool() -> Pool {
        Pool::new(Reserves::new(1_000 * WAD, 1_000 * WAD), 3_000).unwrap()
    }

    #[test]
    fn t_positive_size_sells_base() {
        let mut p = pool();
        let out = move_price(&mut p, (500 * WAD) as i128).unwrap();
        assert_eq!(out.asset_in, Asset::Base);
        assert!(p.price().unwrap() < WAD);
    }

    #[test]
    fn t_negative_size_sells_quote() {
        let mut p = pool();
        let out = move_price(&mut p, -((500 * WAD) as i128)).unwrap();
        assert_eq!(out.asset_in, Asset::Quote);
        assert!(p.price().unwrap() > WAD);
    }

    #[test]
    fn t_zero_size_rejected() {
        let mut p = pool();
        assert_eq!(move_price(&mut p, 0).unwrap_err().code, ErrorCode::InvalidAmount);
        assert_eq!(p.price().unwrap(), WAD);
    }

    #[test]
    fn t_min_size_has_no_overflow() {
        let (asset, amount) = split_size(i128::MIN).unwrap();
        assert_eq!(asset, Asset::Quote);
        assert_eq!(amount, 1u128 << 127);
    }
}
