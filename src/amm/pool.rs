//! Pool de dois ativos que serve de oráculo de preço para o protocolo.
//!
//! O preço reportado é `quote/base`, lido direto das reservas. O único jeito de
//! movê-lo é `swap`, aberto a qualquer participante: manipular o preço faz parte
//! do modelo de ameaça.

use crate::error::ProtocolError;
use crate::error_catalog::ErrorCode;
use crate::error_map::from_swap_inputs;
use crate::protocol_err;

use super::guardrails::ensure_reserves;
use super::pricing::spot_price;
use super::swap::get_amount_out;
use super::types::{Asset, Ppm, Reserves, Wad, PPM_SCALE};

/// Resultado de um swap aplicado.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapOutcome {
    pub asset_in: Asset,
    pub amount_in: Wad,
    pub amount_out: Wad,
    pub reserves: Reserves,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pool {
    reserves: Reserves,
    fee_ppm: Ppm,
}

impl Pool {
    /// Cria o pool com reservas iniciais estritamente positivas.
    pub fn new(reserves: Reserves, fee_ppm: Ppm) -> Result<Self, ProtocolError> {
        ensure_reserves(reserves.base, reserves.quote)?;
        if fee_ppm >= PPM_SCALE {
            return Err(protocol_err!(ErrorCode::InvalidConfig, param => "swap_fee_ppm", value => fee_ppm));
        }
        Ok(Self { reserves, fee_ppm })
    }

    pub fn reserves(&self) -> Reserves { self.reserves }

    pub fn fee_ppm(&self) -> Ppm { self.fee_ppm }

    /// Preço spot de 1 base em quote (WAD).
    pub fn price(&self) -> Result<Wad, ProtocolError> {
        spot_price(&self.reserves)
    }

    /// Simula um swap sem alterar as reservas.
    pub fn quote(&self, amount_in: Wad, asset_in: Asset) -> Result<Wad, ProtocolError> {
        let (r_in, r_out) = self.reserves.oriented(asset_in);
        if let Some(code) = from_swap_inputs(amount_in, (r_in, r_out), self.fee_ppm) {
            return Err(protocol_err!(code, amount_in => amount_in, asset_in => asset_in));
        }
        get_amount_out(r_in, r_out, amount_in, self.fee_ppm)
    }

    /// Aplica o swap: entra `amount_in` de `asset_in`, sai o outro ativo.
    /// Falha sem alterar nada se o swap esgotaria a reserva de saída.
    pub fn swap(&mut self, amount_in: Wad, asset_in: Asset) -> Result<SwapOutcome, ProtocolError> {
        let amount_out = self.quote(amount_in, asset_in)?;
        let (r_in, r_out) = self.reserves.oriented(asset_in);
        let new_in = r_in
            .checked_add(amount_in)
            .ok_or_else(|| ProtocolError::new(ErrorCode::Overflow))?;
        let new_out = r_out
            .checked_sub(amount_out)
            .ok_or_else(|| ProtocolError::new(ErrorCode::InsufficientLiquidity))?;
        let next = match asset_in {
            Asset::Base => Reserves::new(new_in, new_out),
            Asset::Quote => Reserves::new(new_out, new_in),
        };
        if next.k() < self.reserves.k() {
            // get_amount_out arredonda a favor do pool; chegar aqui é defeito
            return Err(protocol_err!(ErrorCode::Overflow, reason => "k diminuiria"));
        }
        self.reserves = next;
        Ok(SwapOutcome { asset_in, amount_in, amount_out, reserves: next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::types::WAD;

    fn pool(base: u128, quote: u128, fee: Ppm) -> Pool {
        Pool::new(Reserves::new(base * WAD, quote * WAD), fee).unwrap()
    }

    #[test]
    fn t_price_is_quote_over_base() {
        assert_eq!(pool(1_000, 1_000, 3_000).price().unwrap(), WAD);
        assert_eq!(pool(2_000, 1_000, 3_000).price().unwrap(), WAD / 2);
    }

    #[test]
    fn t_swap_base_in_lowers_price() {
        let mut p = pool(1_000, 1_000, 3_000);
        let before = p.price().unwrap();
        let k0 = p.reserves().k();
        let out = p.swap(100 * WAD, Asset::Base).unwrap();
        assert!(out.amount_out > 0);
        assert_eq!(p.reserves().base, 1_100 * WAD);
        assert_eq!(p.reserves().quote, 1_000 * WAD - out.amount_out);
        assert!(p.price().unwrap() < before);
        assert!(p.reserves().k() > k0);
    }

    #[test]
    fn t_swap_quote_in_raises_price() {
        let mut p = pool(1_000, 1_000, 3_000);
        let before = p.price().unwrap();
        p.swap(100 * WAD, Asset::Quote).unwrap();
        assert!(p.price().unwrap() > before);
    }

    #[test]
    fn t_quote_does_not_mutate() {
        let p = pool(1_000, 1_000, 3_000);
        let q = p.quote(10 * WAD, Asset::Base).unwrap();
        let mut p2 = p.clone();
        assert_eq!(p2.swap(10 * WAD, Asset::Base).unwrap().amount_out, q);
        assert_eq!(p.reserves(), Reserves::new(1_000 * WAD, 1_000 * WAD));
    }

    #[test]
    fn t_failed_swap_leaves_reserves() {
        let mut p = pool(1_000, 1_000, 3_000);
        let err = p.swap(0, Asset::Base).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(p.reserves(), Reserves::new(1_000 * WAD, 1_000 * WAD));
    }

    #[test]
    fn t_rejects_empty_pool_and_full_fee() {
        assert_eq!(Pool::new(Reserves::new(0, WAD), 0).unwrap_err().code, ErrorCode::DivisionByZero);
        assert_eq!(
            Pool::new(Reserves::new(WAD, WAD), PPM_SCALE).unwrap_err().code,
            ErrorCode::InvalidConfig
        );
    }
}
