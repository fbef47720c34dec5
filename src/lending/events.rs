//! Eventos estruturados emitidos por operações mutáveis.
//! Consumidos apenas para exibição; o núcleo não depende de serem lidos.

use serde::Serialize;

use crate::amm::types::{Asset, Reserves, Wad};

use super::types::{AccountId, Position};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LendingEvent {
    CollateralDeposited {
        account: AccountId,
        amount: Wad,
        position: Position,
    },
    CollateralWithdrawn {
        account: AccountId,
        amount: Wad,
        position: Position,
    },
    Borrowed {
        account: AccountId,
        amount: Wad,
        price: Wad,
        position: Position,
    },
    Repaid {
        account: AccountId,
        amount: Wad,
        position: Position,
    },
    Liquidated {
        account: AccountId,
        caller: AccountId,
        price: Wad,
        debt_repaid: Wad,
        collateral_seized: Wad,
        /// Dívida que o colateral não cobriu (bad debt); 0 no caso normal.
        residual_debt: Wad,
        position: Position,
    },
    Swapped {
        asset_in: Asset,
        amount_in: Wad,
        amount_out: Wad,
        reserves: Reserves,
    },
}

impl LendingEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CollateralDeposited { .. } => "collateral_deposited",
            Self::CollateralWithdrawn { .. } => "collateral_withdrawn",
            Self::Borrowed { .. } => "borrowed",
            Self::Repaid { .. } => "repaid",
            Self::Liquidated { .. } => "liquidated",
            Self::Swapped { .. } => "swapped",
        }
    }

    /// JSON de uma linha para a camada de exibição.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"kind\":\"{}\"}}", self.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::types::WAD;

    #[test]
    fn json_carries_kind_and_snapshot() {
        let ev = LendingEvent::Liquidated {
            account: AccountId::from("alice"),
            caller: AccountId::from("bob"),
            price: WAD / 2,
            debt_repaid: 50 * WAD,
            collateral_seized: 100 * WAD,
            residual_debt: 30 * WAD,
            position: Position::new(0, 30 * WAD),
        };
        let json = ev.to_json();
        // u128 sai como inteiro exato, sem notação científica
        assert!(json.contains("\"residual_debt\":30000000000000000000"));
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["kind"], ev.kind());
        assert_eq!(v["account"], "alice");
        assert_eq!(v["caller"], "bob");
        assert_eq!(v["position"]["collateral"], 0);
    }

    #[test]
    fn swap_event_names_asset() {
        let ev = LendingEvent::Swapped {
            asset_in: Asset::Base,
            amount_in: 1,
            amount_out: 1,
            reserves: Reserves::new(2, 2),
        };
        let v: serde_json::Value = serde_json::from_str(&ev.to_json()).unwrap();
        assert_eq!(v["kind"], "swapped");
        assert_eq!(v["asset_in"], "base");
        assert_eq!(v["reserves"]["base"], 2);
    }
}
