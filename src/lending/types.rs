//! Tipos do livro de posições.

use core::fmt;
use serde::Serialize;

use crate::amm::types::Wad;

/// Identificador opaco de conta.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self { Self::new(id) }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self { Self(id) }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Posição de uma conta: colateral em base (ETH) e dívida em quote (CORN).
/// Uma posição zerada equivale a "sem posição".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub collateral: Wad,
    pub debt: Wad,
}

impl Position {
    pub fn new(collateral: Wad, debt: Wad) -> Self { Self { collateral, debt } }

    pub fn is_empty(&self) -> bool { self.collateral == 0 && self.debt == 0 }
}
