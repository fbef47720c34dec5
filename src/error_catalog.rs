//! Catálogo imutável de erros do protocolo (pool + empréstimos).
use core::fmt;

/// Código de erro do protocolo.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorCode {
    /// Montante de entrada zero (ou negativo, em deltas assinados).
    InvalidAmount,
    /// Repay/withdraw acima da dívida/colateral atual.
    InsufficientBalance,
    /// Razão de saúde resultante abaixo do mínimo.
    InsufficientCollateral,
    /// Swap esgotaria uma reserva do pool.
    InsufficientLiquidity,
    /// Liquidação de posição saudável.
    NotLiquidatable,
    /// Campo da posição ficaria negativo (defeito de lógica).
    NegativeBalance,
    /// Reserva base zerada na leitura de preço.
    DivisionByZero,
    /// Overflow ou underflow em cálculos numéricos.
    Overflow,
    /// Parâmetros de risco inválidos.
    InvalidConfig,
}

impl ErrorCode {
    /// Código textual estável do erro.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "LND-0001",
            Self::InsufficientBalance => "LND-0002",
            Self::InsufficientCollateral => "LND-0003",
            Self::InsufficientLiquidity => "LND-0004",
            Self::NotLiquidatable => "LND-0005",
            Self::NegativeBalance => "LND-0006",
            Self::DivisionByZero => "LND-0007",
            Self::Overflow => "LND-0008",
            Self::InvalidConfig => "LND-0009",
        }
    }

    /// Título curto em português.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "Quantidade inválida",
            Self::InsufficientBalance => "Saldo insuficiente",
            Self::InsufficientCollateral => "Colateral insuficiente",
            Self::InsufficientLiquidity => "Liquidez insuficiente",
            Self::NotLiquidatable => "Posição não liquidável",
            Self::NegativeBalance => "Saldo negativo",
            Self::DivisionByZero => "Divisão por zero",
            Self::Overflow => "Overflow numérico",
            Self::InvalidConfig => "Configuração inválida",
        }
    }

    /// Mensagem base em português. Aceita placeholders `{chave}` do contexto.
    pub const fn message_pt(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "amount deve ser > 0",
            Self::InsufficientBalance => "amount {amount} excede o saldo disponível {available}",
            Self::InsufficientCollateral => "razão de saúde ficaria abaixo do mínimo de {min_ratio_ppm} ppm",
            Self::InsufficientLiquidity => "swap esgotaria a reserva do pool",
            Self::NotLiquidatable => "posição de {account} está saudável",
            Self::NegativeBalance => "posição ficaria com saldo negativo",
            Self::DivisionByZero => "reserva base é 0",
            Self::Overflow => "overflow/underflow numérico",
            Self::InvalidConfig => "parâmetro {param} fora do intervalo permitido",
        }
    }

    /// Retorna todas as variantes em ordem estável.
    pub fn all() -> &'static [ErrorCode] {
        const ALL: &[ErrorCode] = &[
            ErrorCode::InvalidAmount,
            ErrorCode::InsufficientBalance,
            ErrorCode::InsufficientCollateral,
            ErrorCode::InsufficientLiquidity,
            ErrorCode::NotLiquidatable,
            ErrorCode::NegativeBalance,
            ErrorCode::DivisionByZero,
            ErrorCode::Overflow,
            ErrorCode::InvalidConfig,
        ];
        ALL
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mensagem padrão na localidade ativa (pt-BR).
pub fn default_locale_message(code: ErrorCode) -> &'static str {
    code.message_pt()
}
