pub mod metrics;   // contadores de rejeição, liquidação e bad debt
pub mod tracingx;  // EnvFilter a partir de RUST_LOG
pub mod wrap;      // latência por operação
