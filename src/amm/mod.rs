pub mod types;         // Wad/Ppm/U256, Reserves, Asset
pub mod guardrails;    // validações + divisões checadas
pub mod swap;          // curva x·y=k
pub mod pricing;       // spot (oráculo), execução, impacto
pub mod pool;          // estado do pool + swap
pub mod price_mover;   // deslocamento de preço assinado
