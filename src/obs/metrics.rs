use once_cell::sync::Lazy;
use opentelemetry::metrics::Counter;
use opentelemetry::{global, KeyValue};

use crate::amm::types::{Wad, WAD};
use crate::error_catalog::ErrorCode;

struct Instruments {
    rejections: Counter<u64>,
    liquidations: Counter<u64>,
    bad_debt: Counter<f64>,
}

static INSTRUMENTS: Lazy<Instruments> = Lazy::new(|| {
    let meter = global::meter("corn_lending.core");
    Instruments {
        rejections: meter
            .u64_counter("op_rejections_total")
            .with_description("Operations rejected with full rollback, by error code")
            .build(),
        liquidations: meter
            .u64_counter("liquidations_total")
            .with_description("Executed liquidations")
            .build(),
        bad_debt: meter
            .f64_counter("bad_debt_quote")
            .with_unit("quote")
            .with_description("Residual debt left uncovered by liquidations")
            .build(),
    }
});

pub fn record_rejection(op: &'static str, code: ErrorCode) {
    INSTRUMENTS
        .rejections
        .add(1, &[KeyValue::new("op", op), KeyValue::new("code", code.code())]);
}

pub fn record_liquidation(residual_debt: Wad) {
    let bad = residual_debt > 0;
    INSTRUMENTS.liquidations.add(1, &[KeyValue::new("bad_debt", bad)]);
    if bad {
        INSTRUMENTS.bad_debt.add(residual_debt as f64 / WAD as f64, &[]);
    }
}
