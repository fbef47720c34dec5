//! Referência de alta precisão (BigInt/BigRational) para swap, preço e liquidação.
//! Reproduz a política de arredondamento do core e mede o desvio contra o valor contínuo.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use corn_lending_core::amm::swap::get_amount_out;
use corn_lending_core::lending::health::{collateral_value, max_borrow};
use corn_lending_core::lending::liquidation::compute_seizure;
use corn_lending_core::amm::pricing::spot_price;
use corn_lending_core::{Position, Ppm, Reserves, Wad, PPM_SCALE, WAD};

#[inline]
fn q(n: u128) -> BigRational { BigRational::from_integer(BigInt::from(n)) }

#[inline]
fn floor_u128(r: &BigRational) -> u128 { r.floor().to_integer().to_u128().expect("u128") }

#[inline]
fn ceil_u128(r: &BigRational) -> u128 { r.ceil().to_integer().to_u128().expect("u128") }

/// Saída contínua: y - x*y / (x + dx*(1-f)).
fn amount_out_exact(x: Wad, y: Wad, dx: Wad, fee_ppm: Ppm) -> BigRational {
    let one_minus_f = BigRational::new(BigInt::from(PPM_SCALE - fee_ppm), BigInt::from(PPM_SCALE));
    let dx_net = q(dx) * one_minus_f;
    q(y) - (q(x) * q(y)) / (q(x) + dx_net)
}

/// Mesma política do core: fee ceil, y* ceil, out = y - y*.
fn amount_out_policy(x: Wad, y: Wad, dx: Wad, fee_ppm: Ppm) -> u128 {
    let fee = ceil_u128(&(q(dx) * q(u128::from(fee_ppm)) / q(u128::from(PPM_SCALE))));
    let x1 = q(x) + q(dx - fee);
    let y_star = ceil_u128(&((q(x) * q(y)) / x1));
    y - y_star
}

const CASES: &[(u128, u128, u128, Ppm)] = &[
    (1_000 * WAD, 2_000 * WAD, WAD / 2, 3_000),
    (3_000 * WAD, 1_000 * WAD, WAD, 5_000),
    (1_000_000 * WAD, 1_000_000 * WAD, 1_000, 0),
    (1_000 * WAD, 1_000_000_000 * WAD, 7 * WAD, 3_000),
    (123_456_789_012_345_678_901, 987_654_321_098_765_432_109, 55_555_555_555_555_555, 3_000),
];

#[test]
fn golden_amount_out_matches_policy_and_stays_below_continuous() {
    for &(x, y, dx, fee) in CASES {
        let core = get_amount_out(x, y, dx, fee).expect("swap ok");
        assert_eq!(core, amount_out_policy(x, y, dx, fee), "policy mismatch x={} y={} dx={}", x, y, dx);

        let exact = amount_out_exact(x, y, dx, fee);
        assert!(q(core) <= exact, "core acima do contínuo: x={} y={} dx={}", x, y, dx);
        // desvio limitado: 1 wei de input líquido + 1 wei do ceil
        let bound = q(y) / q(x) + q(2);
        assert!(exact - q(core) <= bound, "desvio excessivo x={} y={} dx={}", x, y, dx);
    }
}

#[test]
fn golden_spot_price_is_floor_of_ratio() {
    for &(x, y, _, _) in CASES {
        let core = spot_price(&Reserves::new(x, y)).unwrap();
        let exact = q(y) * q(WAD) / q(x);
        assert_eq!(core, floor_u128(&exact));
    }
}

#[test]
fn golden_seizure_is_floor_of_bonus_over_price() {
    let prices = [WAD / 3, 2 * WAD / 3, 917_238_114_552_000_001, 3 * WAD];
    for price in prices {
        let debt = 80 * WAD + 12_345;
        let position = Position::new(1_000_000 * WAD, debt);
        let s = compute_seizure(&position, price, 100_000).unwrap();
        let exact = q(debt) * BigRational::new(BigInt::from(11), BigInt::from(10)) * q(WAD) / q(price);
        assert_eq!(s.collateral_seized, floor_u128(&exact), "price={}", price);
        assert!(!exact.is_zero());
    }
}

#[test]
fn golden_capacity_matches_exact_ratio() {
    let price = 917_238_114_552_000_001u128;
    let position = Position::new(100 * WAD + 1, 0);
    let cap = max_borrow(&position, price, 1_200_000).unwrap();
    let value = collateral_value(position.collateral, price).unwrap();
    let exact = q(value) * q(u128::from(PPM_SCALE)) / q(1_200_000);
    assert_eq!(cap, floor_u128(&exact));
}
