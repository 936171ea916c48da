use cpmm_curve::{launch_payload, CurveState};

/// Curve state right after launching with `(base, quote)`
pub fn launched(base: u64, quote: u64) -> CurveState {
    let launch = launch_payload(base, quote).unwrap();
    CurveState {
        base_liquidity: launch.base_liquidity,
        quote_liquidity: launch.quote_liquidity,
        lp_tokens_supply: launch.lp_tokens_supply,
        constant_product_sqrt: launch.constant_product_sqrt,
        base_quote_ratio_sqrt: launch.base_quote_ratio_sqrt,
    }
}

/// Reference floor square root
pub fn isqrt_u128(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    let mut x = (value as f64).sqrt() as u128;
    while x.checked_mul(x).map_or(true, |sq| sq > value) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= value) {
        x += 1;
    }
    x
}
