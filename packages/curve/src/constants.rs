use cpmm_math::Q64x128;

// ============================================================
// FEE CONSTANTS
// ============================================================

/// 100% expressed in basis points
pub const FEE_MAX_BASIS_POINTS: u32 = 10_000;

// ============================================================
// LP TOKEN CONSTANTS
// ============================================================

/// Decimals of every LP mint created by the program
pub const LP_MINT_DECIMALS: u32 = 5;

/// LP tokens minted into the locked vault at launch (one whole LP token)
pub const INITIAL_LOCKED_LP_TOKENS: u64 = 10u64.pow(LP_MINT_DECIMALS);

/// A launch must issue at least this many times the locked amount
pub const LAUNCH_LIQUIDITY_MULTIPLIER: u64 = 4;

// ============================================================
// TOLERANCES (Q64.128)
// ============================================================

/// Allowed relative drift of sqrt(base/quote) on provide and withdraw (~1e-8)
pub const ADJUST_LIQUIDITY_RATIO_TOLERANCE: Q64x128 =
    Q64x128::from_bits(0, 3_402_823_669_209_384_634_633_746_074_317);

/// Allowed relative drift of sqrt(base*quote) across a swap (~1e-8)
pub const SWAP_CONSTANT_PRODUCT_TOLERANCE: Q64x128 =
    Q64x128::from_bits(0, 3_402_823_669_209_384_634_633_746_074_317);
