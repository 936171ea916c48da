// Constants for the Q64.128 fixed-point layer
//
// Grouped by functionality; every value here is a bit position or a
// width, never a tunable.

// ============================================================
// FIXED-POINT LAYOUT (Q64.128)
// ============================================================

/// Number of fractional bits in a Q64.128 value
pub const FRACTIONAL_BITS: usize = 128;

/// Highest fractional bit of a squared Q64.128 value (a Q128.256).
/// When set, the fraction is at least one half.
pub const ROUNDING_BIT: usize = 2 * FRACTIONAL_BITS - 1;
