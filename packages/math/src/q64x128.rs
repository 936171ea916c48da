// SPDX-License-Identifier: MIT
// Q64.128 Fixed-Point Arithmetic

use core::cmp::Ordering;

use soroban_sdk::contracttype;

use crate::constants::{FRACTIONAL_BITS, ROUNDING_BIT};
use crate::wide::U384;

/// Unsigned 192-bit fixed-point number: 64 integer bits, 128 fractional bits.
///
/// Stored as three little-endian 64-bit limbs so it can live inside
/// contract records. All arithmetic widens to [`U384`] and narrows back
/// with an explicit overflow check; nothing here wraps.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Q64x128 {
    pub lo: u64,
    pub mid: u64,
    pub hi: u64,
}

impl Q64x128 {
    pub const ZERO: Q64x128 = Q64x128 { lo: 0, mid: 0, hi: 0 };
    pub const ONE: Q64x128 = Q64x128 { lo: 0, mid: 0, hi: 1 };
    pub const MAX: Q64x128 = Q64x128 {
        lo: u64::MAX,
        mid: u64::MAX,
        hi: u64::MAX,
    };

    pub const fn from_u64(value: u64) -> Self {
        Q64x128 { lo: 0, mid: 0, hi: value }
    }

    /// Builds a value from its integer part and its 128 fractional bits
    pub const fn from_bits(integer: u64, fraction: u128) -> Self {
        Q64x128 {
            lo: fraction as u64,
            mid: (fraction >> 64) as u64,
            hi: integer,
        }
    }

    /// Integer part, floor-rounded
    pub fn as_u64(&self) -> u64 {
        self.hi
    }

    pub fn is_zero(&self) -> bool {
        *self == Q64x128::ZERO
    }

    pub fn to_wide(self) -> U384 {
        U384([self.lo, self.mid, self.hi, 0, 0, 0])
    }

    /// Narrows a raw 384-bit value, `None` if it needs more than 192 bits
    pub fn from_wide(value: U384) -> Option<Self> {
        let U384([lo, mid, hi, rest @ ..]) = value;
        if rest.iter().any(|&word| word != 0) {
            return None;
        }
        Some(Q64x128 { lo, mid, hi })
    }

    // ========================================================
    // CHECKED ARITHMETIC
    // ========================================================

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Self::from_wide(self.to_wide().checked_add(rhs.to_wide())?)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Self::from_wide(self.to_wide().checked_sub(rhs.to_wide())?)
    }

    /// `(a * b) >> 128`, floor-rounded
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let product = self.to_wide().checked_mul(rhs.to_wide())?;
        Self::from_wide(product >> FRACTIONAL_BITS)
    }

    /// `(a << 128) / b`, floor-rounded; `None` on a zero divisor
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        // 192 + 128 bits, no overflow within U384
        let numerator = self.to_wide() << FRACTIONAL_BITS;
        Self::from_wide(numerator.checked_div(rhs.to_wide())?)
    }

    pub fn saturating_mul(self, rhs: Self) -> Self {
        self.checked_mul(rhs).unwrap_or(Q64x128::MAX)
    }

    /// Like `checked_div`, but an oversized quotient saturates to `MAX`.
    /// Only a zero divisor yields `None`.
    pub fn saturating_checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(self.checked_div(rhs).unwrap_or(Q64x128::MAX))
    }

    pub fn abs_diff(self, other: Self) -> Self {
        let (larger, smaller) = if self >= other {
            (self, other)
        } else {
            (other, self)
        };
        larger.checked_sub(smaller).unwrap_or(Q64x128::ZERO)
    }

    // ========================================================
    // SQUARES AND ROOTS
    // ========================================================

    /// Square as an integer, rounded half up; `None` past `u128::MAX`
    pub fn checked_square_as_u128(self) -> Option<u128> {
        let square = self.to_wide().checked_mul(self.to_wide())?;
        let integer = u128::try_from(square >> (2 * FRACTIONAL_BITS)).ok()?;
        if square.bit(ROUNDING_BIT) {
            return integer.checked_add(1);
        }
        Some(integer)
    }

    /// `sqrt(a * b)` for two reserve magnitudes, without precision loss
    /// in the product
    pub fn sqrt_of_product(a: u64, b: u64) -> Self {
        let product = U384::from(a as u128 * b as u128) << (2 * FRACTIONAL_BITS);
        // sqrt of a value below 2^384 is below 2^192
        Self::from_wide(product.integer_sqrt()).unwrap_or(Q64x128::MAX)
    }

    /// `sqrt(q1 / q2)`. Equal operands give exactly `ONE`; a zero
    /// divisor or an overflowing quotient gives `None`.
    pub fn checked_div_sqrt(q1: Self, q2: Self) -> Option<Self> {
        if q2.is_zero() {
            return None;
        }
        if q1 == q2 {
            return Some(Q64x128::ONE);
        }
        let quotient = q1.checked_div(q2)?;
        Self::from_wide((quotient.to_wide() << FRACTIONAL_BITS).integer_sqrt())
    }
}

impl PartialOrd for Q64x128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Q64x128 {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.hi, self.mid, self.lo).cmp(&(other.hi, other.mid, other.lo))
    }
}
