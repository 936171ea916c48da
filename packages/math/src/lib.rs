// CPMM Math Package
//
// Wide-integer and Q64.128 fixed-point arithmetic shared by the curve
// package and the program contract.

#![no_std]

pub mod constants;
pub mod q64x128;
pub mod wide;

pub use constants::*;
pub use q64x128::Q64x128;
pub use wide::U384;
