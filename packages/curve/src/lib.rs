#![no_std]

pub mod constants;
pub mod engine;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::CurveError;
pub use types::{
    CurveState, FeeRates, LaunchPayload, ProvidePayload, SwapDirection, SwapPayload,
    WithdrawPayload,
};

// Re-export engine functions
pub use engine::{
    base_quote_ratio_sqrt, check_swap_result, constant_product_sqrt, launch_payload,
};
