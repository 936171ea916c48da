use cpmm_math::Q64x128;
use soroban_sdk::contracttype;

// ============================================================
// CURVE STATE
// ============================================================

/// Snapshot of the pool fields the curve math reads.
/// The program builds it from a launched pool record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CurveState {
    pub base_liquidity: u64,
    pub quote_liquidity: u64,
    pub lp_tokens_supply: u64,
    pub constant_product_sqrt: Q64x128,
    pub base_quote_ratio_sqrt: Q64x128,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FeeRates {
    pub providers_fee_rate_basis_points: u32,
    pub protocol_fee_rate_basis_points: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwapDirection {
    BaseToQuote,
    QuoteToBase,
}

// ============================================================
// PAYLOADS
// ============================================================

/// Result of a launch. Reserve fields are the pool's new absolute values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LaunchPayload {
    pub base_liquidity: u64,
    pub quote_liquidity: u64,
    pub lp_tokens_supply: u64,
    pub initial_locked_liquidity: u64,
    pub constant_product_sqrt: Q64x128,
    pub base_quote_ratio_sqrt: Q64x128,
}

impl LaunchPayload {
    /// LP tokens credited to the pool creator
    pub fn launch_liquidity(&self) -> u64 {
        self.lp_tokens_supply - self.initial_locked_liquidity
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProvidePayload {
    pub base_liquidity: u64,
    pub quote_liquidity: u64,
    pub lp_tokens_supply: u64,
    pub lp_tokens_to_mint: u64,
    pub constant_product_sqrt: Q64x128,
    pub base_quote_ratio_sqrt: Q64x128,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WithdrawPayload {
    pub base_liquidity: u64,
    pub quote_liquidity: u64,
    pub lp_tokens_supply: u64,
    pub base_withdraw_amount: u64,
    pub quote_withdraw_amount: u64,
    pub constant_product_sqrt: Q64x128,
    pub base_quote_ratio_sqrt: Q64x128,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SwapPayload {
    pub direction: SwapDirection,
    pub base_liquidity: u64,
    pub quote_liquidity: u64,
    pub providers_fee: u64,
    pub protocol_fee: u64,
    pub amount_out: u64,
    pub constant_product_sqrt: Q64x128,
    pub base_quote_ratio_sqrt: Q64x128,
}
