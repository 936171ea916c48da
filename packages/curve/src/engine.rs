use cpmm_math::Q64x128;

use crate::constants::{
    ADJUST_LIQUIDITY_RATIO_TOLERANCE, FEE_MAX_BASIS_POINTS, INITIAL_LOCKED_LP_TOKENS,
    LAUNCH_LIQUIDITY_MULTIPLIER, SWAP_CONSTANT_PRODUCT_TOLERANCE,
};
use crate::error::CurveError;
use crate::types::{
    CurveState, FeeRates, LaunchPayload, ProvidePayload, SwapDirection, SwapPayload,
    WithdrawPayload,
};

// ============================================================
// INVARIANT TRACKERS
// ============================================================

/// sqrt(base * quote), `None` when the product is zero
pub fn constant_product_sqrt(base_liquidity: u64, quote_liquidity: u64) -> Option<Q64x128> {
    let value = Q64x128::sqrt_of_product(base_liquidity, quote_liquidity);
    if value.is_zero() {
        return None;
    }
    Some(value)
}

/// sqrt(base / quote), `None` when it is zero or does not fit
pub fn base_quote_ratio_sqrt(base_liquidity: u64, quote_liquidity: u64) -> Option<Q64x128> {
    let ratio = Q64x128::checked_div_sqrt(
        Q64x128::from_u64(base_liquidity),
        Q64x128::from_u64(quote_liquidity),
    )?;
    if ratio.is_zero() {
        return None;
    }
    Some(ratio)
}

pub fn check_swap_result(
    swap_result: u64,
    estimated_result: u64,
    allowed_slippage: u64,
) -> Result<(), CurveError> {
    if swap_result == 0 {
        return Err(CurveError::SwapResultIsZero);
    }
    if swap_result.abs_diff(estimated_result) > allowed_slippage {
        return Err(CurveError::SwapSlippageExceeded);
    }
    Ok(())
}

fn fee_amount(amount: u64, rate_basis_points: u32) -> u64 {
    // rate <= 10_000, so the quotient never exceeds `amount`
    ((amount as u128) * (rate_basis_points as u128) / (FEE_MAX_BASIS_POINTS as u128)) as u64
}

// ============================================================
// LAUNCH
// ============================================================

/// Initial issuance for a pool seeded with `(base, quote)` net reserves.
///
/// Supply is `floor(sqrt(base * quote))`. The first
/// [`INITIAL_LOCKED_LP_TOKENS`] are locked forever, and the total must be
/// at least [`LAUNCH_LIQUIDITY_MULTIPLIER`] times that amount.
pub fn launch_payload(base_liquidity: u64, quote_liquidity: u64) -> Result<LaunchPayload, CurveError> {
    if base_liquidity == 0 {
        return Err(CurveError::ProvidedBaseLiquidityIsZero);
    }
    if quote_liquidity == 0 {
        return Err(CurveError::ProvidedQuoteLiquidityIsZero);
    }

    let constant_product_sqrt = constant_product_sqrt(base_liquidity, quote_liquidity)
        .ok_or(CurveError::ConstantProductCalculationFailed)?;
    let base_quote_ratio_sqrt = base_quote_ratio_sqrt(base_liquidity, quote_liquidity)
        .ok_or(CurveError::BaseQuoteRatioCalculationFailed)?;

    let lp_tokens_supply = constant_product_sqrt.as_u64();
    if lp_tokens_supply == 0 {
        return Err(CurveError::LpTokensCalculationFailed);
    }
    if lp_tokens_supply < INITIAL_LOCKED_LP_TOKENS * LAUNCH_LIQUIDITY_MULTIPLIER {
        return Err(CurveError::LaunchLiquidityTooSmall);
    }

    Ok(LaunchPayload {
        base_liquidity,
        quote_liquidity,
        lp_tokens_supply,
        initial_locked_liquidity: INITIAL_LOCKED_LP_TOKENS,
        constant_product_sqrt,
        base_quote_ratio_sqrt,
    })
}

impl CurveState {
    pub fn check_state(&self) -> Result<(), CurveError> {
        if self.base_liquidity == 0 {
            return Err(CurveError::BaseLiquidityIsZero);
        }
        if self.quote_liquidity == 0 {
            return Err(CurveError::QuoteLiquidityIsZero);
        }
        if self.lp_tokens_supply == 0 {
            return Err(CurveError::LpTokensSupplyIsZero);
        }
        Ok(())
    }

    // ========================================================
    // PROVIDE
    // ========================================================

    /// Deposit of net `(base, quote)` amounts.
    ///
    /// The deposit must keep sqrt(base/quote) within
    /// [`ADJUST_LIQUIDITY_RATIO_TOLERANCE`]; minted LP is the relative growth of
    /// sqrt(base*quote) applied to the current supply, floored.
    pub fn provide(&self, base_amount: u64, quote_amount: u64) -> Result<ProvidePayload, CurveError> {
        self.check_state()?;
        if base_amount == 0 {
            return Err(CurveError::ProvidedBaseLiquidityIsZero);
        }
        if quote_amount == 0 {
            return Err(CurveError::ProvidedQuoteLiquidityIsZero);
        }

        let base_liquidity = self
            .base_liquidity
            .checked_add(base_amount)
            .ok_or(CurveError::ProvideOverflow)?;
        let quote_liquidity = self
            .quote_liquidity
            .checked_add(quote_amount)
            .ok_or(CurveError::ProvideOverflow)?;

        let base_quote_ratio_sqrt = self.validate_liquidity_ratio(base_liquidity, quote_liquidity)?;
        let constant_product_sqrt = constant_product_sqrt(base_liquidity, quote_liquidity)
            .ok_or(CurveError::ConstantProductCalculationFailed)?;

        let lp_tokens_to_mint = self
            .lp_mint_for(constant_product_sqrt)
            .filter(|minted| *minted > 0)
            .ok_or(CurveError::LpTokensCalculationFailed)?;
        let lp_tokens_supply = self
            .lp_tokens_supply
            .checked_add(lp_tokens_to_mint)
            .ok_or(CurveError::ProvideOverflow)?;

        Ok(ProvidePayload {
            base_liquidity,
            quote_liquidity,
            lp_tokens_supply,
            lp_tokens_to_mint,
            constant_product_sqrt,
            base_quote_ratio_sqrt,
        })
    }

    fn lp_mint_for(&self, new_constant_product_sqrt: Q64x128) -> Option<u64> {
        let provided = new_constant_product_sqrt.checked_sub(self.constant_product_sqrt)?;
        let share = provided.checked_div(self.constant_product_sqrt)?;
        Some(share.checked_mul(Q64x128::from_u64(self.lp_tokens_supply))?.as_u64())
    }

    // ========================================================
    // WITHDRAW
    // ========================================================

    /// Burn of `lp_tokens` for a pro-rata share of both reserves (floored)
    pub fn withdraw(&self, lp_tokens: u64) -> Result<WithdrawPayload, CurveError> {
        self.check_state()?;
        if lp_tokens == 0 {
            return Err(CurveError::ProvidedLpTokensIsZero);
        }

        let lp_tokens_supply = self
            .lp_tokens_supply
            .checked_sub(lp_tokens)
            .ok_or(CurveError::WithdrawOverflow)?;

        let (base_withdraw_amount, quote_withdraw_amount) = self
            .liquidity_from_share(lp_tokens)
            .ok_or(CurveError::WithdrawLiquidityCalculationFailed)?;

        let base_liquidity = self
            .base_liquidity
            .checked_sub(base_withdraw_amount)
            .ok_or(CurveError::WithdrawOverflow)?;
        let quote_liquidity = self
            .quote_liquidity
            .checked_sub(quote_withdraw_amount)
            .ok_or(CurveError::WithdrawOverflow)?;

        let base_quote_ratio_sqrt = self.validate_liquidity_ratio(base_liquidity, quote_liquidity)?;
        let constant_product_sqrt = constant_product_sqrt(base_liquidity, quote_liquidity)
            .ok_or(CurveError::ConstantProductCalculationFailed)?;

        Ok(WithdrawPayload {
            base_liquidity,
            quote_liquidity,
            lp_tokens_supply,
            base_withdraw_amount,
            quote_withdraw_amount,
            constant_product_sqrt,
            base_quote_ratio_sqrt,
        })
    }

    fn liquidity_from_share(&self, lp_tokens: u64) -> Option<(u64, u64)> {
        let share = Q64x128::from_u64(lp_tokens).checked_div(Q64x128::from_u64(self.lp_tokens_supply))?;
        let constant_product_sqrt_share = self.constant_product_sqrt.checked_mul(share)?;

        let base_withdraw = constant_product_sqrt_share
            .saturating_mul(self.base_quote_ratio_sqrt)
            .as_u64();
        let quote_withdraw = constant_product_sqrt_share
            .saturating_checked_div(self.base_quote_ratio_sqrt)?
            .as_u64();

        if base_withdraw == 0 || quote_withdraw == 0 {
            return None;
        }
        Some((base_withdraw, quote_withdraw))
    }

    // ========================================================
    // SWAP
    // ========================================================

    /// Swap of a net input `amount`, checked against `estimated_result`.
    ///
    /// Both fees are taken from the input before the invariant is applied.
    /// The providers' share is added back to the input reserve afterwards;
    /// the protocol share stays outside the reserves until collected.
    pub fn swap(
        &self,
        amount: u64,
        estimated_result: u64,
        allowed_slippage: u64,
        direction: SwapDirection,
        rates: FeeRates,
    ) -> Result<SwapPayload, CurveError> {
        if estimated_result == 0 {
            return Err(CurveError::EstimatedResultIsZero);
        }
        let payload = self.quote_swap(amount, direction, rates)?;
        check_swap_result(payload.amount_out, estimated_result, allowed_slippage)?;
        Ok(payload)
    }

    /// Swap math without the slippage check
    pub fn quote_swap(
        &self,
        amount: u64,
        direction: SwapDirection,
        rates: FeeRates,
    ) -> Result<SwapPayload, CurveError> {
        self.check_state()?;
        if amount == 0 {
            return Err(CurveError::SwapAmountIsZero);
        }

        let providers_fee = fee_amount(amount, rates.providers_fee_rate_basis_points);
        let protocol_fee = fee_amount(amount, rates.protocol_fee_rate_basis_points);
        let amount_after_fees = amount
            .checked_sub(providers_fee)
            .and_then(|rest| rest.checked_sub(protocol_fee))
            .ok_or(CurveError::SwapOverflow)?;

        let (in_reserve, out_reserve) = match direction {
            SwapDirection::BaseToQuote => (self.base_liquidity, self.quote_liquidity),
            SwapDirection::QuoteToBase => (self.quote_liquidity, self.base_liquidity),
        };

        let new_in_reserve = in_reserve
            .checked_add(amount_after_fees)
            .ok_or(CurveError::AfterswapCalculationFailed)?;
        let new_out_reserve = self
            .opposite_liquidity(new_in_reserve)
            .ok_or(CurveError::AfterswapCalculationFailed)?;

        self.validate_constant_product(new_in_reserve, new_out_reserve)?;

        let amount_out = out_reserve
            .checked_sub(new_out_reserve)
            .ok_or(CurveError::SwapOverflow)?;
        if amount_out == 0 {
            return Err(CurveError::SwapResultIsZero);
        }

        let stored_in_reserve = new_in_reserve
            .checked_add(providers_fee)
            .ok_or(CurveError::SwapOverflow)?;
        let (base_liquidity, quote_liquidity) = match direction {
            SwapDirection::BaseToQuote => (stored_in_reserve, new_out_reserve),
            SwapDirection::QuoteToBase => (new_out_reserve, stored_in_reserve),
        };

        let constant_product_sqrt = constant_product_sqrt(base_liquidity, quote_liquidity)
            .ok_or(CurveError::ConstantProductCalculationFailed)?;
        let base_quote_ratio_sqrt = base_quote_ratio_sqrt(base_liquidity, quote_liquidity)
            .ok_or(CurveError::BaseQuoteRatioCalculationFailed)?;

        Ok(SwapPayload {
            direction,
            base_liquidity,
            quote_liquidity,
            providers_fee,
            protocol_fee,
            amount_out,
            constant_product_sqrt,
            base_quote_ratio_sqrt,
        })
    }

    /// floor(K / x), where K is the rounded square of the tracked root
    fn opposite_liquidity(&self, x_liquidity: u64) -> Option<u64> {
        let constant_product = self.constant_product_sqrt.checked_square_as_u128()?;
        let opposite = u64::try_from(constant_product / x_liquidity as u128).ok()?;
        if opposite == 0 {
            return None;
        }
        Some(opposite)
    }

    // ========================================================
    // TOLERANCE CHECKS
    // ========================================================

    fn validate_liquidity_ratio(
        &self,
        new_base_liquidity: u64,
        new_quote_liquidity: u64,
    ) -> Result<Q64x128, CurveError> {
        let new_ratio = base_quote_ratio_sqrt(new_base_liquidity, new_quote_liquidity)
            .ok_or(CurveError::BaseQuoteRatioCalculationFailed)?;
        let difference = self.base_quote_ratio_sqrt.abs_diff(new_ratio);
        let allowed = self.base_quote_ratio_sqrt.saturating_mul(ADJUST_LIQUIDITY_RATIO_TOLERANCE);
        if difference > allowed {
            return Err(CurveError::LiquidityRatioToleranceExceeded);
        }
        Ok(new_ratio)
    }

    fn validate_constant_product(
        &self,
        new_base_liquidity: u64,
        new_quote_liquidity: u64,
    ) -> Result<(), CurveError> {
        let new_constant_product_sqrt = constant_product_sqrt(new_base_liquidity, new_quote_liquidity)
            .ok_or(CurveError::ConstantProductCalculationFailed)?;
        let difference = self.constant_product_sqrt.abs_diff(new_constant_product_sqrt);
        let allowed = self.constant_product_sqrt.saturating_mul(SWAP_CONSTANT_PRODUCT_TOLERANCE);
        if difference > allowed {
            return Err(CurveError::ConstantProductToleranceExceeded);
        }
        Ok(())
    }
}
