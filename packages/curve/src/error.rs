/// Failures of the pure curve math.
///
/// The program maps each variant onto its own contract error code.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CurveError {
    // Input
    ProvidedBaseLiquidityIsZero,
    ProvidedQuoteLiquidityIsZero,
    ProvidedLpTokensIsZero,
    SwapAmountIsZero,
    EstimatedResultIsZero,

    // Pool state
    BaseLiquidityIsZero,
    QuoteLiquidityIsZero,
    LpTokensSupplyIsZero,

    // Invariants
    LaunchLiquidityTooSmall,
    LiquidityRatioToleranceExceeded,
    ConstantProductToleranceExceeded,
    SwapResultIsZero,
    SwapSlippageExceeded,

    // Arithmetic
    LpTokensCalculationFailed,
    BaseQuoteRatioCalculationFailed,
    ConstantProductCalculationFailed,
    WithdrawLiquidityCalculationFailed,
    AfterswapCalculationFailed,
    ProvideOverflow,
    WithdrawOverflow,
    SwapOverflow,
}
