// CPMM program errors

use cpmm_curve::CurveError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CpmmError {
    // Authorization errors (100-199)
    Unauthorized = 100,
    NotPrivilegedDeployer = 101,
    NotHeadAuthority = 102,
    NotPoolCreator = 103,

    // State errors (200-299)
    RegistryAlreadyInitialized = 200,
    FeeConfigAlreadyInitialized = 201,
    PoolAlreadyInitialized = 202,
    PoolNotInitialized = 203,
    PoolAlreadyLaunched = 204,
    PoolNotLaunched = 205,
    VaultNotBound = 206,
    BaseLiquidityIsZero = 207,
    QuoteLiquidityIsZero = 208,
    LpTokensSupplyIsZero = 209,
    ProgramNotConfigured = 210,

    // Validation errors (300-399)
    HeadAuthorityMismatch = 300,
    InvalidRegistry = 301,
    InvalidFeeConfig = 302,
    InvalidPool = 303,
    FeeConfigRegistryMismatch = 304,
    FeeRateExceeded = 305,
    IdenticalMints = 306,
    InvalidFeeAuthority = 307,
    MintHasFreezeAuthority = 308,
    UnsupportedMintExtension = 309,
    ProvidedBaseLiquidityIsZero = 310,
    ProvidedQuoteLiquidityIsZero = 311,
    ProvidedLpTokensIsZero = 312,
    SwapAmountIsZero = 313,
    EstimatedResultIsZero = 314,
    LiquidityRatioToleranceExceeded = 315,
    SwapSlippageExceeded = 316,

    // Insufficient funds errors (400-499)
    InsufficientFunds = 400,
    InsufficientBalanceForTransfer = 401,

    // Invariant errors (500-599)
    LaunchLiquidityTooSmall = 500,
    ConstantProductToleranceExceeded = 501,
    SwapResultIsZero = 502,
    TransferNetAmountMismatch = 503,

    // Arithmetic errors (600-699)
    LpTokensCalculationFailed = 600,
    BaseQuoteRatioCalculationFailed = 601,
    ConstantProductCalculationFailed = 602,
    WithdrawLiquidityCalculationFailed = 603,
    AfterswapCalculationFailed = 604,
    ProvideOverflow = 605,
    WithdrawOverflow = 606,
    SwapOverflow = 607,
    TransferFeeCalculationFailed = 608,
    ConfigsCountOverflow = 609,

    // Derivation errors (700-799)
    AddressDerivationFailed = 700,
}

/// Coarse error classes, one per code range
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Authorization,
    State,
    Validation,
    InsufficientFunds,
    Invariant,
    Arithmetic,
    Derivation,
}

impl CpmmError {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 {
            100..=199 => ErrorKind::Authorization,
            200..=299 => ErrorKind::State,
            300..=399 => ErrorKind::Validation,
            400..=499 => ErrorKind::InsufficientFunds,
            500..=599 => ErrorKind::Invariant,
            600..=699 => ErrorKind::Arithmetic,
            _ => ErrorKind::Derivation,
        }
    }
}

impl From<CurveError> for CpmmError {
    fn from(error: CurveError) -> Self {
        match error {
            CurveError::ProvidedBaseLiquidityIsZero => CpmmError::ProvidedBaseLiquidityIsZero,
            CurveError::ProvidedQuoteLiquidityIsZero => CpmmError::ProvidedQuoteLiquidityIsZero,
            CurveError::ProvidedLpTokensIsZero => CpmmError::ProvidedLpTokensIsZero,
            CurveError::SwapAmountIsZero => CpmmError::SwapAmountIsZero,
            CurveError::EstimatedResultIsZero => CpmmError::EstimatedResultIsZero,
            CurveError::BaseLiquidityIsZero => CpmmError::BaseLiquidityIsZero,
            CurveError::QuoteLiquidityIsZero => CpmmError::QuoteLiquidityIsZero,
            CurveError::LpTokensSupplyIsZero => CpmmError::LpTokensSupplyIsZero,
            CurveError::LaunchLiquidityTooSmall => CpmmError::LaunchLiquidityTooSmall,
            CurveError::LiquidityRatioToleranceExceeded => {
                CpmmError::LiquidityRatioToleranceExceeded
            }
            CurveError::ConstantProductToleranceExceeded => {
                CpmmError::ConstantProductToleranceExceeded
            }
            CurveError::SwapResultIsZero => CpmmError::SwapResultIsZero,
            CurveError::SwapSlippageExceeded => CpmmError::SwapSlippageExceeded,
            CurveError::LpTokensCalculationFailed => CpmmError::LpTokensCalculationFailed,
            CurveError::BaseQuoteRatioCalculationFailed => {
                CpmmError::BaseQuoteRatioCalculationFailed
            }
            CurveError::ConstantProductCalculationFailed => {
                CpmmError::ConstantProductCalculationFailed
            }
            CurveError::WithdrawLiquidityCalculationFailed => {
                CpmmError::WithdrawLiquidityCalculationFailed
            }
            CurveError::AfterswapCalculationFailed => CpmmError::AfterswapCalculationFailed,
            CurveError::ProvideOverflow => CpmmError::ProvideOverflow,
            CurveError::WithdrawOverflow => CpmmError::WithdrawOverflow,
            CurveError::SwapOverflow => CpmmError::SwapOverflow,
        }
    }
}
