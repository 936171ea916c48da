use cpmm_curve::{CurveState, FeeRates, LaunchPayload, ProvidePayload, SwapPayload, WithdrawPayload};
use cpmm_math::Q64x128;
use soroban_sdk::{contracttype, Address, BytesN};

use crate::error::CpmmError;

// ============================================================
// PROGRAM CONFIG
// ============================================================

/// Deploy-time bindings, written once by the constructor
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgramConfig {
    /// Only identity allowed to bootstrap the registry
    pub deployer: Address,
    pub token_adapter: Address,
    /// Native currency SAC used for the pool creation fee
    pub native_token: Address,
}

// ============================================================
// CONFIG REGISTRY
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigRegistry {
    pub authority: Address,
    pub head_authority: Address,
    pub configs_count: u64,
    pub bump: u32,
}

impl ConfigRegistry {
    /// Either member of the governance pair
    pub fn require_governor(&self, caller: &Address) -> Result<(), CpmmError> {
        if *caller != self.authority && *caller != self.head_authority {
            return Err(CpmmError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_head(&self, caller: &Address) -> Result<(), CpmmError> {
        if *caller != self.head_authority {
            return Err(CpmmError::NotHeadAuthority);
        }
        Ok(())
    }
}

// ============================================================
// FEE CONFIG
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    pub id: u64,
    /// Parent registry address
    pub registry: BytesN<32>,
    pub fee_authority: Address,
    pub protocol_fee_rate_bps: u32,
    pub providers_fee_rate_bps: u32,
    pub bump: u32,
}

impl FeeConfig {
    pub fn rates(&self) -> FeeRates {
        FeeRates {
            providers_fee_rate_basis_points: self.providers_fee_rate_bps,
            protocol_fee_rate_basis_points: self.protocol_fee_rate_bps,
        }
    }
}

// ============================================================
// POOL
// ============================================================

/// Vault slot of a pool. Stays `Pending` until launch binds it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Vault {
    Pending,
    Bound(BytesN<32>),
}

impl Vault {
    pub fn address(&self) -> Result<BytesN<32>, CpmmError> {
        match self {
            Vault::Bound(address) => Ok(address.clone()),
            Vault::Pending => Err(CpmmError::VaultNotBound),
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub creator: Address,
    pub fee_config: BytesN<32>,
    pub base_mint: Address,
    pub quote_mint: Address,
    pub lp_mint: Address,
    pub base_vault: Vault,
    pub quote_vault: Vault,
    pub locked_lp_vault: Vault,
    pub is_initialized: bool,
    pub is_launched: bool,
    pub initial_locked_liquidity: u64,
    pub lp_tokens_supply: u64,
    pub base_liquidity: u64,
    pub quote_liquidity: u64,
    pub protocol_base_fees_to_redeem: u64,
    pub protocol_quote_fees_to_redeem: u64,
    pub base_quote_ratio_sqrt: Q64x128,
    pub constant_product_sqrt: Q64x128,
    pub bump: u32,
}

impl Pool {
    /// Freshly initialized pool: vaults pending, every counter at zero
    pub fn new(
        creator: Address,
        fee_config: BytesN<32>,
        base_mint: Address,
        quote_mint: Address,
        lp_mint: Address,
        bump: u32,
    ) -> Self {
        Pool {
            creator,
            fee_config,
            base_mint,
            quote_mint,
            lp_mint,
            base_vault: Vault::Pending,
            quote_vault: Vault::Pending,
            locked_lp_vault: Vault::Pending,
            is_initialized: true,
            is_launched: false,
            initial_locked_liquidity: 0,
            lp_tokens_supply: 0,
            base_liquidity: 0,
            quote_liquidity: 0,
            protocol_base_fees_to_redeem: 0,
            protocol_quote_fees_to_redeem: 0,
            base_quote_ratio_sqrt: Q64x128::ZERO,
            constant_product_sqrt: Q64x128::ZERO,
            bump,
        }
    }

    pub fn require_launched(&self) -> Result<(), CpmmError> {
        if !self.is_launched {
            return Err(CpmmError::PoolNotLaunched);
        }
        Ok(())
    }

    pub fn curve_state(&self) -> CurveState {
        CurveState {
            base_liquidity: self.base_liquidity,
            quote_liquidity: self.quote_liquidity,
            lp_tokens_supply: self.lp_tokens_supply,
            constant_product_sqrt: self.constant_product_sqrt,
            base_quote_ratio_sqrt: self.base_quote_ratio_sqrt,
        }
    }

    pub fn apply_launch(&mut self, payload: &LaunchPayload) {
        self.base_liquidity = payload.base_liquidity;
        self.quote_liquidity = payload.quote_liquidity;
        self.lp_tokens_supply = payload.lp_tokens_supply;
        self.initial_locked_liquidity = payload.initial_locked_liquidity;
        self.constant_product_sqrt = payload.constant_product_sqrt;
        self.base_quote_ratio_sqrt = payload.base_quote_ratio_sqrt;
        self.is_launched = true;
    }

    pub fn apply_provide(&mut self, payload: &ProvidePayload) {
        self.base_liquidity = payload.base_liquidity;
        self.quote_liquidity = payload.quote_liquidity;
        self.lp_tokens_supply = payload.lp_tokens_supply;
        self.constant_product_sqrt = payload.constant_product_sqrt;
        self.base_quote_ratio_sqrt = payload.base_quote_ratio_sqrt;
    }

    pub fn apply_withdraw(&mut self, payload: &WithdrawPayload) {
        self.base_liquidity = payload.base_liquidity;
        self.quote_liquidity = payload.quote_liquidity;
        self.lp_tokens_supply = payload.lp_tokens_supply;
        self.constant_product_sqrt = payload.constant_product_sqrt;
        self.base_quote_ratio_sqrt = payload.base_quote_ratio_sqrt;
    }

    /// Reserves and trackers only; the protocol fee counter is bumped by the caller
    pub fn apply_swap(&mut self, payload: &SwapPayload) {
        self.base_liquidity = payload.base_liquidity;
        self.quote_liquidity = payload.quote_liquidity;
        self.constant_product_sqrt = payload.constant_product_sqrt;
        self.base_quote_ratio_sqrt = payload.base_quote_ratio_sqrt;
    }
}

// ============================================================
// RECORD STORE
// ============================================================

/// Tagged value stored under every derived address
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Record {
    Registry(ConfigRegistry),
    FeeConfig(FeeConfig),
    Pool(Pool),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccountKind {
    Registry,
    FeeConfig,
    Pool,
    Unknown,
}
