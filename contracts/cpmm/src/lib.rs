#![no_std]

//! # CPMM
//!
//! Constant-product market maker accounting.
//!
//! ## Responsibilities:
//! 1. Two-tier governance registry and numbered fee configs
//! 2. Pool lifecycle (initialize, launch) with mint policy checks
//! 3. Net-amount liquidity accounting (provide, withdraw, swap)
//! 4. Protocol fee accrual and collection

pub use cpmm_curve::SwapDirection;
pub use cpmm_math::Q64x128;
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env};

mod accounts;
mod adapter;
mod constants;
mod error;
mod events;
mod pool;
mod registry;
mod storage;
mod types;
mod validation;

use accounts::Account;
pub use adapter::{
    Holder, MintExtension, MintInfo, TokenAdapter, TokenAdapterClient, TransferFee,
};
pub use constants::{BASE_RESERVE, POOL_CREATION_FEE, POOL_RENT_RESERVE};
pub use error::{CpmmError, ErrorKind};
use storage::*;
pub use types::*;

// ============================================================
// CONTRACT
// ============================================================

#[contract]
pub struct Cpmm;

#[contractimpl]
impl Cpmm {
    /// Binds the deployer identity, the token adapter and the native token
    pub fn __constructor(env: Env, deployer: Address, token_adapter: Address, native_token: Address) {
        write_program_config(
            &env,
            &ProgramConfig {
                deployer,
                token_adapter,
                native_token,
            },
        );
    }

    // ========================================================
    // REGISTRY
    // ========================================================

    /// One-shot. `signer` must be the deployer and propose itself as head.
    pub fn initialize_registry(
        env: Env,
        signer: Address,
        head_authority: Address,
        authority: Address,
    ) -> Result<BytesN<32>, CpmmError> {
        registry::initialize_registry(&env, signer, head_authority, authority)
    }

    pub fn update_authority(
        env: Env,
        caller: Address,
        new_authority: Address,
    ) -> Result<(), CpmmError> {
        registry::update_authority(&env, caller, new_authority)
    }

    pub fn update_head_authority(
        env: Env,
        caller: Address,
        new_head_authority: Address,
    ) -> Result<(), CpmmError> {
        registry::update_head_authority(&env, caller, new_head_authority)
    }

    // ========================================================
    // FEE CONFIGS
    // ========================================================

    /// Creates fee config number `configs_count` under `registry`
    pub fn initialize_fee_config(
        env: Env,
        caller: Address,
        registry: BytesN<32>,
        fee_authority: Address,
        protocol_fee_rate_bps: u32,
        providers_fee_rate_bps: u32,
    ) -> Result<BytesN<32>, CpmmError> {
        registry::initialize_fee_config(
            &env,
            caller,
            registry,
            fee_authority,
            protocol_fee_rate_bps,
            providers_fee_rate_bps,
        )
    }

    pub fn update_fee_authority(
        env: Env,
        caller: Address,
        registry: BytesN<32>,
        config: BytesN<32>,
        new_fee_authority: Address,
    ) -> Result<(), CpmmError> {
        registry::update_fee_authority(&env, caller, registry, config, new_fee_authority)
    }

    pub fn update_protocol_fee_rate(
        env: Env,
        caller: Address,
        registry: BytesN<32>,
        config: BytesN<32>,
        new_rate_bps: u32,
    ) -> Result<(), CpmmError> {
        registry::update_protocol_fee_rate(&env, caller, registry, config, new_rate_bps)
    }

    pub fn update_providers_fee_rate(
        env: Env,
        caller: Address,
        registry: BytesN<32>,
        config: BytesN<32>,
        new_rate_bps: u32,
    ) -> Result<(), CpmmError> {
        registry::update_providers_fee_rate(&env, caller, registry, config, new_rate_bps)
    }

    // ========================================================
    // POOLS
    // ========================================================

    /// Creates the pool record and its LP mint, charging the creation fee
    ///
    /// # Arguments
    /// * `signer` - Pool creator, pays the native creation fee
    /// * `fee_config` - Fee config the pool trades under
    /// * `fee_authority` - Must match the fee config's fee authority
    /// * `lp_mint` - Fresh mint address, also the pool's derivation key
    pub fn initialize_pool(
        env: Env,
        signer: Address,
        fee_config: BytesN<32>,
        fee_authority: Address,
        base_mint: Address,
        quote_mint: Address,
        lp_mint: Address,
    ) -> Result<BytesN<32>, CpmmError> {
        pool::initialize_pool(&env, signer, fee_config, fee_authority, base_mint, quote_mint, lp_mint)
    }

    /// Creator-only first deposit. Returns the LP credited to the creator.
    pub fn launch(
        env: Env,
        signer: Address,
        pool: BytesN<32>,
        base_liquidity: u64,
        quote_liquidity: u64,
    ) -> Result<u64, CpmmError> {
        pool::launch(&env, signer, pool, base_liquidity, quote_liquidity)
    }

    pub fn provide(
        env: Env,
        signer: Address,
        pool: BytesN<32>,
        base_liquidity: u64,
        quote_liquidity: u64,
    ) -> Result<u64, CpmmError> {
        pool::provide(&env, signer, pool, base_liquidity, quote_liquidity)
    }

    pub fn withdraw(
        env: Env,
        signer: Address,
        pool: BytesN<32>,
        lp_tokens: u64,
    ) -> Result<(u64, u64), CpmmError> {
        pool::withdraw(&env, signer, pool, lp_tokens)
    }

    /// Swaps `amount` of the input side. The result must land within
    /// `allowed_slippage` of `estimated_result`.
    pub fn swap(
        env: Env,
        signer: Address,
        pool: BytesN<32>,
        amount: u64,
        estimated_result: u64,
        allowed_slippage: u64,
        direction: SwapDirection,
    ) -> Result<u64, CpmmError> {
        pool::swap(&env, signer, pool, amount, estimated_result, allowed_slippage, direction)
    }

    pub fn collect_fees(env: Env, signer: Address, pool: BytesN<32>) -> Result<(u64, u64), CpmmError> {
        pool::collect_fees(&env, signer, pool)
    }

    // ========================================================
    // READ FUNCTIONS
    // ========================================================

    pub fn get_program_config(env: Env) -> Result<ProgramConfig, CpmmError> {
        read_program_config(&env)
    }

    pub fn registry_address(env: Env) -> Result<BytesN<32>, CpmmError> {
        Ok(accounts::registry_address(&env)?.address)
    }

    pub fn fee_config_address(env: Env, id: u64) -> Result<BytesN<32>, CpmmError> {
        Ok(accounts::fee_config_address(&env, id)?.address)
    }

    pub fn pool_address(env: Env, lp_mint: Address) -> Result<BytesN<32>, CpmmError> {
        Ok(accounts::pool_address(&env, &lp_mint)?.address)
    }

    pub fn vault_address(env: Env, pool: BytesN<32>, mint: Address) -> Result<BytesN<32>, CpmmError> {
        Ok(accounts::vault_address(&env, &pool, &mint)?.address)
    }

    pub fn get_registry(env: Env) -> Option<ConfigRegistry> {
        let address = accounts::registry_address(&env).ok()?.address;
        match Account::resolve(&env, &address) {
            Account::Registry(registry) => Some(registry),
            _ => None,
        }
    }

    pub fn get_fee_config(env: Env, address: BytesN<32>) -> Option<FeeConfig> {
        match Account::resolve(&env, &address) {
            Account::FeeConfig(config) => Some(config),
            _ => None,
        }
    }

    pub fn get_pool(env: Env, address: BytesN<32>) -> Option<Pool> {
        match Account::resolve(&env, &address) {
            Account::Pool(pool) => Some(pool),
            _ => None,
        }
    }

    /// What kind of record lives at `address`
    pub fn account_kind(env: Env, address: BytesN<32>) -> AccountKind {
        Account::resolve(&env, &address).kind()
    }

    /// Expected output of a swap of `amount`, before slippage checks
    pub fn quote_swap(
        env: Env,
        pool: BytesN<32>,
        amount: u64,
        direction: SwapDirection,
    ) -> Result<u64, CpmmError> {
        pool::quote_swap(&env, pool, amount, direction)
    }
}
