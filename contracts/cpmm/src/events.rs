//! CPMM events

use cpmm_curve::SwapDirection;
use soroban_sdk::{Address, BytesN, Env, Symbol};

// ============================================================
// REGISTRY
// ============================================================

pub fn emit_registry_initialized(
    env: &Env,
    registry: &BytesN<32>,
    head_authority: &Address,
    authority: &Address,
) {
    env.events().publish(
        (Symbol::new(env, "RegistryInit"),),
        (registry.clone(), head_authority.clone(), authority.clone()),
    );
}

pub fn emit_authority_updated(env: &Env, old_authority: &Address, new_authority: &Address) {
    env.events().publish(
        (Symbol::new(env, "AuthorityUpdated"),),
        (old_authority.clone(), new_authority.clone()),
    );
}

pub fn emit_head_authority_updated(env: &Env, old_head: &Address, new_head: &Address) {
    env.events().publish(
        (Symbol::new(env, "HeadAuthorityUpdated"),),
        (old_head.clone(), new_head.clone()),
    );
}

// ============================================================
// FEE CONFIGS
// ============================================================

pub fn emit_fee_config_initialized(
    env: &Env,
    config: &BytesN<32>,
    id: u64,
    fee_authority: &Address,
    protocol_fee_rate_bps: u32,
    providers_fee_rate_bps: u32,
) {
    env.events().publish(
        (Symbol::new(env, "FeeConfigInit"),),
        (
            config.clone(),
            id,
            fee_authority.clone(),
            protocol_fee_rate_bps,
            providers_fee_rate_bps,
        ),
    );
}

pub fn emit_fee_authority_updated(env: &Env, config: &BytesN<32>, new_fee_authority: &Address) {
    env.events().publish(
        (Symbol::new(env, "FeeAuthorityUpdated"),),
        (config.clone(), new_fee_authority.clone()),
    );
}

pub fn emit_protocol_fee_rate_updated(env: &Env, config: &BytesN<32>, rate_bps: u32) {
    env.events().publish(
        (Symbol::new(env, "ProtocolFeeRateUpdated"),),
        (config.clone(), rate_bps),
    );
}

pub fn emit_providers_fee_rate_updated(env: &Env, config: &BytesN<32>, rate_bps: u32) {
    env.events().publish(
        (Symbol::new(env, "ProvidersFeeRateUpdated"),),
        (config.clone(), rate_bps),
    );
}

// ============================================================
// POOLS
// ============================================================

pub fn emit_pool_initialized(
    env: &Env,
    pool: &BytesN<32>,
    creator: &Address,
    base_mint: &Address,
    quote_mint: &Address,
    lp_mint: &Address,
) {
    env.events().publish(
        (Symbol::new(env, "PoolInit"),),
        (
            pool.clone(),
            creator.clone(),
            base_mint.clone(),
            quote_mint.clone(),
            lp_mint.clone(),
        ),
    );
}

/// Amounts are the net reserves credited to the vaults
pub fn emit_pool_launched(
    env: &Env,
    pool: &BytesN<32>,
    creator: &Address,
    base_liquidity: u64,
    quote_liquidity: u64,
    lp_tokens_supply: u64,
) {
    env.events().publish(
        (Symbol::new(env, "PoolLaunched"),),
        (pool.clone(), creator.clone(), base_liquidity, quote_liquidity, lp_tokens_supply),
    );
}

pub fn emit_liquidity_provided(
    env: &Env,
    pool: &BytesN<32>,
    provider: &Address,
    base_amount: u64,
    quote_amount: u64,
    lp_tokens: u64,
) {
    env.events().publish(
        (Symbol::new(env, "LiquidityProvided"),),
        (pool.clone(), provider.clone(), base_amount, quote_amount, lp_tokens),
    );
}

pub fn emit_liquidity_withdrawn(
    env: &Env,
    pool: &BytesN<32>,
    provider: &Address,
    lp_tokens: u64,
    base_amount: u64,
    quote_amount: u64,
) {
    env.events().publish(
        (Symbol::new(env, "LiquidityWithdrawn"),),
        (pool.clone(), provider.clone(), lp_tokens, base_amount, quote_amount),
    );
}

pub fn emit_swap(
    env: &Env,
    pool: &BytesN<32>,
    trader: &Address,
    direction: SwapDirection,
    amount_in: u64,
    amount_out: u64,
    protocol_fee: u64,
) {
    env.events().publish(
        (Symbol::new(env, "Swap"),),
        (pool.clone(), trader.clone(), direction, amount_in, amount_out, protocol_fee),
    );
}

pub fn emit_fees_collected(
    env: &Env,
    pool: &BytesN<32>,
    fee_authority: &Address,
    base_fees: u64,
    quote_fees: u64,
) {
    env.events().publish(
        (Symbol::new(env, "FeesCollected"),),
        (pool.clone(), fee_authority.clone(), base_fees, quote_fees),
    );
}
