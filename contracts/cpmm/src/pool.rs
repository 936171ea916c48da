//! Pool lifecycle: initialize, launch, provide, withdraw, swap, collect fees.
//!
//! Every amount that enters a vault is predicted net of the mint's
//! transfer fee before anything moves, and the adapter's reported net is
//! checked against that prediction. Reserves only ever record net amounts.

use cpmm_curve::{launch_payload, SwapDirection, LP_MINT_DECIMALS};
use soroban_sdk::{token, Address, BytesN, Env};

use crate::accounts::{self, load_fee_config, load_pool, vault_address};
use crate::adapter::{Holder, TokenAdapterClient};
use crate::constants::{POOL_CREATION_FEE, POOL_RENT_RESERVE};
use crate::error::CpmmError;
use crate::events::*;
use crate::storage::{has_record, read_program_config, write_record};
use crate::types::{Pool, Record, Vault};
use crate::validation::validate_tradable_mint;

// ============================================================
// INITIALIZE
// ============================================================

pub fn initialize_pool(
    env: &Env,
    signer: Address,
    fee_config_address: BytesN<32>,
    fee_authority: Address,
    base_mint: Address,
    quote_mint: Address,
    lp_mint: Address,
) -> Result<BytesN<32>, CpmmError> {
    signer.require_auth();
    lp_mint.require_auth();

    if base_mint == quote_mint {
        return Err(CpmmError::IdenticalMints);
    }

    let fee_config = load_fee_config(env, &fee_config_address)?;
    if fee_authority != fee_config.fee_authority {
        return Err(CpmmError::InvalidFeeAuthority);
    }

    let derived = accounts::pool_address(env, &lp_mint)?;
    if has_record(env, &derived.address) {
        return Err(CpmmError::PoolAlreadyInitialized);
    }

    let program = read_program_config(env)?;
    let adapter = TokenAdapterClient::new(env, &program.token_adapter);
    validate_tradable_mint(&adapter.mint_info(&base_mint))?;
    validate_tradable_mint(&adapter.mint_info(&quote_mint))?;

    let native = token::Client::new(env, &program.native_token);
    if native.balance(&signer) < POOL_CREATION_FEE + POOL_RENT_RESERVE {
        return Err(CpmmError::InsufficientFunds);
    }

    adapter.initialize_mint(&lp_mint, &LP_MINT_DECIMALS, &env.current_contract_address());
    native.transfer(&signer, &fee_config.fee_authority, &POOL_CREATION_FEE);

    let pool = Pool::new(
        signer.clone(),
        fee_config_address,
        base_mint.clone(),
        quote_mint.clone(),
        lp_mint.clone(),
        derived.bump,
    );
    write_record(env, &derived.address, &Record::Pool(pool));

    emit_pool_initialized(env, &derived.address, &signer, &base_mint, &quote_mint, &lp_mint);

    Ok(derived.address)
}

// ============================================================
// LAUNCH
// ============================================================

/// Seeds the pool and returns the LP tokens credited to the creator
pub fn launch(
    env: &Env,
    signer: Address,
    pool_address: BytesN<32>,
    base_liquidity: u64,
    quote_liquidity: u64,
) -> Result<u64, CpmmError> {
    signer.require_auth();

    let mut pool = load_pool(env, &pool_address)?;
    if signer != pool.creator {
        return Err(CpmmError::NotPoolCreator);
    }
    if !pool.is_initialized {
        return Err(CpmmError::PoolNotInitialized);
    }
    if pool.is_launched {
        return Err(CpmmError::PoolAlreadyLaunched);
    }

    let adapter = adapter_client(env)?;
    let net_base = adapter.mint_info(&pool.base_mint).net_amount(base_liquidity)?;
    let net_quote = adapter.mint_info(&pool.quote_mint).net_amount(quote_liquidity)?;
    let payload = launch_payload(net_base, net_quote)?;

    let user = Holder::Wallet(signer.clone());
    require_balance(&adapter, &pool.base_mint, &user, base_liquidity)?;
    require_balance(&adapter, &pool.quote_mint, &user, quote_liquidity)?;

    let base_vault = open_vault(env, &adapter, &pool_address, &pool.base_mint)?;
    let quote_vault = open_vault(env, &adapter, &pool_address, &pool.quote_mint)?;
    let locked_lp_vault = open_vault(env, &adapter, &pool_address, &pool.lp_mint)?;

    deposit(
        &adapter,
        &pool.base_mint,
        &user,
        &vault_holder(env, &base_vault),
        base_liquidity,
        net_base,
    )?;
    deposit(
        &adapter,
        &pool.quote_mint,
        &user,
        &vault_holder(env, &quote_vault),
        quote_liquidity,
        net_quote,
    )?;

    let creator_lp = payload.launch_liquidity();
    adapter.mint_to(
        &pool.lp_mint,
        &vault_holder(env, &locked_lp_vault),
        &payload.initial_locked_liquidity,
    );
    adapter.create_account_idempotent(&pool.lp_mint, &user);
    adapter.mint_to(&pool.lp_mint, &user, &creator_lp);

    pool.base_vault = Vault::Bound(base_vault);
    pool.quote_vault = Vault::Bound(quote_vault);
    pool.locked_lp_vault = Vault::Bound(locked_lp_vault);
    pool.apply_launch(&payload);
    write_record(env, &pool_address, &Record::Pool(pool));

    emit_pool_launched(env, &pool_address, &signer, net_base, net_quote, payload.lp_tokens_supply);

    Ok(creator_lp)
}

// ============================================================
// PROVIDE / WITHDRAW
// ============================================================

/// Deposits both sides at the current ratio, returns the LP tokens minted
pub fn provide(
    env: &Env,
    signer: Address,
    pool_address: BytesN<32>,
    base_liquidity: u64,
    quote_liquidity: u64,
) -> Result<u64, CpmmError> {
    signer.require_auth();

    let mut pool = load_pool(env, &pool_address)?;
    pool.require_launched()?;

    let adapter = adapter_client(env)?;
    let net_base = adapter.mint_info(&pool.base_mint).net_amount(base_liquidity)?;
    let net_quote = adapter.mint_info(&pool.quote_mint).net_amount(quote_liquidity)?;
    let payload = pool.curve_state().provide(net_base, net_quote)?;

    let user = Holder::Wallet(signer.clone());
    require_balance(&adapter, &pool.base_mint, &user, base_liquidity)?;
    require_balance(&adapter, &pool.quote_mint, &user, quote_liquidity)?;

    let base_vault = vault_holder(env, &pool.base_vault.address()?);
    let quote_vault = vault_holder(env, &pool.quote_vault.address()?);
    deposit(&adapter, &pool.base_mint, &user, &base_vault, base_liquidity, net_base)?;
    deposit(&adapter, &pool.quote_mint, &user, &quote_vault, quote_liquidity, net_quote)?;

    adapter.create_account_idempotent(&pool.lp_mint, &user);
    adapter.mint_to(&pool.lp_mint, &user, &payload.lp_tokens_to_mint);

    pool.apply_provide(&payload);
    write_record(env, &pool_address, &Record::Pool(pool));

    emit_liquidity_provided(
        env,
        &pool_address,
        &signer,
        net_base,
        net_quote,
        payload.lp_tokens_to_mint,
    );

    Ok(payload.lp_tokens_to_mint)
}

/// Burns `lp_tokens` and pays out the pro-rata share of both reserves
pub fn withdraw(
    env: &Env,
    signer: Address,
    pool_address: BytesN<32>,
    lp_tokens: u64,
) -> Result<(u64, u64), CpmmError> {
    signer.require_auth();

    let mut pool = load_pool(env, &pool_address)?;
    pool.require_launched()?;

    let payload = pool.curve_state().withdraw(lp_tokens)?;

    let adapter = adapter_client(env)?;
    let user = Holder::Wallet(signer.clone());
    require_balance(&adapter, &pool.lp_mint, &user, lp_tokens)?;

    let base_vault = vault_holder(env, &pool.base_vault.address()?);
    let quote_vault = vault_holder(env, &pool.quote_vault.address()?);

    adapter.burn_from(&pool.lp_mint, &user, &lp_tokens);
    adapter.create_account_idempotent(&pool.base_mint, &user);
    adapter.create_account_idempotent(&pool.quote_mint, &user);
    adapter.transfer(&pool.base_mint, &base_vault, &user, &payload.base_withdraw_amount);
    adapter.transfer(&pool.quote_mint, &quote_vault, &user, &payload.quote_withdraw_amount);

    pool.apply_withdraw(&payload);
    write_record(env, &pool_address, &Record::Pool(pool));

    emit_liquidity_withdrawn(
        env,
        &pool_address,
        &signer,
        lp_tokens,
        payload.base_withdraw_amount,
        payload.quote_withdraw_amount,
    );

    Ok((payload.base_withdraw_amount, payload.quote_withdraw_amount))
}

// ============================================================
// SWAP
// ============================================================

pub fn swap(
    env: &Env,
    signer: Address,
    pool_address: BytesN<32>,
    amount: u64,
    estimated_result: u64,
    allowed_slippage: u64,
    direction: SwapDirection,
) -> Result<u64, CpmmError> {
    signer.require_auth();

    let mut pool = load_pool(env, &pool_address)?;
    pool.require_launched()?;
    let fee_config = load_fee_config(env, &pool.fee_config)?;

    let (in_mint, out_mint, in_vault, out_vault) = match direction {
        SwapDirection::BaseToQuote => (
            pool.base_mint.clone(),
            pool.quote_mint.clone(),
            pool.base_vault.address()?,
            pool.quote_vault.address()?,
        ),
        SwapDirection::QuoteToBase => (
            pool.quote_mint.clone(),
            pool.base_mint.clone(),
            pool.quote_vault.address()?,
            pool.base_vault.address()?,
        ),
    };

    let adapter = adapter_client(env)?;
    let net_in = adapter.mint_info(&in_mint).net_amount(amount)?;
    let payload = pool.curve_state().swap(
        net_in,
        estimated_result,
        allowed_slippage,
        direction,
        fee_config.rates(),
    )?;

    match direction {
        SwapDirection::BaseToQuote => {
            pool.protocol_base_fees_to_redeem = pool
                .protocol_base_fees_to_redeem
                .checked_add(payload.protocol_fee)
                .ok_or(CpmmError::SwapOverflow)?;
        }
        SwapDirection::QuoteToBase => {
            pool.protocol_quote_fees_to_redeem = pool
                .protocol_quote_fees_to_redeem
                .checked_add(payload.protocol_fee)
                .ok_or(CpmmError::SwapOverflow)?;
        }
    }

    let user = Holder::Wallet(signer.clone());
    require_balance(&adapter, &in_mint, &user, amount)?;
    deposit(&adapter, &in_mint, &user, &vault_holder(env, &in_vault), amount, net_in)?;
    adapter.create_account_idempotent(&out_mint, &user);
    adapter.transfer(&out_mint, &vault_holder(env, &out_vault), &user, &payload.amount_out);

    pool.apply_swap(&payload);
    write_record(env, &pool_address, &Record::Pool(pool));

    emit_swap(
        env,
        &pool_address,
        &signer,
        direction,
        net_in,
        payload.amount_out,
        payload.protocol_fee,
    );

    Ok(payload.amount_out)
}

/// Expected output of a swap with the pool's current state and fee rates
pub fn quote_swap(
    env: &Env,
    pool_address: BytesN<32>,
    amount: u64,
    direction: SwapDirection,
) -> Result<u64, CpmmError> {
    let pool = load_pool(env, &pool_address)?;
    pool.require_launched()?;
    let fee_config = load_fee_config(env, &pool.fee_config)?;

    let in_mint = match direction {
        SwapDirection::BaseToQuote => &pool.base_mint,
        SwapDirection::QuoteToBase => &pool.quote_mint,
    };
    let net_in = adapter_client(env)?.mint_info(in_mint).net_amount(amount)?;

    let payload = pool
        .curve_state()
        .quote_swap(net_in, direction, fee_config.rates())?;
    Ok(payload.amount_out)
}

// ============================================================
// PROTOCOL FEES
// ============================================================

/// Pays accrued protocol fees to the fee authority. Anyone may trigger it.
pub fn collect_fees(
    env: &Env,
    signer: Address,
    pool_address: BytesN<32>,
) -> Result<(u64, u64), CpmmError> {
    signer.require_auth();

    let mut pool = load_pool(env, &pool_address)?;
    pool.require_launched()?;
    let fee_config = load_fee_config(env, &pool.fee_config)?;

    let base_fees = pool.protocol_base_fees_to_redeem;
    let quote_fees = pool.protocol_quote_fees_to_redeem;

    let adapter = adapter_client(env)?;
    let recipient = Holder::Wallet(fee_config.fee_authority.clone());

    if base_fees > 0 {
        let base_vault = vault_holder(env, &pool.base_vault.address()?);
        adapter.create_account_idempotent(&pool.base_mint, &recipient);
        adapter.transfer(&pool.base_mint, &base_vault, &recipient, &base_fees);
    }
    if quote_fees > 0 {
        let quote_vault = vault_holder(env, &pool.quote_vault.address()?);
        adapter.create_account_idempotent(&pool.quote_mint, &recipient);
        adapter.transfer(&pool.quote_mint, &quote_vault, &recipient, &quote_fees);
    }

    pool.protocol_base_fees_to_redeem = 0;
    pool.protocol_quote_fees_to_redeem = 0;
    write_record(env, &pool_address, &Record::Pool(pool));

    emit_fees_collected(env, &pool_address, &fee_config.fee_authority, base_fees, quote_fees);

    Ok((base_fees, quote_fees))
}

// ============================================================
// INTERNAL HELPERS
// ============================================================

fn adapter_client(env: &Env) -> Result<TokenAdapterClient<'_>, CpmmError> {
    let program = read_program_config(env)?;
    Ok(TokenAdapterClient::new(env, &program.token_adapter))
}

fn vault_holder(env: &Env, vault: &BytesN<32>) -> Holder {
    Holder::Vault(env.current_contract_address(), vault.clone())
}

/// Derives the vault of `mint` for `pool` and makes sure its account exists
fn open_vault(
    env: &Env,
    adapter: &TokenAdapterClient,
    pool: &BytesN<32>,
    mint: &Address,
) -> Result<BytesN<32>, CpmmError> {
    let derived = vault_address(env, pool, mint)?;
    adapter.create_account_idempotent(mint, &vault_holder(env, &derived.address));
    Ok(derived.address)
}

fn require_balance(
    adapter: &TokenAdapterClient,
    mint: &Address,
    holder: &Holder,
    amount: u64,
) -> Result<(), CpmmError> {
    if adapter.balance(mint, holder) < amount {
        return Err(CpmmError::InsufficientBalanceForTransfer);
    }
    Ok(())
}

/// Moves `gross` in and checks the credited amount against the prediction
fn deposit(
    adapter: &TokenAdapterClient,
    mint: &Address,
    from: &Holder,
    to: &Holder,
    gross: u64,
    expected_net: u64,
) -> Result<(), CpmmError> {
    let net = adapter.transfer(mint, from, to, &gross);
    if net != expected_net {
        return Err(CpmmError::TransferNetAmountMismatch);
    }
    Ok(())
}
