//! Config registry and fee config governance.
//!
//! The registry is a one-shot singleton holding the governance pair.
//! Fee configs are numbered from the registry counter and carry the
//! address of their parent registry.

use soroban_sdk::{Address, BytesN, Env};

use crate::accounts::{self, fee_config_address, load_owned_fee_config, load_registry};
use crate::error::CpmmError;
use crate::events::*;
use crate::storage::{has_record, read_program_config, write_record};
use crate::types::{ConfigRegistry, FeeConfig, Record};
use crate::validation::validate_fee_rates;

// ============================================================
// REGISTRY
// ============================================================

pub fn initialize_registry(
    env: &Env,
    signer: Address,
    head_authority: Address,
    authority: Address,
) -> Result<BytesN<32>, CpmmError> {
    signer.require_auth();

    let program = read_program_config(env)?;
    if signer != program.deployer {
        return Err(CpmmError::NotPrivilegedDeployer);
    }
    if head_authority != signer {
        return Err(CpmmError::HeadAuthorityMismatch);
    }

    let derived = accounts::registry_address(env)?;
    if has_record(env, &derived.address) {
        return Err(CpmmError::RegistryAlreadyInitialized);
    }

    let registry = ConfigRegistry {
        authority: authority.clone(),
        head_authority: head_authority.clone(),
        configs_count: 0,
        bump: derived.bump,
    };
    write_record(env, &derived.address, &Record::Registry(registry));

    emit_registry_initialized(env, &derived.address, &head_authority, &authority);

    Ok(derived.address)
}

/// Callable by the authority or the head authority
pub fn update_authority(env: &Env, caller: Address, new_authority: Address) -> Result<(), CpmmError> {
    caller.require_auth();

    let address = accounts::registry_address(env)?.address;
    let mut registry = load_registry(env, &address)?;
    registry.require_governor(&caller)?;

    emit_authority_updated(env, &registry.authority, &new_authority);

    registry.authority = new_authority;
    write_record(env, &address, &Record::Registry(registry));
    Ok(())
}

/// Callable by the head authority only
pub fn update_head_authority(
    env: &Env,
    caller: Address,
    new_head_authority: Address,
) -> Result<(), CpmmError> {
    caller.require_auth();

    let address = accounts::registry_address(env)?.address;
    let mut registry = load_registry(env, &address)?;
    registry.require_head(&caller)?;

    emit_head_authority_updated(env, &registry.head_authority, &new_head_authority);

    registry.head_authority = new_head_authority;
    write_record(env, &address, &Record::Registry(registry));
    Ok(())
}

// ============================================================
// FEE CONFIGS
// ============================================================

pub fn initialize_fee_config(
    env: &Env,
    caller: Address,
    registry_address: BytesN<32>,
    fee_authority: Address,
    protocol_fee_rate_bps: u32,
    providers_fee_rate_bps: u32,
) -> Result<BytesN<32>, CpmmError> {
    caller.require_auth();

    let mut registry = load_registry(env, &registry_address)?;
    registry.require_governor(&caller)?;
    validate_fee_rates(protocol_fee_rate_bps, providers_fee_rate_bps)?;

    let id = registry.configs_count;
    let derived = fee_config_address(env, id)?;
    if has_record(env, &derived.address) {
        return Err(CpmmError::FeeConfigAlreadyInitialized);
    }

    registry.configs_count = id.checked_add(1).ok_or(CpmmError::ConfigsCountOverflow)?;

    let config = FeeConfig {
        id,
        registry: registry_address.clone(),
        fee_authority: fee_authority.clone(),
        protocol_fee_rate_bps,
        providers_fee_rate_bps,
        bump: derived.bump,
    };

    write_record(env, &derived.address, &Record::FeeConfig(config));
    write_record(env, &registry_address, &Record::Registry(registry));

    emit_fee_config_initialized(
        env,
        &derived.address,
        id,
        &fee_authority,
        protocol_fee_rate_bps,
        providers_fee_rate_bps,
    );

    Ok(derived.address)
}

/// Loads a fee config for mutation by a member of its registry's governance pair
fn governed_fee_config(
    env: &Env,
    caller: &Address,
    registry_address: &BytesN<32>,
    config_address: &BytesN<32>,
) -> Result<FeeConfig, CpmmError> {
    caller.require_auth();

    let registry = load_registry(env, registry_address)?;
    registry.require_governor(caller)?;
    load_owned_fee_config(env, registry_address, config_address)
}

pub fn update_fee_authority(
    env: &Env,
    caller: Address,
    registry_address: BytesN<32>,
    config_address: BytesN<32>,
    new_fee_authority: Address,
) -> Result<(), CpmmError> {
    let mut config = governed_fee_config(env, &caller, &registry_address, &config_address)?;

    config.fee_authority = new_fee_authority.clone();
    write_record(env, &config_address, &Record::FeeConfig(config));

    emit_fee_authority_updated(env, &config_address, &new_fee_authority);
    Ok(())
}

pub fn update_protocol_fee_rate(
    env: &Env,
    caller: Address,
    registry_address: BytesN<32>,
    config_address: BytesN<32>,
    new_rate_bps: u32,
) -> Result<(), CpmmError> {
    let mut config = governed_fee_config(env, &caller, &registry_address, &config_address)?;
    validate_fee_rates(new_rate_bps, config.providers_fee_rate_bps)?;

    config.protocol_fee_rate_bps = new_rate_bps;
    write_record(env, &config_address, &Record::FeeConfig(config));

    emit_protocol_fee_rate_updated(env, &config_address, new_rate_bps);
    Ok(())
}

pub fn update_providers_fee_rate(
    env: &Env,
    caller: Address,
    registry_address: BytesN<32>,
    config_address: BytesN<32>,
    new_rate_bps: u32,
) -> Result<(), CpmmError> {
    let mut config = governed_fee_config(env, &caller, &registry_address, &config_address)?;
    validate_fee_rates(config.protocol_fee_rate_bps, new_rate_bps)?;

    config.providers_fee_rate_bps = new_rate_bps;
    write_record(env, &config_address, &Record::FeeConfig(config));

    emit_providers_fee_rate_updated(env, &config_address, new_rate_bps);
    Ok(())
}
