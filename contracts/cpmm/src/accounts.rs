//! Derived addresses and typed record resolution.
//!
//! Every record lives under `sha256(program ‖ seed ‖ key ‖ bump)`. A
//! candidate digest is accepted only when its high bit is clear; the
//! canonical bump is the highest one that yields such a digest.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::constants::{FEE_CONFIG_SEED, MAX_BUMP, POOL_SEED, REGISTRY_SEED, VAULT_SEED};
use crate::error::CpmmError;
use crate::storage::read_record;
use crate::types::{AccountKind, ConfigRegistry, FeeConfig, Pool, Record};

// ============================================================
// DERIVATION
// ============================================================

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DerivedAddress {
    pub address: BytesN<32>,
    pub bump: u32,
}

/// Address for an explicit bump, `None` if the digest is not acceptable
pub fn create_address(env: &Env, seed: &[u8], key: &Bytes, bump: u32) -> Option<BytesN<32>> {
    if bump > MAX_BUMP {
        return None;
    }
    let mut data = env.current_contract_address().to_xdr(env);
    data.append(&Bytes::from_slice(env, seed));
    data.append(key);
    data.push_back(bump as u8);

    let digest: BytesN<32> = env.crypto().sha256(&data).into();
    if digest.to_array()[0] & 0x80 != 0 {
        return None;
    }
    Some(digest)
}

pub fn find_address(env: &Env, seed: &[u8], key: &Bytes) -> Result<DerivedAddress, CpmmError> {
    for bump in (0..=MAX_BUMP).rev() {
        if let Some(address) = create_address(env, seed, key, bump) {
            return Ok(DerivedAddress { address, bump });
        }
    }
    Err(CpmmError::AddressDerivationFailed)
}

fn rederives(env: &Env, seed: &[u8], key: &Bytes, bump: u32, address: &BytesN<32>) -> bool {
    create_address(env, seed, key, bump).as_ref() == Some(address)
}

// ============================================================
// KEYS
// ============================================================

pub fn registry_key(env: &Env) -> Bytes {
    Bytes::new(env)
}

pub fn fee_config_key(env: &Env, id: u64) -> Bytes {
    Bytes::from_array(env, &id.to_le_bytes())
}

pub fn pool_key(env: &Env, lp_mint: &Address) -> Bytes {
    lp_mint.clone().to_xdr(env)
}

pub fn vault_key(env: &Env, pool: &BytesN<32>, mint: &Address) -> Bytes {
    let mut key = Bytes::from_array(env, &pool.to_array());
    key.append(&mint.clone().to_xdr(env));
    key
}

pub fn registry_address(env: &Env) -> Result<DerivedAddress, CpmmError> {
    find_address(env, REGISTRY_SEED, &registry_key(env))
}

pub fn fee_config_address(env: &Env, id: u64) -> Result<DerivedAddress, CpmmError> {
    find_address(env, FEE_CONFIG_SEED, &fee_config_key(env, id))
}

pub fn pool_address(env: &Env, lp_mint: &Address) -> Result<DerivedAddress, CpmmError> {
    find_address(env, POOL_SEED, &pool_key(env, lp_mint))
}

pub fn vault_address(env: &Env, pool: &BytesN<32>, mint: &Address) -> Result<DerivedAddress, CpmmError> {
    find_address(env, VAULT_SEED, &vault_key(env, pool, mint))
}

// ============================================================
// RESOLUTION
// ============================================================

/// A reference passed into the program, resolved by what is stored there
#[derive(Clone, Debug)]
pub enum Account {
    Registry(ConfigRegistry),
    FeeConfig(FeeConfig),
    Pool(Pool),
    Unknown,
}

impl Account {
    /// Resolves `address`. A record whose address does not re-derive from
    /// its own key and bump resolves to `Unknown`.
    pub fn resolve(env: &Env, address: &BytesN<32>) -> Self {
        match read_record(env, address) {
            Some(Record::Registry(registry))
                if rederives(env, REGISTRY_SEED, &registry_key(env), registry.bump, address) =>
            {
                Account::Registry(registry)
            }
            Some(Record::FeeConfig(config))
                if rederives(
                    env,
                    FEE_CONFIG_SEED,
                    &fee_config_key(env, config.id),
                    config.bump,
                    address,
                ) =>
            {
                Account::FeeConfig(config)
            }
            Some(Record::Pool(pool))
                if rederives(env, POOL_SEED, &pool_key(env, &pool.lp_mint), pool.bump, address) =>
            {
                Account::Pool(pool)
            }
            _ => Account::Unknown,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Registry(_) => AccountKind::Registry,
            Account::FeeConfig(_) => AccountKind::FeeConfig,
            Account::Pool(_) => AccountKind::Pool,
            Account::Unknown => AccountKind::Unknown,
        }
    }
}

pub fn load_registry(env: &Env, address: &BytesN<32>) -> Result<ConfigRegistry, CpmmError> {
    match Account::resolve(env, address) {
        Account::Registry(registry) => Ok(registry),
        _ => Err(CpmmError::InvalidRegistry),
    }
}

pub fn load_fee_config(env: &Env, address: &BytesN<32>) -> Result<FeeConfig, CpmmError> {
    match Account::resolve(env, address) {
        Account::FeeConfig(config) => Ok(config),
        _ => Err(CpmmError::InvalidFeeConfig),
    }
}

/// Fee config that must belong to `registry`
pub fn load_owned_fee_config(
    env: &Env,
    registry: &BytesN<32>,
    address: &BytesN<32>,
) -> Result<FeeConfig, CpmmError> {
    let config = load_fee_config(env, address)?;
    if config.registry != *registry {
        return Err(CpmmError::FeeConfigRegistryMismatch);
    }
    Ok(config)
}

pub fn load_pool(env: &Env, address: &BytesN<32>) -> Result<Pool, CpmmError> {
    match Account::resolve(env, address) {
        Account::Pool(pool) => Ok(pool),
        _ => Err(CpmmError::InvalidPool),
    }
}
