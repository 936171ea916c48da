// CPMM storage module

use soroban_sdk::{contracttype, BytesN, Env};

use crate::error::CpmmError;
use crate::types::{ProgramConfig, Record};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Program,
    Record(BytesN<32>),
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

const PERSISTENT_LIFETIME: u32 = 6_307_200;
const PERSISTENT_BUMP: u32 = 6_307_200;

const INSTANCE_LIFETIME: u32 = 518_400;
const INSTANCE_BUMP: u32 = 518_400;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

// ============================================================
// PROGRAM CONFIG
// ============================================================

pub fn write_program_config(env: &Env, config: &ProgramConfig) {
    env.storage().instance().set(&DataKey::Program, config);
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME, INSTANCE_BUMP);
}

pub fn read_program_config(env: &Env) -> Result<ProgramConfig, CpmmError> {
    env.storage()
        .instance()
        .get(&DataKey::Program)
        .ok_or(CpmmError::ProgramNotConfigured)
}

// ============================================================
// RECORDS
// ============================================================

pub fn has_record(env: &Env, address: &BytesN<32>) -> bool {
    env.storage().persistent().has(&DataKey::Record(address.clone()))
}

pub fn read_record(env: &Env, address: &BytesN<32>) -> Option<Record> {
    env.storage().persistent().get(&DataKey::Record(address.clone()))
}

pub fn write_record(env: &Env, address: &BytesN<32>, record: &Record) {
    let key = DataKey::Record(address.clone());
    env.storage().persistent().set(&key, record);
    extend_ttl(env, &key);
}
