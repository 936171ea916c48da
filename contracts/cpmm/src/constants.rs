// ============================================================
// DERIVATION SEEDS
// ============================================================

pub const REGISTRY_SEED: &[u8] = b"config_registry";
pub const FEE_CONFIG_SEED: &[u8] = b"fee_config";
pub const POOL_SEED: &[u8] = b"pool";
pub const VAULT_SEED: &[u8] = b"vault";

/// Bumps are searched from here down to zero
pub const MAX_BUMP: u32 = 255;

// ============================================================
// NATIVE FEES (stroops)
// ============================================================

/// Charged once per pool at initialization, paid to the fee authority
pub const POOL_CREATION_FEE: i128 = 100_000_000;

/// Network base reserve for a single ledger entry
pub const BASE_RESERVE: i128 = 5_000_000;

/// Pool record plus LP mint
pub const POOL_RENT_RESERVE: i128 = 2 * BASE_RESERVE;
