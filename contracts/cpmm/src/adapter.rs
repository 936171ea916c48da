//! Token adapter interface consumed by the program.
//!
//! All value movement (vault creation, transfers, LP mint and burn) goes
//! through this contract. A transfer may credit less than the gross amount
//! when the mint levies a transfer fee, so callers work with the returned
//! net amount.

use soroban_sdk::{contractclient, contracttype, Address, BytesN, Env, Vec};

use crate::error::CpmmError;

// ============================================================
// TYPES
// ============================================================

/// Owner of a token account
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Holder {
    /// Account controlled by a wallet
    Wallet(Address),
    /// Program-owned account at a derived address. Moving funds out
    /// requires the owner's authorization.
    Vault(Address, BytesN<32>),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MintExtension {
    TransferFeeConfig,
    ImmutableOwner,
    MemoTransfer,
    InterestBearingConfig,
    TransferHook,
    MetadataPointer,
    TokenMetadata,
    GroupPointer,
    TokenGroup,
    GroupMemberPointer,
    TokenGroupMember,
    PermanentDelegate,
    NonTransferable,
    DefaultAccountState,
    ConfidentialTransferMint,
    MintCloseAuthority,
    PausableConfig,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferFee {
    pub fee_basis_points: u32,
    pub maximum_fee: u64,
}

impl TransferFee {
    /// `min(floor(gross * bp / 10_000), maximum_fee)`
    pub fn fee(&self, gross: u64) -> Option<u64> {
        let raw = (gross as u128)
            .checked_mul(self.fee_basis_points as u128)?
            .checked_div(10_000)?;
        let raw = u64::try_from(raw).ok()?;
        Some(raw.min(self.maximum_fee))
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintInfo {
    pub decimals: u32,
    pub mint_authority: Option<Address>,
    pub freeze_authority: Option<Address>,
    pub extensions: Vec<MintExtension>,
    pub transfer_fee: Option<TransferFee>,
    pub supply: u64,
}

impl MintInfo {
    /// Amount credited to the receiver of a `gross` transfer
    pub fn net_amount(&self, gross: u64) -> Result<u64, CpmmError> {
        let fee = match &self.transfer_fee {
            Some(schedule) => schedule
                .fee(gross)
                .ok_or(CpmmError::TransferFeeCalculationFailed)?,
            None => 0,
        };
        gross
            .checked_sub(fee)
            .ok_or(CpmmError::TransferFeeCalculationFailed)
    }
}

// ============================================================
// CLIENT
// ============================================================

#[contractclient(name = "TokenAdapterClient")]
pub trait TokenAdapter {
    fn mint_info(env: Env, mint: Address) -> MintInfo;

    fn initialize_mint(env: Env, mint: Address, decimals: u32, mint_authority: Address);

    fn create_account_idempotent(env: Env, mint: Address, holder: Holder);

    fn balance(env: Env, mint: Address, holder: Holder) -> u64;

    /// Moves `amount` from `from` to `to`, returns the net amount credited
    fn transfer(env: Env, mint: Address, from: Holder, to: Holder, amount: u64) -> u64;

    fn mint_to(env: Env, mint: Address, to: Holder, amount: u64);

    fn burn_from(env: Env, mint: Address, from: Holder, amount: u64);
}
