use cpmm_curve::FEE_MAX_BASIS_POINTS;

use crate::adapter::{MintExtension, MintInfo};
use crate::error::CpmmError;

/// Extensions that only affect amounts or metadata, never control of funds
const ALLOWED_EXTENSIONS: [MintExtension; 11] = [
    MintExtension::TransferFeeConfig,
    MintExtension::ImmutableOwner,
    MintExtension::MemoTransfer,
    MintExtension::InterestBearingConfig,
    MintExtension::TransferHook,
    MintExtension::MetadataPointer,
    MintExtension::TokenMetadata,
    MintExtension::GroupPointer,
    MintExtension::TokenGroup,
    MintExtension::GroupMemberPointer,
    MintExtension::TokenGroupMember,
];

pub fn validate_tradable_mint(info: &MintInfo) -> Result<(), CpmmError> {
    if info.freeze_authority.is_some() {
        return Err(CpmmError::MintHasFreezeAuthority);
    }
    for extension in info.extensions.iter() {
        if !ALLOWED_EXTENSIONS.contains(&extension) {
            return Err(CpmmError::UnsupportedMintExtension);
        }
    }
    Ok(())
}

/// Combined protocol and providers rate must not exceed 100%
pub fn validate_fee_rates(
    protocol_fee_rate_bps: u32,
    providers_fee_rate_bps: u32,
) -> Result<(), CpmmError> {
    let combined = protocol_fee_rate_bps
        .checked_add(providers_fee_rate_bps)
        .ok_or(CpmmError::FeeRateExceeded)?;
    if combined > FEE_MAX_BASIS_POINTS {
        return Err(CpmmError::FeeRateExceeded);
    }
    Ok(())
}
