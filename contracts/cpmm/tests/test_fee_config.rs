mod common;

use cpmm::{AccountKind, CpmmError};
use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, Address, BytesN, Env};

#[test]
fn test_initialize_fee_config() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let fee_authority = Address::generate(&env);

    let config = ctx
        .client
        .initialize_fee_config(&ctx.authority, &registry, &fee_authority, &5, &25);

    assert_eq!(config, ctx.client.fee_config_address(&0));
    assert_eq!(ctx.client.account_kind(&config), AccountKind::FeeConfig);

    let state = ctx.client.get_fee_config(&config).unwrap();
    assert_eq!(state.id, 0);
    assert_eq!(state.registry, registry);
    assert_eq!(state.fee_authority, fee_authority);
    assert_eq!(state.protocol_fee_rate_bps, 5);
    assert_eq!(state.providers_fee_rate_bps, 25);

    assert_eq!(ctx.client.get_registry().unwrap().configs_count, 1);
}

#[test]
fn test_fee_config_ids_are_sequential() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);

    let (first, _) = ctx.fee_config(&registry, 5, 25);
    let fee_authority = Address::generate(&env);
    let second = ctx
        .client
        .initialize_fee_config(&ctx.deployer, &registry, &fee_authority, &0, &100);

    assert_ne!(first, second);
    assert_eq!(second, ctx.client.fee_config_address(&1));
    assert_eq!(ctx.client.get_fee_config(&second).unwrap().id, 1);
    assert_eq!(ctx.client.get_registry().unwrap().configs_count, 2);
}

#[test]
fn test_initialize_fee_config_by_stranger_fails() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let stranger = Address::generate(&env);

    let result = ctx
        .client
        .try_initialize_fee_config(&stranger, &registry, &stranger, &5, &25);
    assert_eq!(result, Err(Ok(CpmmError::Unauthorized)));
    assert_eq!(ctx.client.get_registry().unwrap().configs_count, 0);
}

#[test]
fn test_fee_rate_bound_at_creation() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let fee_authority = Address::generate(&env);

    let result = ctx
        .client
        .try_initialize_fee_config(&ctx.authority, &registry, &fee_authority, &5_001, &5_000);
    assert_eq!(result, Err(Ok(CpmmError::FeeRateExceeded)));
    assert_eq!(ctx.client.get_registry().unwrap().configs_count, 0);

    // Exactly 100% is allowed
    let config = ctx
        .client
        .initialize_fee_config(&ctx.authority, &registry, &fee_authority, &10_000, &0);
    assert_eq!(ctx.client.get_fee_config(&config).unwrap().protocol_fee_rate_bps, 10_000);
}

#[test]
fn test_registry_argument_must_be_registry() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let (config, fee_authority) = ctx.fee_config(&registry, 5, 25);

    // A fee config passed where a registry is expected
    let result = ctx
        .client
        .try_initialize_fee_config(&ctx.authority, &config, &fee_authority, &5, &25);
    assert_eq!(result, Err(Ok(CpmmError::InvalidRegistry)));

    // An address with nothing stored
    let empty = BytesN::from_array(&env, &[7u8; 32]);
    let result = ctx
        .client
        .try_initialize_fee_config(&ctx.authority, &empty, &fee_authority, &5, &25);
    assert_eq!(result, Err(Ok(CpmmError::InvalidRegistry)));
}

// ============================================================
// UPDATES
// ============================================================

#[test]
fn test_update_fee_authority() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let (config, _) = ctx.fee_config(&registry, 5, 25);
    let new_fee_authority = Address::generate(&env);

    ctx.client
        .update_fee_authority(&ctx.authority, &registry, &config, &new_fee_authority);

    let state = ctx.client.get_fee_config(&config).unwrap();
    assert_eq!(state.fee_authority, new_fee_authority);
    assert_eq!(state.protocol_fee_rate_bps, 5);
    assert_eq!(state.providers_fee_rate_bps, 25);
    assert_eq!(state.id, 0);
}

#[test]
fn test_update_protocol_fee_rate() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let (config, fee_authority) = ctx.fee_config(&registry, 20, 30);

    ctx.client
        .update_protocol_fee_rate(&ctx.deployer, &registry, &config, &9_970);

    let state = ctx.client.get_fee_config(&config).unwrap();
    assert_eq!(state.protocol_fee_rate_bps, 9_970);
    assert_eq!(state.providers_fee_rate_bps, 30);
    assert_eq!(state.fee_authority, fee_authority);

    // Bound is checked against the unchanged providers rate
    let result = ctx
        .client
        .try_update_protocol_fee_rate(&ctx.deployer, &registry, &config, &9_971);
    assert_eq!(result, Err(Ok(CpmmError::FeeRateExceeded)));
    assert_eq!(ctx.client.get_fee_config(&config).unwrap().protocol_fee_rate_bps, 9_970);
}

#[test]
fn test_update_providers_fee_rate() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let (config, _) = ctx.fee_config(&registry, 20, 30);

    ctx.client
        .update_providers_fee_rate(&ctx.authority, &registry, &config, &9_980);
    assert_eq!(ctx.client.get_fee_config(&config).unwrap().providers_fee_rate_bps, 9_980);

    let result = ctx
        .client
        .try_update_providers_fee_rate(&ctx.authority, &registry, &config, &9_981);
    assert_eq!(result, Err(Ok(CpmmError::FeeRateExceeded)));
}

#[test]
fn test_update_by_stranger_fails() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let (config, _) = ctx.fee_config(&registry, 5, 25);
    let stranger = Address::generate(&env);

    assert_eq!(
        ctx.client
            .try_update_fee_authority(&stranger, &registry, &config, &stranger),
        Err(Ok(CpmmError::Unauthorized))
    );
    assert_eq!(
        ctx.client
            .try_update_protocol_fee_rate(&stranger, &registry, &config, &1),
        Err(Ok(CpmmError::Unauthorized))
    );
    assert_eq!(
        ctx.client
            .try_update_providers_fee_rate(&stranger, &registry, &config, &1),
        Err(Ok(CpmmError::Unauthorized))
    );
}

#[test]
fn test_update_rejects_substituted_config() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);

    // The registry itself passed as the config
    let result = ctx
        .client
        .try_update_protocol_fee_rate(&ctx.authority, &registry, &registry, &1);
    assert_eq!(result, Err(Ok(CpmmError::InvalidFeeConfig)));

    let missing = ctx.client.fee_config_address(&3);
    let result = ctx
        .client
        .try_update_providers_fee_rate(&ctx.authority, &registry, &missing, &1);
    assert_eq!(result, Err(Ok(CpmmError::InvalidFeeConfig)));
}

#[test]
#[should_panic]
fn test_update_fee_rate_requires_auth() {
    let env = Env::default();
    let (ctx, registry) = common::setup(&env);
    let (config, _) = ctx.fee_config(&registry, 5, 25);

    env.mock_auths(&[]);
    ctx.client
        .update_protocol_fee_rate(&ctx.authority, &registry, &config, &10);
}

// ============================================================
// PROPERTY TESTS
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: creation succeeds iff protocol + providers <= 10_000,
    /// and a successful creation persists exactly the requested rates
    #[test]
    fn prop_fee_rate_bound_at_creation(protocol in 0u32..12_000, providers in 0u32..12_000) {
        let env = Env::default();
        let (ctx, registry) = common::setup(&env);
        let fee_authority = Address::generate(&env);

        let result = ctx
            .client
            .try_initialize_fee_config(&ctx.authority, &registry, &fee_authority, &protocol, &providers);

        if protocol + providers > 10_000 {
            prop_assert_eq!(result, Err(Ok(CpmmError::FeeRateExceeded)));
        } else {
            let config = result.unwrap().unwrap();
            let state = ctx.client.get_fee_config(&config).unwrap();
            prop_assert_eq!(state.protocol_fee_rate_bps, protocol);
            prop_assert_eq!(state.providers_fee_rate_bps, providers);
        }
    }

    /// Property: a rate update succeeds iff the new combined rate is <= 10_000
    #[test]
    fn prop_fee_rate_bound_on_update(providers in 0u32..=10_000, new_protocol in 0u32..12_000) {
        let env = Env::default();
        let (ctx, registry) = common::setup(&env);
        let (config, _) = ctx.fee_config(&registry, 0, providers);

        let result = ctx
            .client
            .try_update_protocol_fee_rate(&ctx.authority, &registry, &config, &new_protocol);
        let state = ctx.client.get_fee_config(&config).unwrap();

        if providers + new_protocol > 10_000 {
            prop_assert_eq!(result, Err(Ok(CpmmError::FeeRateExceeded)));
            prop_assert_eq!(state.protocol_fee_rate_bps, 0);
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(state.protocol_fee_rate_bps, new_protocol);
        }
        prop_assert_eq!(state.providers_fee_rate_bps, providers);
    }
}
