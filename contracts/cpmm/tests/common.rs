#![allow(dead_code)]

use cpmm::{
    Cpmm, CpmmClient, Holder, MintExtension, MintInfo, TokenAdapter, TransferFee,
    POOL_CREATION_FEE, POOL_RENT_RESERVE,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, testutils::Address as _, token::StellarAssetClient, vec,
    Address, BytesN, Env, Vec,
};

// ============================================================
// MOCK TOKEN ADAPTER
// ============================================================

#[contracttype]
#[derive(Clone)]
pub enum MockKey {
    Mint(Address),
    Balance(Address, Holder),
    Account(Address, Holder),
}

/// In-memory token program: mints with metadata, balances per holder,
/// and transfer fees deducted from the credited amount.
#[contract]
pub struct MockTokenAdapter;

fn read_mint(env: &Env, mint: &Address) -> MintInfo {
    env.storage()
        .persistent()
        .get(&MockKey::Mint(mint.clone()))
        .expect("unknown mint")
}

fn write_mint(env: &Env, mint: &Address, info: &MintInfo) {
    env.storage().persistent().set(&MockKey::Mint(mint.clone()), info);
}

fn read_balance(env: &Env, mint: &Address, holder: &Holder) -> u64 {
    env.storage()
        .persistent()
        .get(&MockKey::Balance(mint.clone(), holder.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, mint: &Address, holder: &Holder, amount: u64) {
    env.storage()
        .persistent()
        .set(&MockKey::Balance(mint.clone(), holder.clone()), &amount);
}

fn authorize(holder: &Holder) {
    match holder {
        Holder::Wallet(owner) => owner.require_auth(),
        Holder::Vault(owner, _) => owner.require_auth(),
    }
}

fn debit(env: &Env, mint: &Address, holder: &Holder, amount: u64) {
    let balance = read_balance(env, mint, holder);
    let rest = balance.checked_sub(amount).expect("insufficient balance");
    write_balance(env, mint, holder, rest);
}

fn add(env: &Env, mint: &Address, holder: &Holder, amount: u64) {
    let balance = read_balance(env, mint, holder);
    write_balance(env, mint, holder, balance + amount);
}

#[contractimpl]
impl TokenAdapter for MockTokenAdapter {
    fn mint_info(env: Env, mint: Address) -> MintInfo {
        read_mint(&env, &mint)
    }

    fn initialize_mint(env: Env, mint: Address, decimals: u32, mint_authority: Address) {
        if env.storage().persistent().has(&MockKey::Mint(mint.clone())) {
            panic!("mint already initialized");
        }
        let info = MintInfo {
            decimals,
            mint_authority: Some(mint_authority),
            freeze_authority: None,
            extensions: Vec::new(&env),
            transfer_fee: None,
            supply: 0,
        };
        write_mint(&env, &mint, &info);
    }

    fn create_account_idempotent(env: Env, mint: Address, holder: Holder) {
        env.storage()
            .persistent()
            .set(&MockKey::Account(mint, holder), &true);
    }

    fn balance(env: Env, mint: Address, holder: Holder) -> u64 {
        read_balance(&env, &mint, &holder)
    }

    fn transfer(env: Env, mint: Address, from: Holder, to: Holder, amount: u64) -> u64 {
        authorize(&from);
        let info = read_mint(&env, &mint);
        let fee = match &info.transfer_fee {
            Some(schedule) => schedule.fee(amount).expect("fee overflow"),
            None => 0,
        };
        debit(&env, &mint, &from, amount);
        let net = amount - fee;
        add(&env, &mint, &to, net);
        net
    }

    fn mint_to(env: Env, mint: Address, to: Holder, amount: u64) {
        let mut info = read_mint(&env, &mint);
        if let Some(authority) = &info.mint_authority {
            authority.require_auth();
        }
        info.supply += amount;
        write_mint(&env, &mint, &info);
        add(&env, &mint, &to, amount);
    }

    fn burn_from(env: Env, mint: Address, from: Holder, amount: u64) {
        authorize(&from);
        let mut info = read_mint(&env, &mint);
        debit(&env, &mint, &from, amount);
        info.supply -= amount;
        write_mint(&env, &mint, &info);
    }
}

#[contractimpl]
impl MockTokenAdapter {
    pub fn create_mint(env: Env, mint: Address, info: MintInfo) {
        write_mint(&env, &mint, &info);
    }

    /// Test faucet, bypasses mint authority
    pub fn credit(env: Env, mint: Address, holder: Holder, amount: u64) {
        add(&env, &mint, &holder, amount);
    }

    pub fn has_account(env: Env, mint: Address, holder: Holder) -> bool {
        env.storage().persistent().has(&MockKey::Account(mint, holder))
    }
}

// ============================================================
// MINT PRESETS
// ============================================================

pub fn plain_mint(env: &Env, decimals: u32) -> MintInfo {
    MintInfo {
        decimals,
        mint_authority: Some(Address::generate(env)),
        freeze_authority: None,
        extensions: Vec::new(env),
        transfer_fee: None,
        supply: 0,
    }
}

pub fn fee_mint(env: &Env, decimals: u32, fee_basis_points: u32, maximum_fee: u64) -> MintInfo {
    MintInfo {
        decimals,
        mint_authority: Some(Address::generate(env)),
        freeze_authority: None,
        extensions: vec![env, MintExtension::TransferFeeConfig],
        transfer_fee: Some(TransferFee {
            fee_basis_points,
            maximum_fee,
        }),
        supply: 0,
    }
}

pub fn wallet(owner: &Address) -> Holder {
    Holder::Wallet(owner.clone())
}

// ============================================================
// PROGRAM SETUP
// ============================================================

pub struct TestContext<'a> {
    pub env: Env,
    pub client: CpmmClient<'a>,
    pub adapter: MockTokenAdapterClient<'a>,
    pub native: Address,
    pub deployer: Address,
    pub authority: Address,
}

/// Deployed program without a registry
pub fn setup_program(env: &Env) -> TestContext<'_> {
    env.mock_all_auths();

    let deployer = Address::generate(env);
    let authority = Address::generate(env);

    let adapter_id = env.register(MockTokenAdapter, ());
    let native_admin = Address::generate(env);
    let native = env.register_stellar_asset_contract_v2(native_admin).address();

    let cpmm_id = env.register(Cpmm, (deployer.clone(), adapter_id.clone(), native.clone()));

    TestContext {
        env: env.clone(),
        client: CpmmClient::new(env, &cpmm_id),
        adapter: MockTokenAdapterClient::new(env, &adapter_id),
        native,
        deployer,
        authority,
    }
}

/// Deployed program with its registry; head authority is the deployer
pub fn setup(env: &Env) -> (TestContext<'_>, BytesN<32>) {
    let ctx = setup_program(env);
    let registry = ctx
        .client
        .initialize_registry(&ctx.deployer, &ctx.deployer, &ctx.authority);
    (ctx, registry)
}

impl<'a> TestContext<'a> {
    pub fn create_mint(&self, info: &MintInfo) -> Address {
        let mint = Address::generate(&self.env);
        self.adapter.create_mint(&mint, info);
        mint
    }

    pub fn fee_config(&self, registry: &BytesN<32>, protocol_bps: u32, providers_bps: u32) -> (BytesN<32>, Address) {
        let fee_authority = Address::generate(&self.env);
        let config = self.client.initialize_fee_config(
            &self.authority,
            registry,
            &fee_authority,
            &protocol_bps,
            &providers_bps,
        );
        (config, fee_authority)
    }

    pub fn fund_native(&self, who: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.native).mint(who, &amount);
    }

    pub fn credit(&self, mint: &Address, owner: &Address, amount: u64) {
        self.adapter.credit(mint, &wallet(owner), &amount);
    }

    pub fn balance(&self, mint: &Address, owner: &Address) -> u64 {
        self.adapter.balance(mint, &wallet(owner))
    }

    pub fn vault_balance(&self, mint: &Address, vault: &BytesN<32>) -> u64 {
        self.adapter
            .balance(mint, &Holder::Vault(self.client.address.clone(), vault.clone()))
    }
}

// ============================================================
// POOL SETUP
// ============================================================

pub struct PoolSetup {
    pub pool: BytesN<32>,
    pub fee_config: BytesN<32>,
    pub fee_authority: Address,
    pub creator: Address,
    pub base_mint: Address,
    pub quote_mint: Address,
    pub lp_mint: Address,
}

/// Initialized (not launched) pool over fresh mints
pub fn setup_pool(
    ctx: &TestContext,
    registry: &BytesN<32>,
    base_info: &MintInfo,
    quote_info: &MintInfo,
    protocol_bps: u32,
    providers_bps: u32,
) -> PoolSetup {
    let (fee_config, fee_authority) = ctx.fee_config(registry, protocol_bps, providers_bps);
    let base_mint = ctx.create_mint(base_info);
    let quote_mint = ctx.create_mint(quote_info);
    let lp_mint = Address::generate(&ctx.env);

    let creator = Address::generate(&ctx.env);
    ctx.fund_native(&creator, POOL_CREATION_FEE + POOL_RENT_RESERVE);

    let pool = ctx.client.initialize_pool(
        &creator,
        &fee_config,
        &fee_authority,
        &base_mint,
        &quote_mint,
        &lp_mint,
    );

    PoolSetup {
        pool,
        fee_config,
        fee_authority,
        creator,
        base_mint,
        quote_mint,
        lp_mint,
    }
}

/// Launched pool over plain mints, seeded by its creator
pub fn launched_pool(
    ctx: &TestContext,
    registry: &BytesN<32>,
    base_liquidity: u64,
    quote_liquidity: u64,
    protocol_bps: u32,
    providers_bps: u32,
) -> PoolSetup {
    let setup = setup_pool(
        ctx,
        registry,
        &plain_mint(&ctx.env, 6),
        &plain_mint(&ctx.env, 6),
        protocol_bps,
        providers_bps,
    );
    ctx.credit(&setup.base_mint, &setup.creator, base_liquidity);
    ctx.credit(&setup.quote_mint, &setup.creator, quote_liquidity);
    ctx.client
        .launch(&setup.creator, &setup.pool, &base_liquidity, &quote_liquidity);
    setup
}

pub fn isqrt_u128(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}
