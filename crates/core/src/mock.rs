//! In-memory lending deployment for facade tests.
//!
//! Every collaborator call is logged as `(target, method)` with the
//! contract method name, and any method can be made to fail.

use alloy::primitives::{address, Address, U256};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use lendview_chain::{
    IncentiveAssetData, IncentivesService, LoanLedger, LoanRisk, NftConfiguration, NftRecord,
    PoolLedger, PriceOracle, RateCurve, Registry, ReserveConfiguration, ReserveRecord, Resolver,
    ScaledToken, StateSource, TokenBalance, TokenMetadata,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const REGISTRY: Address = address!("0101010101010101010101010101010101010101");
pub const POOL: Address = address!("0202020202020202020202020202020202020202");
pub const LOAN_LEDGER: Address = address!("0303030303030303030303030303030303030303");
pub const RESERVE_ORACLE: Address = address!("0404040404040404040404040404040404040404");
pub const NFT_ORACLE: Address = address!("0505050505050505050505050505050505050505");
pub const INCENTIVES: Address = address!("0606060606060606060606060606060606060606");
pub const OTHER_POOL: Address = address!("0707070707070707070707070707070707070707");

pub const WETH: Address = address!("1010101010101010101010101010101010101010");
pub const WETH_B_TOKEN: Address = address!("1111111111111111111111111111111111111111");
pub const WETH_DEBT_TOKEN: Address = address!("1212121212121212121212121212121212121212");
pub const WETH_RATE: Address = address!("1313131313131313131313131313131313131313");

pub const USDC: Address = address!("2020202020202020202020202020202020202020");
pub const USDC_B_TOKEN: Address = address!("2121212121212121212121212121212121212121");
pub const USDC_DEBT_TOKEN: Address = address!("2222222222222222222222222222222222222222");
pub const USDC_RATE: Address = address!("2323232323232323232323232323232323232323");

pub const PUNKS: Address = address!("3030303030303030303030303030303030303030");
pub const PUNKS_B_NFT: Address = address!("3131313131313131313131313131313131313131");
pub const APES: Address = address!("4040404040404040404040404040404040404040");
pub const APES_B_NFT: Address = address!("4141414141414141414141414141414141414141");

pub const USER: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

pub const DISTRIBUTION_END: u64 = 1_900_000_000;

/// One logged collaborator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub target: Address,
    pub method: &'static str,
}

#[derive(Debug, Default)]
struct MockState {
    /// registry -> (pool ledger, loan ledger)
    ledgers: DashMap<Address, (Address, Address)>,
    reserves: DashMap<Address, Vec<(Address, ReserveRecord)>>,
    nfts: DashMap<Address, Vec<(Address, NftRecord)>>,
    /// (pool, nft asset, token id)
    loans: DashMap<(Address, Address, U256), LoanRisk>,
    /// (oracle, asset)
    prices: DashMap<(Address, Address), U256>,
    /// token -> (symbol, name)
    metadata: DashMap<Address, (String, String)>,
    /// (token, owner)
    balances: DashMap<(Address, Address), U256>,
    /// (token, owner)
    scaled_balances: DashMap<(Address, Address), U256>,
    scaled_supplies: DashMap<Address, U256>,
    slopes: DashMap<Address, (U256, U256)>,
    /// (loan ledger, nft asset)
    nft_collateral: DashMap<(Address, Address), U256>,
    /// (loan ledger, user, nft asset)
    user_nft_collateral: DashMap<(Address, Address, Address), U256>,
    /// (controller, token)
    incentive_assets: DashMap<(Address, Address), IncentiveAssetData>,
    /// (controller, user, token)
    user_indices: DashMap<(Address, Address, Address), U256>,
    /// (controller, user)
    unclaimed: DashMap<(Address, Address), U256>,
    distribution_end: DashMap<Address, U256>,

    calls: Mutex<Vec<Call>>,
    pins: AtomicUsize,
    failing: Mutex<Option<&'static str>>,
}

/// Shared handle to an in-memory deployment.
#[derive(Debug, Clone, Default)]
pub struct MockChain {
    state: Arc<MockState>,
}

pub fn weth_record() -> ReserveRecord {
    ReserveRecord {
        configuration: ReserveConfiguration::default()
            .with_ltv(8000)
            .with_liquidation_threshold(8500)
            .with_liquidation_bonus(10500)
            .with_decimals(18)
            .with_reserve_factor(1000)
            .with_active(true)
            .with_borrowing_enabled(true),
        liquidity_index: 1_010_000_000_000_000_000_000_000_000,
        variable_borrow_index: 1_020_000_000_000_000_000_000_000_000,
        current_liquidity_rate: 30_000_000_000_000_000_000_000_000,
        current_variable_borrow_rate: 50_000_000_000_000_000_000_000_000,
        last_update_timestamp: 1_700_000_000,
        b_token_address: WETH_B_TOKEN,
        debt_token_address: WETH_DEBT_TOKEN,
        interest_rate_address: WETH_RATE,
        id: 0,
    }
}

pub fn usdc_record() -> ReserveRecord {
    ReserveRecord {
        configuration: ReserveConfiguration::default()
            .with_ltv(7500)
            .with_liquidation_threshold(8000)
            .with_liquidation_bonus(10400)
            .with_decimals(6)
            .with_reserve_factor(2000)
            .with_active(true)
            .with_frozen(true)
            .with_borrowing_enabled(true),
        liquidity_index: 1_000_000_000_000_000_000_000_000_000,
        variable_borrow_index: 1_000_000_000_000_000_000_000_000_000,
        current_liquidity_rate: 0,
        current_variable_borrow_rate: 0,
        last_update_timestamp: 1_700_000_100,
        b_token_address: USDC_B_TOKEN,
        debt_token_address: USDC_DEBT_TOKEN,
        interest_rate_address: USDC_RATE,
        id: 1,
    }
}

fn punks_record() -> NftRecord {
    NftRecord {
        configuration: NftConfiguration::default()
            .with_ltv(4000)
            .with_liquidation_threshold(8000)
            .with_liquidation_bonus(500)
            .with_active(true)
            .with_redeem_duration(48)
            .with_auction_duration(24)
            .with_redeem_fine(500)
            .with_redeem_threshold(5000)
            .with_min_bid_fine(2000),
        b_nft_address: PUNKS_B_NFT,
        id: 0,
        max_supply: U256::from(10_000u64),
        max_token_id: U256::from(9_999u64),
    }
}

fn apes_record() -> NftRecord {
    NftRecord {
        configuration: NftConfiguration::default()
            .with_ltv(3000)
            .with_liquidation_threshold(7000)
            .with_active(true)
            .with_redeem_duration(24)
            .with_auction_duration(12),
        b_nft_address: APES_B_NFT,
        id: 1,
        max_supply: U256::from(10_000u64),
        max_token_id: U256::from(9_999u64),
    }
}

pub fn punk_7_risk() -> LoanRisk {
    LoanRisk {
        total_collateral: U256::from(50u64),
        total_debt: U256::from(20u64),
        available_borrows: U256::from(0u64),
        ltv: U256::from(4000u64),
        liquidation_threshold: U256::from(8000u64),
        loan_id: U256::from(12u64),
        health_factor: U256::from(2_000_000_000_000_000_000u128),
    }
}

pub fn ape_3_risk() -> LoanRisk {
    LoanRisk {
        total_collateral: U256::from(30u64),
        total_debt: U256::from(29u64),
        available_borrows: U256::ZERO,
        ltv: U256::from(3000u64),
        liquidation_threshold: U256::from(7000u64),
        loan_id: U256::from(13u64),
        health_factor: U256::from(724_137_931_034_482_758u128),
    }
}

impl MockChain {
    /// Two reserves (WETH, USDC), two NFT pools (PUNKS, APES), two loans,
    /// one incentivised user.
    pub fn fixture() -> Self {
        let chain = Self::default();
        let s = &chain.state;

        chain.point_registry(REGISTRY, POOL, LOAN_LEDGER);
        chain.set_reserves(POOL, vec![(WETH, weth_record()), (USDC, usdc_record())]);
        s.nfts
            .insert(POOL, vec![(PUNKS, punks_record()), (APES, apes_record())]);

        s.loans.insert((POOL, PUNKS, U256::from(7u64)), punk_7_risk());
        s.loans.insert((POOL, APES, U256::from(3u64)), ape_3_risk());

        s.prices.insert(
            (RESERVE_ORACLE, WETH),
            U256::from(10u64).pow(U256::from(18u64)),
        );
        s.prices
            .insert((RESERVE_ORACLE, USDC), U256::from(400_000_000_000_000u64));
        s.prices.insert((NFT_ORACLE, PUNKS), U256::from(50u64));
        s.prices.insert((NFT_ORACLE, APES), U256::from(30u64));

        for (token, symbol, name) in [
            (WETH, "WETH", "Wrapped Ether"),
            (USDC, "USDC", "USD Coin"),
            (PUNKS, "PUNK", "CryptoPunks"),
            (APES, "BAYC", "BoredApeYachtClub"),
        ] {
            s.metadata
                .insert(token, (symbol.to_string(), name.to_string()));
        }

        s.balances.insert((WETH, WETH_B_TOKEN), U256::from(500u64));
        s.balances.insert((USDC, USDC_B_TOKEN), U256::from(9_000u64));
        s.scaled_supplies.insert(WETH_DEBT_TOKEN, U256::from(300u64));
        s.scaled_supplies.insert(USDC_DEBT_TOKEN, U256::from(4_000u64));
        s.slopes
            .insert(WETH_RATE, (U256::from(40u64), U256::from(600u64)));
        s.slopes
            .insert(USDC_RATE, (U256::from(70u64), U256::from(3_000u64)));

        s.scaled_balances.insert((WETH_B_TOKEN, USER), U256::from(5u64));
        s.scaled_balances.insert((WETH_DEBT_TOKEN, USER), U256::from(2u64));

        s.nft_collateral.insert((LOAN_LEDGER, PUNKS), U256::from(9u64));
        s.nft_collateral.insert((LOAN_LEDGER, APES), U256::from(4u64));
        s.user_nft_collateral
            .insert((LOAN_LEDGER, USER, PUNKS), U256::from(2u64));

        s.incentive_assets.insert(
            (INCENTIVES, WETH_B_TOKEN),
            IncentiveAssetData {
                index: U256::from(1u64),
                emission_per_second: U256::from(11u64),
                last_update_timestamp: U256::from(1_700_000_000u64),
            },
        );
        s.incentive_assets.insert(
            (INCENTIVES, WETH_DEBT_TOKEN),
            IncentiveAssetData {
                index: U256::from(2u64),
                emission_per_second: U256::from(12u64),
                last_update_timestamp: U256::from(1_700_000_000u64),
            },
        );
        s.user_indices
            .insert((INCENTIVES, USER, WETH_B_TOKEN), U256::from(21u64));
        s.user_indices
            .insert((INCENTIVES, USER, WETH_DEBT_TOKEN), U256::from(22u64));
        s.unclaimed.insert((INCENTIVES, USER), U256::from(77u64));
        s.distribution_end
            .insert(INCENTIVES, U256::from(DISTRIBUTION_END));

        chain
    }

    /// Point `registry` at a pool ledger and loan ledger.
    pub fn point_registry(&self, registry: Address, pool: Address, loan_ledger: Address) {
        self.state.ledgers.insert(registry, (pool, loan_ledger));
    }

    pub fn set_reserves(&self, pool: Address, reserves: Vec<(Address, ReserveRecord)>) {
        self.state.reserves.insert(pool, reserves);
    }

    /// Make every call to `method` fail from now on.
    pub fn fail_on(&self, method: &'static str) {
        *self.state.failing.lock() = Some(method);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().clone()
    }

    /// Number of calls made to contract `target`.
    pub fn calls_to(&self, target: Address) -> usize {
        self.state
            .calls
            .lock()
            .iter()
            .filter(|c| c.target == target)
            .count()
    }

    /// Number of calls made to `method` on any contract.
    pub fn calls_of(&self, method: &str) -> usize {
        self.state
            .calls
            .lock()
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Number of state views handed out.
    pub fn pins(&self) -> usize {
        self.state.pins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateSource for MockChain {
    async fn state(&self) -> Result<Arc<dyn Resolver>> {
        self.state.pins.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockResolver {
            state: Arc::clone(&self.state),
        }))
    }
}

#[derive(Debug)]
struct MockResolver {
    state: Arc<MockState>,
}

impl MockResolver {
    fn bind(&self, address: Address) -> Arc<MockContract> {
        Arc::new(MockContract {
            state: Arc::clone(&self.state),
            address,
        })
    }
}

impl Resolver for MockResolver {
    fn registry(&self, at: Address) -> Arc<dyn Registry> {
        self.bind(at)
    }

    fn pool_ledger(&self, at: Address) -> Arc<dyn PoolLedger> {
        self.bind(at)
    }

    fn loan_ledger(&self, at: Address) -> Arc<dyn LoanLedger> {
        self.bind(at)
    }

    fn price_oracle(&self, at: Address) -> Arc<dyn PriceOracle> {
        self.bind(at)
    }

    fn incentives(&self, at: Address) -> Arc<dyn IncentivesService> {
        self.bind(at)
    }

    fn rate_curve(&self, at: Address) -> Arc<dyn RateCurve> {
        self.bind(at)
    }

    fn token_metadata(&self, at: Address) -> Arc<dyn TokenMetadata> {
        self.bind(at)
    }

    fn token_balance(&self, at: Address) -> Arc<dyn TokenBalance> {
        self.bind(at)
    }

    fn scaled_token(&self, at: Address) -> Arc<dyn ScaledToken> {
        self.bind(at)
    }
}

/// One contract address bound into the in-memory deployment.
#[derive(Debug)]
struct MockContract {
    state: Arc<MockState>,
    address: Address,
}

impl MockContract {
    /// Log the call, then fail if `method` is the injected failure.
    fn record(&self, method: &'static str) -> Result<()> {
        self.state.calls.lock().push(Call {
            target: self.address,
            method,
        });
        if *self.state.failing.lock() == Some(method) {
            bail!("{} reverted at {}", method, self.address);
        }
        Ok(())
    }

    fn value<K>(&self, map: &DashMap<K, U256>, key: K) -> U256
    where
        K: Eq + std::hash::Hash,
    {
        map.get(&key).map(|v| *v).unwrap_or_default()
    }
}

#[async_trait]
impl Registry for MockContract {
    async fn pool_ledger(&self) -> Result<Address> {
        self.record("getLendPool")?;
        self.state
            .ledgers
            .get(&self.address)
            .map(|entry| entry.0)
            .ok_or_else(|| anyhow!("no registry at {}", self.address))
    }

    async fn loan_ledger(&self) -> Result<Address> {
        self.record("getLendPoolLoan")?;
        self.state
            .ledgers
            .get(&self.address)
            .map(|entry| entry.1)
            .ok_or_else(|| anyhow!("no registry at {}", self.address))
    }
}

#[async_trait]
impl PoolLedger for MockContract {
    async fn reserves_list(&self) -> Result<Vec<Address>> {
        self.record("getReservesList")?;
        let reserves = self
            .state
            .reserves
            .get(&self.address)
            .ok_or_else(|| anyhow!("no pool at {}", self.address))?;
        Ok(reserves.iter().map(|(asset, _)| *asset).collect())
    }

    async fn reserve_data(&self, asset: Address) -> Result<ReserveRecord> {
        self.record("getReserveData")?;
        let reserves = self
            .state
            .reserves
            .get(&self.address)
            .ok_or_else(|| anyhow!("no pool at {}", self.address))?;
        reserves
            .iter()
            .find(|(a, _)| *a == asset)
            .map(|(_, record)| record.clone())
            .ok_or_else(|| anyhow!("unknown reserve {}", asset))
    }

    async fn nfts_list(&self) -> Result<Vec<Address>> {
        self.record("getNftsList")?;
        let nfts = self
            .state
            .nfts
            .get(&self.address)
            .ok_or_else(|| anyhow!("no pool at {}", self.address))?;
        Ok(nfts.iter().map(|(asset, _)| *asset).collect())
    }

    async fn nft_data(&self, asset: Address) -> Result<NftRecord> {
        self.record("getNftData")?;
        let nfts = self
            .state
            .nfts
            .get(&self.address)
            .ok_or_else(|| anyhow!("no pool at {}", self.address))?;
        nfts.iter()
            .find(|(a, _)| *a == asset)
            .map(|(_, record)| record.clone())
            .ok_or_else(|| anyhow!("unknown NFT {}", asset))
    }

    async fn loan_risk(&self, asset: Address, token_id: U256) -> Result<LoanRisk> {
        self.record("getNftLoanData")?;
        self.state
            .loans
            .get(&(self.address, asset, token_id))
            .map(|risk| *risk)
            .ok_or_else(|| anyhow!("no loan for {} #{}", asset, token_id))
    }
}

#[async_trait]
impl LoanLedger for MockContract {
    async fn nft_collateral_amount(&self, asset: Address) -> Result<U256> {
        self.record("getNftCollateralAmount")?;
        Ok(self.value(&self.state.nft_collateral, (self.address, asset)))
    }

    async fn user_nft_collateral_amount(&self, user: Address, asset: Address) -> Result<U256> {
        self.record("getUserNftCollateralAmount")?;
        Ok(self.value(&self.state.user_nft_collateral, (self.address, user, asset)))
    }
}

#[async_trait]
impl PriceOracle for MockContract {
    async fn asset_price(&self, asset: Address) -> Result<U256> {
        self.record("getAssetPrice")?;
        Ok(self.value(&self.state.prices, (self.address, asset)))
    }
}

#[async_trait]
impl IncentivesService for MockContract {
    async fn asset_data(&self, asset: Address) -> Result<IncentiveAssetData> {
        self.record("getAssetData")?;
        Ok(self
            .state
            .incentive_assets
            .get(&(self.address, asset))
            .map(|data| *data)
            .unwrap_or_default())
    }

    async fn user_asset_index(&self, user: Address, asset: Address) -> Result<U256> {
        self.record("getUserAssetData")?;
        Ok(self.value(&self.state.user_indices, (self.address, user, asset)))
    }

    async fn user_unclaimed_rewards(&self, user: Address) -> Result<U256> {
        self.record("getUserUnclaimedRewards")?;
        Ok(self.value(&self.state.unclaimed, (self.address, user)))
    }

    async fn distribution_end(&self) -> Result<U256> {
        self.record("DISTRIBUTION_END")?;
        Ok(self.value(&self.state.distribution_end, self.address))
    }
}

#[async_trait]
impl RateCurve for MockContract {
    async fn variable_rate_slope1(&self) -> Result<U256> {
        self.record("variableRateSlope1")?;
        Ok(self
            .state
            .slopes
            .get(&self.address)
            .map(|s| s.0)
            .unwrap_or_default())
    }

    async fn variable_rate_slope2(&self) -> Result<U256> {
        self.record("variableRateSlope2")?;
        Ok(self
            .state
            .slopes
            .get(&self.address)
            .map(|s| s.1)
            .unwrap_or_default())
    }
}

#[async_trait]
impl TokenMetadata for MockContract {
    async fn symbol(&self) -> Result<String> {
        self.record("symbol")?;
        self.state
            .metadata
            .get(&self.address)
            .map(|m| m.0.clone())
            .ok_or_else(|| anyhow!("no metadata for {}", self.address))
    }

    async fn name(&self) -> Result<String> {
        self.record("name")?;
        self.state
            .metadata
            .get(&self.address)
            .map(|m| m.1.clone())
            .ok_or_else(|| anyhow!("no metadata for {}", self.address))
    }
}

#[async_trait]
impl TokenBalance for MockContract {
    async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.record("balanceOf")?;
        Ok(self.value(&self.state.balances, (self.address, owner)))
    }
}

#[async_trait]
impl ScaledToken for MockContract {
    async fn scaled_balance_of(&self, user: Address) -> Result<U256> {
        self.record("scaledBalanceOf")?;
        Ok(self.value(&self.state.scaled_balances, (self.address, user)))
    }

    async fn scaled_total_supply(&self) -> Result<U256> {
        self.record("scaledTotalSupply")?;
        Ok(self.value(&self.state.scaled_supplies, self.address))
    }
}
