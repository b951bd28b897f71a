//! Lending protocol collaborators.
//!
//! Traits for the protocol-side services the view layer reads from, and the
//! raw records they return.
//!
//! # Architecture
//!
//! - [`Registry`]: maps protocol roles to the current pool and loan ledger addresses
//! - [`PoolLedger`]: authoritative reserve / NFT pool records and per-loan risk
//! - [`LoanLedger`]: collateral accounting per user and NFT asset
//! - [`RateCurve`]: interest rate strategy parameters
//! - [`IncentivesService`]: reward emission indices (optional deployment)
//!
//! None of these are cached by callers. Implementations are bound to one
//! state view (see [`crate::Resolver`]) so every read in a query sees the
//! same chain state.

mod configuration;

pub use configuration::{NftConfiguration, ReserveConfiguration};

use alloy::primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

/// Base record for a fungible reserve as stored by the pool ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveRecord {
    /// Packed configuration word
    pub configuration: ReserveConfiguration,
    /// Liquidity index (ray)
    pub liquidity_index: u128,
    /// Variable borrow index (ray)
    pub variable_borrow_index: u128,
    /// Current supply rate (ray)
    pub current_liquidity_rate: u128,
    /// Current variable borrow rate (ray)
    pub current_variable_borrow_rate: u128,
    /// Unix timestamp of the last index update
    pub last_update_timestamp: u64,
    /// Interest-bearing token
    pub b_token_address: Address,
    /// Variable debt token
    pub debt_token_address: Address,
    /// Interest rate strategy
    pub interest_rate_address: Address,
    /// Reserve id in the pool's list
    pub id: u8,
}

/// Base record for an NFT collateral pool as stored by the pool ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftRecord {
    /// Packed configuration word
    pub configuration: NftConfiguration,
    /// Collateral wrapper token minted on deposit
    pub b_nft_address: Address,
    /// NFT id in the pool's list
    pub id: u8,
    pub max_supply: U256,
    pub max_token_id: U256,
}

/// Risk figures for a single loan, computed by the pool ledger.
///
/// Values are passed through untouched; callers must not reinterpret them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoanRisk {
    pub total_collateral: U256,
    pub total_debt: U256,
    pub available_borrows: U256,
    pub ltv: U256,
    pub liquidation_threshold: U256,
    pub loan_id: U256,
    pub health_factor: U256,
}

/// Emission state of one incentivised token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncentiveAssetData {
    pub index: U256,
    pub emission_per_second: U256,
    pub last_update_timestamp: U256,
}

/// Protocol address registry.
#[async_trait]
pub trait Registry: Send + Sync + Debug {
    /// Current pool ledger address.
    async fn pool_ledger(&self) -> Result<Address>;

    /// Current loan ledger address.
    async fn loan_ledger(&self) -> Result<Address>;
}

/// Pool ledger: reserve and NFT pool records plus loan risk.
#[async_trait]
pub trait PoolLedger: Send + Sync + Debug {
    /// Ordered list of reserve assets.
    async fn reserves_list(&self) -> Result<Vec<Address>>;

    /// Base record of a reserve.
    async fn reserve_data(&self, asset: Address) -> Result<ReserveRecord>;

    /// Ordered list of NFT assets.
    async fn nfts_list(&self) -> Result<Vec<Address>>;

    /// Base record of an NFT pool.
    async fn nft_data(&self, asset: Address) -> Result<NftRecord>;

    /// Risk figures for the loan backed by `(asset, token_id)`.
    async fn loan_risk(&self, asset: Address, token_id: U256) -> Result<LoanRisk>;
}

/// Loan ledger: NFT collateral accounting.
#[async_trait]
pub trait LoanLedger: Send + Sync + Debug {
    /// Number of `asset` tokens held as collateral across all users.
    async fn nft_collateral_amount(&self, asset: Address) -> Result<U256>;

    /// Number of `asset` tokens `user` holds as collateral.
    async fn user_nft_collateral_amount(&self, user: Address, asset: Address) -> Result<U256>;
}

/// Interest rate strategy.
#[async_trait]
pub trait RateCurve: Send + Sync + Debug {
    async fn variable_rate_slope1(&self) -> Result<U256>;

    async fn variable_rate_slope2(&self) -> Result<U256>;
}

/// Reward emission controller.
#[async_trait]
pub trait IncentivesService: Send + Sync + Debug {
    /// Emission state for an incentivised token.
    async fn asset_data(&self, asset: Address) -> Result<IncentiveAssetData>;

    /// `user`'s last recorded index for an incentivised token.
    async fn user_asset_index(&self, user: Address, asset: Address) -> Result<U256>;

    /// Rewards accrued to `user` and not yet claimed.
    async fn user_unclaimed_rewards(&self, user: Address) -> Result<U256>;

    /// Unix timestamp at which emission stops.
    async fn distribution_end(&self) -> Result<U256>;
}
