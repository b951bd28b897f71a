//! Price oracle abstraction.
//!
//! The protocol runs two oracles with the same read interface: one prices
//! fungible reserves, the other prices NFT collections. Both quote in the
//! protocol's reference unit (ETH, 18 decimals). Prices are returned as
//! reported; no staleness or sanity filtering is applied at this layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use lendview_chain::{PriceOracle, Resolver};
//!
//! let oracle = resolver.price_oracle(reserve_oracle_address);
//! let price = oracle.asset_price(weth).await?;
//! ```

use alloy::primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// Core trait for oracle reads.
#[async_trait]
pub trait PriceOracle: Send + Sync + Debug {
    /// Price of one unit of `asset` (one whole token, or one NFT of a collection).
    async fn asset_price(&self, asset: Address) -> Result<U256>;
}
