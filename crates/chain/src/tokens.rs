//! Token metadata and balance reads.
//!
//! `symbol()` / `name()` share a selector between ERC20 and ERC721, so one
//! [`TokenMetadata`] trait covers reserves and NFT collections alike.

use alloy::primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// Human-readable token metadata.
#[async_trait]
pub trait TokenMetadata: Send + Sync + Debug {
    async fn symbol(&self) -> Result<String>;

    async fn name(&self) -> Result<String>;
}

/// Plain ERC20 balance.
#[async_trait]
pub trait TokenBalance: Send + Sync + Debug {
    async fn balance_of(&self, owner: Address) -> Result<U256>;
}

/// Interest-bearing or debt token that tracks balances in index-scaled units.
#[async_trait]
pub trait ScaledToken: Send + Sync + Debug {
    /// `user`'s balance divided by the reserve index at the last update.
    async fn scaled_balance_of(&self, user: Address) -> Result<U256>;

    async fn scaled_total_supply(&self) -> Result<U256>;
}
