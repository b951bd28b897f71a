//! Binding collaborator roles to addresses within one state view.
//!
//! Every query starts by asking a [`StateSource`] for a fresh [`Resolver`].
//! The resolver fixes the chain state the query reads (for RPC, one block
//! number) and hands out clients for whatever addresses the query discovers
//! along the way. Nothing obtained from a resolver outlives the query.

use crate::oracle::PriceOracle;
use crate::protocol::{IncentivesService, LoanLedger, PoolLedger, RateCurve, Registry};
use crate::tokens::{ScaledToken, TokenBalance, TokenMetadata};
use alloy::primitives::Address;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Clients for collaborator contracts, all reading the same state.
pub trait Resolver: Send + Sync {
    fn registry(&self, at: Address) -> Arc<dyn Registry>;

    fn pool_ledger(&self, at: Address) -> Arc<dyn PoolLedger>;

    fn loan_ledger(&self, at: Address) -> Arc<dyn LoanLedger>;

    fn price_oracle(&self, at: Address) -> Arc<dyn PriceOracle>;

    fn incentives(&self, at: Address) -> Arc<dyn IncentivesService>;

    fn rate_curve(&self, at: Address) -> Arc<dyn RateCurve>;

    fn token_metadata(&self, at: Address) -> Arc<dyn TokenMetadata>;

    fn token_balance(&self, at: Address) -> Arc<dyn TokenBalance>;

    fn scaled_token(&self, at: Address) -> Arc<dyn ScaledToken>;
}

/// Source of consistent state views.
#[async_trait]
pub trait StateSource: Send + Sync {
    /// Pin the current state and return a resolver bound to it.
    async fn state(&self) -> Result<Arc<dyn Resolver>>;
}

#[async_trait]
impl<T: StateSource + ?Sized> StateSource for Arc<T> {
    async fn state(&self) -> Result<Arc<dyn Resolver>> {
        (**self).state().await
    }
}
