//! RPC-backed state views.
//! Uses Alloy providers; every query pins one block and reads everything at it.

use crate::contracts::RpcContract;
use crate::oracle::PriceOracle;
use crate::protocol::{IncentivesService, LoanLedger, PoolLedger, RateCurve, Registry};
use crate::resolver::{Resolver, StateSource};
use crate::tokens::{ScaledToken, TokenBalance, TokenMetadata};
use alloy::eips::BlockId;
use alloy::primitives::Address;
use alloy::providers::Provider;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// State source that pins the latest block for each query.
pub struct RpcStateSource<P> {
    provider: Arc<P>,
}

impl<P> std::fmt::Debug for RpcStateSource<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcStateSource").finish_non_exhaustive()
    }
}

impl<P> Clone for RpcStateSource<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: Provider + Send + Sync + 'static> RpcStateSource<P> {
    /// Wrap an Alloy provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Get current block number.
    pub async fn block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    /// Get chain ID.
    pub async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Resolver pinned to a specific block.
    pub fn at_block(&self, block: u64) -> RpcResolver<P> {
        RpcResolver::new(Arc::clone(&self.provider), BlockId::number(block))
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> StateSource for RpcStateSource<P> {
    async fn state(&self) -> Result<Arc<dyn Resolver>> {
        let block = self.block_number().await?;
        debug!(block = block, "Pinned state view");
        Ok(Arc::new(self.at_block(block)))
    }
}

/// Resolver that binds every contract to one provider and block.
pub struct RpcResolver<P> {
    provider: Arc<P>,
    block: BlockId,
}

impl<P> std::fmt::Debug for RpcResolver<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcResolver")
            .field("block", &self.block)
            .finish()
    }
}

impl<P> RpcResolver<P> {
    pub fn new(provider: Arc<P>, block: BlockId) -> Self {
        Self { provider, block }
    }

    /// The block every read is pinned to.
    pub fn block(&self) -> BlockId {
        self.block
    }

    fn bind(&self, at: Address) -> RpcContract<P> {
        RpcContract::new(at, Arc::clone(&self.provider), self.block)
    }
}

impl<P: Provider + Send + Sync + 'static> Resolver for RpcResolver<P> {
    fn registry(&self, at: Address) -> Arc<dyn Registry> {
        Arc::new(self.bind(at))
    }

    fn pool_ledger(&self, at: Address) -> Arc<dyn PoolLedger> {
        Arc::new(self.bind(at))
    }

    fn loan_ledger(&self, at: Address) -> Arc<dyn LoanLedger> {
        Arc::new(self.bind(at))
    }

    fn price_oracle(&self, at: Address) -> Arc<dyn PriceOracle> {
        Arc::new(self.bind(at))
    }

    fn incentives(&self, at: Address) -> Arc<dyn IncentivesService> {
        Arc::new(self.bind(at))
    }

    fn rate_curve(&self, at: Address) -> Arc<dyn RateCurve> {
        Arc::new(self.bind(at))
    }

    fn token_metadata(&self, at: Address) -> Arc<dyn TokenMetadata> {
        Arc::new(self.bind(at))
    }

    fn token_balance(&self, at: Address) -> Arc<dyn TokenBalance> {
        Arc::new(self.bind(at))
    }

    fn scaled_token(&self, at: Address) -> Arc<dyn ScaledToken> {
        Arc::new(self.bind(at))
    }
}
