//! Per-query read context.

use crate::config::FacadeConfig;
use crate::incentives::IncentivesGate;
use alloy::primitives::Address;
use anyhow::Result;
use lendview_chain::{LoanLedger, PoolLedger, PriceOracle, Resolver};
use std::sync::Arc;

/// Everything a query reads through, bound to one state view.
///
/// Built at the start of a query and dropped at its end; never shared
/// between queries.
pub struct QueryContext {
    pub resolver: Arc<dyn Resolver>,
    pub reserve_oracle: Arc<dyn PriceOracle>,
    pub nft_oracle: Arc<dyn PriceOracle>,
    pub incentives: IncentivesGate,
}

impl QueryContext {
    pub fn new(resolver: Arc<dyn Resolver>, config: &FacadeConfig) -> Self {
        let reserve_oracle = resolver.price_oracle(config.reserve_oracle);
        let nft_oracle = resolver.price_oracle(config.nft_oracle);
        let incentives = IncentivesGate::resolve(resolver.as_ref(), config.incentives_controller);

        Self {
            resolver,
            reserve_oracle,
            nft_oracle,
            incentives,
        }
    }

    /// Look up the current pool ledger through the registry.
    pub async fn pool_ledger(&self, registry: Address) -> Result<(Address, Arc<dyn PoolLedger>)> {
        let address = self.resolver.registry(registry).pool_ledger().await?;
        Ok((address, self.resolver.pool_ledger(address)))
    }

    /// Look up the current loan ledger through the registry.
    pub async fn loan_ledger(&self, registry: Address) -> Result<(Address, Arc<dyn LoanLedger>)> {
        let address = self.resolver.registry(registry).loan_ledger().await?;
        Ok((address, self.resolver.loan_ledger(address)))
    }
}
