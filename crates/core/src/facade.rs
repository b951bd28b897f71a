//! Aggregation facade: composite, UI-ready views over the lending protocol.
//!
//! Every query pins one state view, resolves the pool and loan ledgers from
//! the registry it is given, and fans out over the assets the ledger lists.
//! Nothing is cached between queries.

use crate::config::FacadeConfig;
use crate::context::QueryContext;
use crate::error::Result;
use crate::incentives::IncentivesSnapshot;
use crate::loan::{LoanRequest, LoanSnapshot};
use crate::nft::{build_nft_snapshot, build_user_nft_position, NftSnapshot, UserNftPosition};
use crate::reserve::{
    build_reserve_snapshot, build_user_reserve_position, ReserveSnapshot, UserReservePosition,
};
use alloy::primitives::{Address, U256};
use futures::future::try_join_all;
use lendview_chain::{NftRecord, PoolLedger, ReserveRecord, StateSource};
use serde::Serialize;
use tracing::debug;

/// Reserve snapshots, user positions and incentive totals from one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservesView {
    pub reserves: Vec<ReserveSnapshot>,
    /// Empty when no user was given
    pub user_reserves: Vec<UserReservePosition>,
    pub incentives: IncentivesSnapshot,
}

/// NFT pool snapshots and user positions from one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftsView {
    pub nfts: Vec<NftSnapshot>,
    /// Empty when no user was given
    pub user_nfts: Vec<UserNftPosition>,
}

/// Read-only facade over a lending deployment.
///
/// Holds the fixed oracle and incentives addresses plus a source of state
/// views; the registry is supplied per call.
#[derive(Debug)]
pub struct AggregationFacade<S> {
    source: S,
    config: FacadeConfig,
}

impl<S: StateSource> AggregationFacade<S> {
    pub fn new(source: S, config: FacadeConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    /// Pin a state view and bind the fixed collaborators in it.
    async fn context(&self) -> Result<QueryContext> {
        let resolver = self.source.state().await?;
        Ok(QueryContext::new(resolver, &self.config))
    }

    // ---- Reserves ----

    /// Reserve assets in pool ledger order.
    pub async fn list_reserves(&self, registry: Address) -> Result<Vec<Address>> {
        let ctx = self.context().await?;
        let (pool_address, pool) = ctx.pool_ledger(registry).await?;
        let reserves = pool.reserves_list().await?;

        debug!(
            registry = %registry,
            pool = %pool_address,
            count = reserves.len(),
            "Listed reserves"
        );
        Ok(reserves)
    }

    /// Snapshot of every reserve, plus the incentives emission end.
    pub async fn get_reserve_snapshots(
        &self,
        registry: Address,
    ) -> Result<(Vec<ReserveSnapshot>, U256)> {
        let ctx = self.context().await?;
        let (pool_address, pool) = ctx.pool_ledger(registry).await?;
        let records = reserve_records(pool.as_ref()).await?;

        let (reserves, emission_end) = tokio::try_join!(
            try_join_all(
                records
                    .iter()
                    .map(|(asset, record)| build_reserve_snapshot(&ctx, *asset, record))
            ),
            ctx.incentives.emission_end(),
        )?;

        debug!(
            pool = %pool_address,
            count = reserves.len(),
            incentives = ctx.incentives.is_enabled(),
            "Built reserve snapshots"
        );
        Ok((reserves, emission_end))
    }

    /// `user`'s position in every reserve, plus their unclaimed rewards.
    ///
    /// A missing or zero `user` yields an empty list and zero rewards
    /// without touching the chain.
    pub async fn get_user_reserve_positions(
        &self,
        registry: Address,
        user: Option<Address>,
    ) -> Result<(Vec<UserReservePosition>, U256)> {
        let Some(user) = normalize_user(user) else {
            return Ok((Vec::new(), U256::ZERO));
        };

        let ctx = self.context().await?;
        let (pool_address, pool) = ctx.pool_ledger(registry).await?;
        let records = reserve_records(pool.as_ref()).await?;

        let (positions, unclaimed) = tokio::try_join!(
            try_join_all(
                records
                    .iter()
                    .map(|(asset, record)| build_user_reserve_position(&ctx, *asset, record, user))
            ),
            ctx.incentives.unclaimed_rewards(Some(user)),
        )?;

        debug!(
            pool = %pool_address,
            user = %user,
            count = positions.len(),
            "Built user reserve positions"
        );
        Ok((positions, unclaimed))
    }

    /// Reserve snapshots, `user`'s positions and incentive totals at one state.
    ///
    /// Each base record is read once and feeds both halves.
    pub async fn get_reserves_view(
        &self,
        registry: Address,
        user: Option<Address>,
    ) -> Result<ReservesView> {
        let user = normalize_user(user);
        let ctx = self.context().await?;
        let (pool_address, pool) = ctx.pool_ledger(registry).await?;
        let records = reserve_records(pool.as_ref()).await?;

        let snapshots = try_join_all(
            records
                .iter()
                .map(|(asset, record)| build_reserve_snapshot(&ctx, *asset, record)),
        );
        let positions = async {
            match user {
                Some(user) => {
                    try_join_all(records.iter().map(|(asset, record)| {
                        build_user_reserve_position(&ctx, *asset, record, user)
                    }))
                    .await
                }
                None => Ok(Vec::new()),
            }
        };

        let (reserves, user_reserves, incentives) =
            tokio::try_join!(snapshots, positions, ctx.incentives.snapshot(user))?;

        debug!(
            pool = %pool_address,
            reserves = reserves.len(),
            user_reserves = user_reserves.len(),
            "Built reserves view"
        );
        Ok(ReservesView {
            reserves,
            user_reserves,
            incentives,
        })
    }

    // ---- NFT pools ----

    /// NFT assets in pool ledger order.
    pub async fn list_nfts(&self, registry: Address) -> Result<Vec<Address>> {
        let ctx = self.context().await?;
        let (pool_address, pool) = ctx.pool_ledger(registry).await?;
        let nfts = pool.nfts_list().await?;

        debug!(
            registry = %registry,
            pool = %pool_address,
            count = nfts.len(),
            "Listed NFT pools"
        );
        Ok(nfts)
    }

    /// Snapshot of every NFT pool.
    pub async fn get_simple_nfts_data(&self, registry: Address) -> Result<Vec<NftSnapshot>> {
        let ctx = self.context().await?;
        let ((pool_address, pool), (loan_address, loan_ledger)) =
            tokio::try_join!(ctx.pool_ledger(registry), ctx.loan_ledger(registry))?;
        let records = nft_records(pool.as_ref()).await?;

        let nfts = try_join_all(records.iter().map(|(asset, record)| {
            build_nft_snapshot(&ctx, loan_ledger.as_ref(), *asset, record)
        }))
        .await?;

        debug!(
            pool = %pool_address,
            loan_ledger = %loan_address,
            count = nfts.len(),
            "Built NFT snapshots"
        );
        Ok(nfts)
    }

    /// `user`'s collateral in every NFT pool; empty for a missing or zero user.
    pub async fn get_user_nfts_data(
        &self,
        registry: Address,
        user: Option<Address>,
    ) -> Result<Vec<UserNftPosition>> {
        let Some(user) = normalize_user(user) else {
            return Ok(Vec::new());
        };

        let ctx = self.context().await?;
        let ((pool_address, pool), (_, loan_ledger)) =
            tokio::try_join!(ctx.pool_ledger(registry), ctx.loan_ledger(registry))?;
        let records = nft_records(pool.as_ref()).await?;

        let positions = try_join_all(records.iter().map(|(asset, record)| {
            build_user_nft_position(loan_ledger.as_ref(), *asset, record, user)
        }))
        .await?;

        debug!(
            pool = %pool_address,
            user = %user,
            count = positions.len(),
            "Built user NFT positions"
        );
        Ok(positions)
    }

    /// NFT pool snapshots and `user`'s positions at one state.
    pub async fn get_nfts_data(&self, registry: Address, user: Option<Address>) -> Result<NftsView> {
        let user = normalize_user(user);
        let ctx = self.context().await?;
        let ((pool_address, pool), (_, loan_ledger)) =
            tokio::try_join!(ctx.pool_ledger(registry), ctx.loan_ledger(registry))?;
        let records = nft_records(pool.as_ref()).await?;

        let snapshots = try_join_all(records.iter().map(|(asset, record)| {
            build_nft_snapshot(&ctx, loan_ledger.as_ref(), *asset, record)
        }));
        let positions = async {
            match user {
                Some(user) => {
                    try_join_all(records.iter().map(|(asset, record)| {
                        build_user_nft_position(loan_ledger.as_ref(), *asset, record, user)
                    }))
                    .await
                }
                None => Ok(Vec::new()),
            }
        };

        let (nfts, user_nfts) = tokio::try_join!(snapshots, positions)?;

        debug!(
            pool = %pool_address,
            nfts = nfts.len(),
            user_nfts = user_nfts.len(),
            "Built NFTs view"
        );
        Ok(NftsView { nfts, user_nfts })
    }

    // ---- Loans ----

    /// Risk snapshot of each `(assets[i], token_ids[i])` loan.
    ///
    /// Mismatched lengths fail before the chain is touched.
    pub async fn get_loan_snapshots(
        &self,
        registry: Address,
        assets: &[Address],
        token_ids: &[U256],
    ) -> Result<Vec<LoanSnapshot>> {
        let requests = LoanRequest::pair(assets, token_ids)?;
        self.get_loan_snapshots_for(registry, &requests).await
    }

    /// Risk snapshot of each requested loan, in request order.
    pub async fn get_loan_snapshots_for(
        &self,
        registry: Address,
        requests: &[LoanRequest],
    ) -> Result<Vec<LoanSnapshot>> {
        let ctx = self.context().await?;
        let (pool_address, pool) = ctx.pool_ledger(registry).await?;

        let loans = try_join_all(requests.iter().map(|request| {
            let pool = &pool;
            async move {
                let risk = pool.loan_risk(request.asset, request.token_id).await?;
                Ok::<_, anyhow::Error>(LoanSnapshot::from(risk))
            }
        }))
        .await?;

        debug!(pool = %pool_address, count = loans.len(), "Built loan snapshots");
        Ok(loans)
    }
}

/// `None` and the zero address both mean "no user".
fn normalize_user(user: Option<Address>) -> Option<Address> {
    user.filter(|u| !u.is_zero())
}

/// Every reserve with its base record, in ledger order.
async fn reserve_records(pool: &dyn PoolLedger) -> anyhow::Result<Vec<(Address, ReserveRecord)>> {
    let assets = pool.reserves_list().await?;
    try_join_all(assets.into_iter().map(|asset| async move {
        let record = pool.reserve_data(asset).await?;
        Ok::<_, anyhow::Error>((asset, record))
    }))
    .await
}

/// Every NFT pool with its base record, in ledger order.
async fn nft_records(pool: &dyn PoolLedger) -> anyhow::Result<Vec<(Address, NftRecord)>> {
    let assets = pool.nfts_list().await?;
    try_join_all(assets.into_iter().map(|asset| async move {
        let record = pool.nft_data(asset).await?;
        Ok::<_, anyhow::Error>((asset, record))
    }))
    .await
}
