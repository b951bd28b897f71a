//! NFT pool snapshots and user NFT positions.

use crate::context::QueryContext;
use alloy::primitives::{Address, U256};
use anyhow::Result;
use lendview_chain::{LoanLedger, NftRecord};
use serde::Serialize;

/// UI-ready state of one NFT collateral pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftSnapshot {
    pub underlying_asset: Address,
    pub name: String,
    pub symbol: String,
    /// Basis points
    pub ltv: u16,
    /// Basis points
    pub liquidation_threshold: u16,
    /// Basis points
    pub liquidation_bonus: u16,
    /// Hours
    pub redeem_duration: u8,
    /// Hours
    pub auction_duration: u8,
    pub redeem_fine: u16,
    pub redeem_threshold: u16,
    pub min_bid_fine: u16,
    pub is_active: bool,
    pub is_frozen: bool,
    pub b_nft_address: Address,
    /// Oracle floor price in the reference unit
    pub price_in_eth: U256,
    /// Tokens held as collateral across all users
    pub total_collateral: U256,
    pub max_supply: U256,
    pub max_token_id: U256,
}

/// A user's collateral in one NFT pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNftPosition {
    pub underlying_asset: Address,
    pub b_nft_address: Address,
    pub total_collateral: U256,
}

/// Build the snapshot of `asset` from its base record.
pub async fn build_nft_snapshot(
    ctx: &QueryContext,
    loan_ledger: &dyn LoanLedger,
    asset: Address,
    record: &NftRecord,
) -> Result<NftSnapshot> {
    let metadata = ctx.resolver.token_metadata(asset);

    let (price_in_eth, total_collateral, symbol, name) = tokio::try_join!(
        ctx.nft_oracle.asset_price(asset),
        loan_ledger.nft_collateral_amount(asset),
        metadata.symbol(),
        metadata.name(),
    )?;

    let config = record.configuration;

    Ok(NftSnapshot {
        underlying_asset: asset,
        name,
        symbol,
        ltv: config.ltv(),
        liquidation_threshold: config.liquidation_threshold(),
        liquidation_bonus: config.liquidation_bonus(),
        redeem_duration: config.redeem_duration(),
        auction_duration: config.auction_duration(),
        redeem_fine: config.redeem_fine(),
        redeem_threshold: config.redeem_threshold(),
        min_bid_fine: config.min_bid_fine(),
        is_active: config.is_active(),
        is_frozen: config.is_frozen(),
        b_nft_address: record.b_nft_address,
        price_in_eth,
        total_collateral,
        max_supply: record.max_supply,
        max_token_id: record.max_token_id,
    })
}

/// Build `user`'s position in `asset` from the pool's base record.
pub async fn build_user_nft_position(
    loan_ledger: &dyn LoanLedger,
    asset: Address,
    record: &NftRecord,
    user: Address,
) -> Result<UserNftPosition> {
    let total_collateral = loan_ledger.user_nft_collateral_amount(user, asset).await?;

    Ok(UserNftPosition {
        underlying_asset: asset,
        b_nft_address: record.b_nft_address,
        total_collateral,
    })
}
