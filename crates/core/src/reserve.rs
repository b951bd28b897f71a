//! Reserve snapshots and user reserve positions.

use crate::context::QueryContext;
use alloy::primitives::{Address, U256};
use anyhow::Result;
use lendview_chain::{IncentiveAssetData, ReserveRecord};
use serde::Serialize;

/// UI-ready state of one reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveSnapshot {
    pub underlying_asset: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Basis points
    pub ltv: u16,
    /// Basis points
    pub liquidation_threshold: u16,
    /// Basis points
    pub liquidation_bonus: u16,
    /// Basis points
    pub reserve_factor: u16,
    pub is_active: bool,
    pub is_frozen: bool,
    pub borrowing_enabled: bool,
    /// Ray
    pub liquidity_index: U256,
    /// Ray
    pub variable_borrow_index: U256,
    /// Ray
    pub liquidity_rate: U256,
    /// Ray
    pub variable_borrow_rate: U256,
    pub last_update_timestamp: u64,
    pub b_token_address: Address,
    pub debt_token_address: Address,
    pub interest_rate_address: Address,
    /// Underlying held by the bToken
    pub available_liquidity: U256,
    pub total_scaled_variable_debt: U256,
    /// Oracle price in the reference unit
    pub price_in_eth: U256,
    pub variable_rate_slope1: U256,
    pub variable_rate_slope2: U256,
    /// Zeroed when incentives are disabled
    pub b_token_incentives: IncentiveAssetData,
    /// Zeroed when incentives are disabled
    pub debt_token_incentives: IncentiveAssetData,
}

/// A user's balances in one reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReservePosition {
    pub underlying_asset: Address,
    pub scaled_b_token_balance: U256,
    pub scaled_variable_debt: U256,
    /// Zero when incentives are disabled
    pub b_token_incentives_user_index: U256,
    /// Zero when incentives are disabled
    pub debt_token_incentives_user_index: U256,
}

/// Build the snapshot of `asset` from its base record.
///
/// All reads go through `ctx`; any failure fails the whole snapshot.
pub async fn build_reserve_snapshot(
    ctx: &QueryContext,
    asset: Address,
    record: &ReserveRecord,
) -> Result<ReserveSnapshot> {
    let underlying = ctx.resolver.token_balance(asset);
    let metadata = ctx.resolver.token_metadata(asset);
    let debt_token = ctx.resolver.scaled_token(record.debt_token_address);
    let strategy = ctx.resolver.rate_curve(record.interest_rate_address);

    let (
        price_in_eth,
        available_liquidity,
        total_scaled_variable_debt,
        symbol,
        name,
        variable_rate_slope1,
        variable_rate_slope2,
        b_token_incentives,
        debt_token_incentives,
    ) = tokio::try_join!(
        ctx.reserve_oracle.asset_price(asset),
        underlying.balance_of(record.b_token_address),
        debt_token.scaled_total_supply(),
        metadata.symbol(),
        metadata.name(),
        strategy.variable_rate_slope1(),
        strategy.variable_rate_slope2(),
        ctx.incentives.asset_data(record.b_token_address),
        ctx.incentives.asset_data(record.debt_token_address),
    )?;

    let config = record.configuration;

    Ok(ReserveSnapshot {
        underlying_asset: asset,
        name,
        symbol,
        decimals: config.decimals(),
        ltv: config.ltv(),
        liquidation_threshold: config.liquidation_threshold(),
        liquidation_bonus: config.liquidation_bonus(),
        reserve_factor: config.reserve_factor(),
        is_active: config.is_active(),
        is_frozen: config.is_frozen(),
        borrowing_enabled: config.borrowing_enabled(),
        liquidity_index: U256::from(record.liquidity_index),
        variable_borrow_index: U256::from(record.variable_borrow_index),
        liquidity_rate: U256::from(record.current_liquidity_rate),
        variable_borrow_rate: U256::from(record.current_variable_borrow_rate),
        last_update_timestamp: record.last_update_timestamp,
        b_token_address: record.b_token_address,
        debt_token_address: record.debt_token_address,
        interest_rate_address: record.interest_rate_address,
        available_liquidity,
        total_scaled_variable_debt,
        price_in_eth,
        variable_rate_slope1,
        variable_rate_slope2,
        b_token_incentives,
        debt_token_incentives,
    })
}

/// Build `user`'s position in `asset` from the reserve's base record.
pub async fn build_user_reserve_position(
    ctx: &QueryContext,
    asset: Address,
    record: &ReserveRecord,
    user: Address,
) -> Result<UserReservePosition> {
    let b_token = ctx.resolver.scaled_token(record.b_token_address);
    let debt_token = ctx.resolver.scaled_token(record.debt_token_address);

    let (
        scaled_b_token_balance,
        scaled_variable_debt,
        b_token_incentives_user_index,
        debt_token_incentives_user_index,
    ) = tokio::try_join!(
        b_token.scaled_balance_of(user),
        debt_token.scaled_balance_of(user),
        ctx.incentives.user_index(user, record.b_token_address),
        ctx.incentives.user_index(user, record.debt_token_address),
    )?;

    Ok(UserReservePosition {
        underlying_asset: asset,
        scaled_b_token_balance,
        scaled_variable_debt,
        b_token_incentives_user_index,
        debt_token_incentives_user_index,
    })
}
