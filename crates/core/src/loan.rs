//! Per-loan risk snapshots.

use crate::error::{Result, ViewError};
use alloy::primitives::{Address, U256};
use lendview_chain::LoanRisk;
use serde::{Deserialize, Serialize};

/// One loan to look up: an NFT collection and a token id in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub asset: Address,
    pub token_id: U256,
}

impl LoanRequest {
    pub fn new(asset: Address, token_id: U256) -> Self {
        Self { asset, token_id }
    }

    /// Pair up parallel asset / token id lists.
    ///
    /// Fails with [`ViewError::ParamsMismatch`] if the lengths differ.
    pub fn pair(assets: &[Address], token_ids: &[U256]) -> Result<Vec<Self>> {
        if assets.len() != token_ids.len() {
            return Err(ViewError::ParamsMismatch {
                assets: assets.len(),
                token_ids: token_ids.len(),
            });
        }

        Ok(assets
            .iter()
            .zip(token_ids)
            .map(|(&asset, &token_id)| Self::new(asset, token_id))
            .collect())
    }
}

/// Risk metrics of one loan, exactly as the pool ledger computed them.
///
/// Values are in the oracle reference unit (collateral, debt, available
/// borrows) or basis points (ltv, liquidation threshold); health factor is wad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSnapshot {
    pub total_collateral_in_eth: U256,
    pub total_debt_in_eth: U256,
    pub available_borrows_in_eth: U256,
    pub ltv: U256,
    pub liquidation_threshold: U256,
    pub loan_id: U256,
    pub health_factor: U256,
}

impl From<LoanRisk> for LoanSnapshot {
    fn from(risk: LoanRisk) -> Self {
        Self {
            total_collateral_in_eth: risk.total_collateral,
            total_debt_in_eth: risk.total_debt,
            available_borrows_in_eth: risk.available_borrows,
            ltv: risk.ltv,
            liquidation_threshold: risk.liquidation_threshold,
            loan_id: risk.loan_id,
            health_factor: risk.health_factor,
        }
    }
}
