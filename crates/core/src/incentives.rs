//! Optional incentives controller gating.
//!
//! A deployment may run without an incentives controller. The gate is
//! resolved once per query and every builder reads incentive data through
//! it, so the disabled path is identical for reserves, positions and totals:
//! zero values and no controller calls.

use alloy::primitives::{Address, U256};
use anyhow::Result;
use lendview_chain::{IncentiveAssetData, IncentivesService, Resolver};
use serde::Serialize;
use std::sync::Arc;

/// Reward totals that are not tied to a single reserve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncentivesSnapshot {
    /// Zero when no user was given or incentives are disabled
    pub user_unclaimed_rewards: U256,
    /// Zero when incentives are disabled
    pub emission_end_timestamp: U256,
}

/// Incentives controller for one query, if the deployment has one.
#[derive(Debug, Clone)]
pub enum IncentivesGate {
    Disabled,
    Enabled(Arc<dyn IncentivesService>),
}

impl IncentivesGate {
    /// Bind the configured controller (if any) in the query's state view.
    pub fn resolve(resolver: &dyn Resolver, controller: Option<Address>) -> Self {
        match controller {
            Some(address) if !address.is_zero() => Self::Enabled(resolver.incentives(address)),
            _ => Self::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Emission state of an incentivised token.
    pub async fn asset_data(&self, token: Address) -> Result<IncentiveAssetData> {
        match self {
            Self::Disabled => Ok(IncentiveAssetData::default()),
            Self::Enabled(controller) => controller.asset_data(token).await,
        }
    }

    /// `user`'s index for an incentivised token.
    pub async fn user_index(&self, user: Address, token: Address) -> Result<U256> {
        match self {
            Self::Disabled => Ok(U256::ZERO),
            Self::Enabled(controller) => controller.user_asset_index(user, token).await,
        }
    }

    pub async fn unclaimed_rewards(&self, user: Option<Address>) -> Result<U256> {
        match (self, user) {
            (Self::Enabled(controller), Some(user)) => controller.user_unclaimed_rewards(user).await,
            _ => Ok(U256::ZERO),
        }
    }

    pub async fn emission_end(&self) -> Result<U256> {
        match self {
            Self::Disabled => Ok(U256::ZERO),
            Self::Enabled(controller) => controller.distribution_end().await,
        }
    }

    /// Unclaimed rewards and emission end in one go.
    pub async fn snapshot(&self, user: Option<Address>) -> Result<IncentivesSnapshot> {
        let (user_unclaimed_rewards, emission_end_timestamp) =
            tokio::try_join!(self.unclaimed_rewards(user), self.emission_end())?;

        Ok(IncentivesSnapshot {
            user_unclaimed_rewards,
            emission_end_timestamp,
        })
    }
}
