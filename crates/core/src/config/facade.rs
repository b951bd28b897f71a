//! Fixed collaborators of the aggregation facade.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Addresses the facade is constructed with. Not reconfigurable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacadeConfig {
    /// Incentives controller; `None` (or the zero address) disables all
    /// incentive fields
    #[serde(default)]
    pub incentives_controller: Option<Address>,
    /// Oracle pricing fungible reserves
    pub reserve_oracle: Address,
    /// Oracle pricing NFT collections
    pub nft_oracle: Address,
}

impl FacadeConfig {
    /// Configuration without an incentives controller.
    pub fn new(reserve_oracle: Address, nft_oracle: Address) -> Self {
        Self {
            incentives_controller: None,
            reserve_oracle,
            nft_oracle,
        }
    }

    /// Set the incentives controller.
    pub fn with_incentives(mut self, controller: Address) -> Self {
        self.incentives_controller = Some(controller).filter(|a| !a.is_zero());
        self
    }

    pub fn incentives_enabled(&self) -> bool {
        self.incentives_controller.is_some_and(|a| !a.is_zero())
    }
}
