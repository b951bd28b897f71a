//! RPC clients for the protocol's contracts.
//!
//! [`RpcContract`] is one contract address bound to a provider and a pinned
//! block. It implements every collaborator trait; the [`crate::Resolver`]
//! hands it out behind whichever trait the caller asked for, and the call
//! only succeeds if the contract at that address speaks the matching ABI.

pub mod bindings;

use crate::oracle::PriceOracle;
use crate::protocol::{
    IncentiveAssetData, IncentivesService, LoanLedger, LoanRisk, NftConfiguration, NftRecord,
    PoolLedger, RateCurve, Registry, ReserveConfiguration, ReserveRecord,
};
use crate::tokens::{ScaledToken, TokenBalance, TokenMetadata};
use alloy::eips::BlockId;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use anyhow::Result;
use async_trait::async_trait;
use bindings::{
    IERC20Detailed, IIncentivesController, IInterestRate, ILendPool, ILendPoolAddressesProvider,
    ILendPoolLoan, IPriceOracleGetter, IScaledBalanceToken,
};
use std::sync::Arc;

/// A contract address read at a fixed block.
pub struct RpcContract<P> {
    address: Address,
    provider: Arc<P>,
    block: BlockId,
}

impl<P> std::fmt::Debug for RpcContract<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcContract")
            .field("address", &self.address)
            .field("block", &self.block)
            .finish()
    }
}

impl<P> RpcContract<P> {
    pub fn new(address: Address, provider: Arc<P>, block: BlockId) -> Self {
        Self {
            address,
            provider,
            block,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn block(&self) -> BlockId {
        self.block
    }
}

impl From<bindings::ReserveData> for ReserveRecord {
    fn from(data: bindings::ReserveData) -> Self {
        Self {
            configuration: ReserveConfiguration::new(data.configuration.data),
            liquidity_index: data.liquidityIndex,
            variable_borrow_index: data.variableBorrowIndex,
            current_liquidity_rate: data.currentLiquidityRate,
            current_variable_borrow_rate: data.currentVariableBorrowRate,
            last_update_timestamp: u64::try_from(data.lastUpdateTimestamp).unwrap_or(u64::MAX),
            b_token_address: data.bTokenAddress,
            debt_token_address: data.debtTokenAddress,
            interest_rate_address: data.interestRateAddress,
            id: data.id,
        }
    }
}

impl From<bindings::NftData> for NftRecord {
    fn from(data: bindings::NftData) -> Self {
        Self {
            configuration: NftConfiguration::new(data.configuration.data),
            b_nft_address: data.bNftAddress,
            id: data.id,
            max_supply: data.maxSupply,
            max_token_id: data.maxTokenId,
        }
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> Registry for RpcContract<P> {
    async fn pool_ledger(&self) -> Result<Address> {
        let contract = ILendPoolAddressesProvider::new(self.address, &*self.provider);
        Ok(contract.getLendPool().block(self.block).call().await?._0)
    }

    async fn loan_ledger(&self) -> Result<Address> {
        let contract = ILendPoolAddressesProvider::new(self.address, &*self.provider);
        Ok(contract.getLendPoolLoan().block(self.block).call().await?._0)
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> PoolLedger for RpcContract<P> {
    async fn reserves_list(&self) -> Result<Vec<Address>> {
        let contract = ILendPool::new(self.address, &*self.provider);
        Ok(contract.getReservesList().block(self.block).call().await?._0)
    }

    async fn reserve_data(&self, asset: Address) -> Result<ReserveRecord> {
        let contract = ILendPool::new(self.address, &*self.provider);
        let data = contract.getReserveData(asset).block(self.block).call().await?._0;
        Ok(data.into())
    }

    async fn nfts_list(&self) -> Result<Vec<Address>> {
        let contract = ILendPool::new(self.address, &*self.provider);
        Ok(contract.getNftsList().block(self.block).call().await?._0)
    }

    async fn nft_data(&self, asset: Address) -> Result<NftRecord> {
        let contract = ILendPool::new(self.address, &*self.provider);
        let data = contract.getNftData(asset).block(self.block).call().await?._0;
        Ok(data.into())
    }

    async fn loan_risk(&self, asset: Address, token_id: U256) -> Result<LoanRisk> {
        let contract = ILendPool::new(self.address, &*self.provider);
        let loan = contract
            .getNftLoanData(asset, token_id)
            .block(self.block)
            .call()
            .await?;

        Ok(LoanRisk {
            total_collateral: loan.totalCollateral,
            total_debt: loan.totalDebt,
            available_borrows: loan.availableBorrows,
            ltv: loan.ltv,
            liquidation_threshold: loan.liquidationThreshold,
            loan_id: loan.loanId,
            health_factor: loan.healthFactor,
        })
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> LoanLedger for RpcContract<P> {
    async fn nft_collateral_amount(&self, asset: Address) -> Result<U256> {
        let contract = ILendPoolLoan::new(self.address, &*self.provider);
        Ok(contract
            .getNftCollateralAmount(asset)
            .block(self.block)
            .call()
            .await?
            ._0)
    }

    async fn user_nft_collateral_amount(&self, user: Address, asset: Address) -> Result<U256> {
        let contract = ILendPoolLoan::new(self.address, &*self.provider);
        Ok(contract
            .getUserNftCollateralAmount(user, asset)
            .block(self.block)
            .call()
            .await?
            ._0)
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> PriceOracle for RpcContract<P> {
    async fn asset_price(&self, asset: Address) -> Result<U256> {
        let contract = IPriceOracleGetter::new(self.address, &*self.provider);
        Ok(contract.getAssetPrice(asset).block(self.block).call().await?._0)
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> IncentivesService for RpcContract<P> {
    async fn asset_data(&self, asset: Address) -> Result<IncentiveAssetData> {
        let contract = IIncentivesController::new(self.address, &*self.provider);
        let data = contract.getAssetData(asset).block(self.block).call().await?;

        Ok(IncentiveAssetData {
            index: data.index,
            emission_per_second: data.emissionPerSecond,
            last_update_timestamp: data.lastUpdateTimestamp,
        })
    }

    async fn user_asset_index(&self, user: Address, asset: Address) -> Result<U256> {
        let contract = IIncentivesController::new(self.address, &*self.provider);
        Ok(contract
            .getUserAssetData(user, asset)
            .block(self.block)
            .call()
            .await?
            ._0)
    }

    async fn user_unclaimed_rewards(&self, user: Address) -> Result<U256> {
        let contract = IIncentivesController::new(self.address, &*self.provider);
        Ok(contract
            .getUserUnclaimedRewards(user)
            .block(self.block)
            .call()
            .await?
            ._0)
    }

    async fn distribution_end(&self) -> Result<U256> {
        let contract = IIncentivesController::new(self.address, &*self.provider);
        Ok(contract.DISTRIBUTION_END().block(self.block).call().await?._0)
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> RateCurve for RpcContract<P> {
    async fn variable_rate_slope1(&self) -> Result<U256> {
        let contract = IInterestRate::new(self.address, &*self.provider);
        Ok(contract.variableRateSlope1().block(self.block).call().await?._0)
    }

    async fn variable_rate_slope2(&self) -> Result<U256> {
        let contract = IInterestRate::new(self.address, &*self.provider);
        Ok(contract.variableRateSlope2().block(self.block).call().await?._0)
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> TokenMetadata for RpcContract<P> {
    async fn symbol(&self) -> Result<String> {
        let contract = IERC20Detailed::new(self.address, &*self.provider);
        Ok(contract.symbol().block(self.block).call().await?._0)
    }

    async fn name(&self) -> Result<String> {
        let contract = IERC20Detailed::new(self.address, &*self.provider);
        Ok(contract.name().block(self.block).call().await?._0)
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> TokenBalance for RpcContract<P> {
    async fn balance_of(&self, owner: Address) -> Result<U256> {
        let contract = IERC20Detailed::new(self.address, &*self.provider);
        Ok(contract.balanceOf(owner).block(self.block).call().await?._0)
    }
}

#[async_trait]
impl<P: Provider + Send + Sync + 'static> ScaledToken for RpcContract<P> {
    async fn scaled_balance_of(&self, user: Address) -> Result<U256> {
        let contract = IScaledBalanceToken::new(self.address, &*self.provider);
        Ok(contract.scaledBalanceOf(user).block(self.block).call().await?._0)
    }

    async fn scaled_total_supply(&self) -> Result<U256> {
        let contract = IScaledBalanceToken::new(self.address, &*self.provider);
        Ok(contract.scaledTotalSupply().block(self.block).call().await?._0)
    }
}
