//! Contract bindings for the lending protocol's read surface.
//!
//! Only view functions are declared; the view layer never sends
//! transactions.

use alloy::sol;

sol! {
    /// Packed reserve configuration word
    #[derive(Debug)]
    struct ReserveConfigurationMap {
        uint256 data;
    }

    /// Packed NFT configuration word
    #[derive(Debug)]
    struct NftConfigurationMap {
        uint256 data;
    }

    /// Reserve record as stored by the lend pool
    #[derive(Debug)]
    struct ReserveData {
        ReserveConfigurationMap configuration;
        uint128 liquidityIndex;
        uint128 variableBorrowIndex;
        uint128 currentLiquidityRate;
        uint128 currentVariableBorrowRate;
        uint40 lastUpdateTimestamp;
        address bTokenAddress;
        address debtTokenAddress;
        address interestRateAddress;
        uint8 id;
    }

    /// NFT pool record as stored by the lend pool
    #[derive(Debug)]
    struct NftData {
        NftConfigurationMap configuration;
        address bNftAddress;
        uint8 id;
        uint256 maxSupply;
        uint256 maxTokenId;
    }

    /// Protocol address registry
    #[sol(rpc)]
    interface ILendPoolAddressesProvider {
        function getLendPool() external view returns (address);
        function getLendPoolLoan() external view returns (address);
    }

    /// Lend pool (view subset)
    #[sol(rpc)]
    interface ILendPool {
        function getReservesList() external view returns (address[] memory);
        function getReserveData(address asset) external view returns (ReserveData memory);
        function getNftsList() external view returns (address[] memory);
        function getNftData(address asset) external view returns (NftData memory);
        function getNftLoanData(address nftAsset, uint256 nftTokenId) external view returns (
            uint256 totalCollateral,
            uint256 totalDebt,
            uint256 availableBorrows,
            uint256 ltv,
            uint256 liquidationThreshold,
            uint256 loanId,
            uint256 healthFactor
        );
    }

    /// Loan ledger (view subset)
    #[sol(rpc)]
    interface ILendPoolLoan {
        function getNftCollateralAmount(address nftAsset) external view returns (uint256);
        function getUserNftCollateralAmount(address user, address nftAsset) external view returns (uint256);
    }

    /// Reserve and NFT oracles share this getter
    #[sol(rpc)]
    interface IPriceOracleGetter {
        function getAssetPrice(address asset) external view returns (uint256);
    }

    /// Rewards controller
    #[sol(rpc)]
    interface IIncentivesController {
        function getAssetData(address asset) external view returns (
            uint256 index,
            uint256 emissionPerSecond,
            uint256 lastUpdateTimestamp
        );
        function getUserAssetData(address user, address asset) external view returns (uint256);
        function getUserUnclaimedRewards(address user) external view returns (uint256);
        function DISTRIBUTION_END() external view returns (uint256);
    }

    /// Interest rate strategy
    #[sol(rpc)]
    interface IInterestRate {
        function variableRateSlope1() external view returns (uint256);
        function variableRateSlope2() external view returns (uint256);
    }

    /// ERC20 / ERC721 metadata plus ERC20 balance
    #[sol(rpc)]
    interface IERC20Detailed {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function balanceOf(address account) external view returns (uint256);
    }

    /// bToken / debt token scaled accounting
    #[sol(rpc)]
    interface IScaledBalanceToken {
        function scaledBalanceOf(address user) external view returns (uint256);
        function scaledTotalSupply() external view returns (uint256);
    }
}
