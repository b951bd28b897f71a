//! Lending protocol chain interaction layer.
//!
//! This crate provides:
//! - Collaborator traits for the registry, pool ledger, loan ledger, oracles,
//!   incentives controller, rate strategies and tokens
//! - Raw upstream record types and configuration word decoding
//! - State views: one [`Resolver`] per query, all reads pinned to one block
//! - Alloy contract bindings implementing every collaborator over JSON-RPC

pub mod contracts;
pub mod oracle;
pub mod protocol;
mod provider;
mod resolver;
mod tokens;

pub use contracts::RpcContract;
pub use oracle::PriceOracle;
pub use protocol::{
    IncentiveAssetData, IncentivesService, LoanLedger, LoanRisk, NftConfiguration, NftRecord,
    PoolLedger, RateCurve, Registry, ReserveConfiguration, ReserveRecord,
};
pub use provider::{RpcResolver, RpcStateSource};
pub use resolver::{Resolver, StateSource};
pub use tokens::{ScaledToken, TokenBalance, TokenMetadata};
