//! Lending protocol view aggregation.
//!
//! This crate provides the read-only facade a UI queries for composite
//! protocol state:
//! - Reserve snapshots and user reserve positions, with optional incentives
//! - NFT collateral pool snapshots and user NFT positions
//! - Batched per-loan risk snapshots
//!
//! Every query pins one chain state and re-resolves the protocol's ledgers
//! from the registry it is given.

pub mod config;
mod context;
mod error;
mod facade;
mod incentives;
mod loan;
#[cfg(test)]
mod mock;
mod nft;
mod reserve;

pub use config::{load_config, AppConfig, FacadeConfig, ResolvedConfig};
pub use error::{Result, ViewError};
pub use facade::{AggregationFacade, NftsView, ReservesView};
pub use incentives::{IncentivesGate, IncentivesSnapshot};
pub use loan::{LoanRequest, LoanSnapshot};
pub use nft::{NftSnapshot, UserNftPosition};
pub use reserve::{ReserveSnapshot, UserReservePosition};
