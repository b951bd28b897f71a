//! Configuration for the view service.
//!
//! This module provides:
//! - Facade configuration (the oracle and incentives addresses fixed for the
//!   facade's lifetime)
//! - Application configuration loaded from TOML or environment variables
//!   (RPC endpoint, registry address)

mod facade;
mod loader;

pub use facade::FacadeConfig;
pub use loader::{env, load_config, AppConfig, ContractsConfig, ResolvedConfig, RpcConfig};
