//! Application configuration loader.
//!
//! Configuration comes from a TOML file (path in `LENDVIEW_CONFIG`) or, if
//! no file is given, from individual environment variables. String values
//! of the form `${VAR}` are expanded from the environment.
//!
//! ```toml
//! [rpc]
//! http = "${RPC_URL}"
//!
//! [contracts]
//! registry = "0x..."
//! reserve_oracle = "0x..."
//! nft_oracle = "0x..."
//! incentives = "0x..."   # optional
//! ```

use super::FacadeConfig;
use alloy::primitives::Address;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable names.
pub mod env {
    pub const CONFIG: &str = "LENDVIEW_CONFIG";
    pub const RPC_URL: &str = "RPC_URL";
    pub const REGISTRY: &str = "REGISTRY";
    pub const RESERVE_ORACLE: &str = "RESERVE_ORACLE";
    pub const NFT_ORACLE: &str = "NFT_ORACLE";
    pub const INCENTIVES: &str = "INCENTIVES";
}

/// Raw application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// RPC endpoints
    pub rpc: RpcConfig,
    /// Contract addresses
    pub contracts: ContractsConfig,
}

/// RPC endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// HTTP JSON-RPC URL
    #[serde(default = "default_http")]
    pub http: String,
}

fn default_http() -> String {
    "http://localhost:8545".to_string()
}

/// Contract addresses as written in the config (may reference env vars).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// Protocol address registry
    pub registry: String,
    /// Reserve price oracle
    pub reserve_oracle: String,
    /// NFT price oracle
    pub nft_oracle: String,
    /// Incentives controller (optional)
    #[serde(default)]
    pub incentives: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub rpc_url: String,
    pub registry: Address,
    pub facade: FacadeConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build configuration from individual environment variables.
    pub fn from_env() -> Result<Self> {
        let get_env = |name: &str| -> Result<String> {
            std::env::var(name).map_err(|_| anyhow::anyhow!("Missing env var: {}", name))
        };

        Ok(Self {
            rpc: RpcConfig {
                http: std::env::var(env::RPC_URL).unwrap_or_else(|_| default_http()),
            },
            contracts: ContractsConfig {
                registry: get_env(env::REGISTRY)?,
                reserve_oracle: get_env(env::RESERVE_ORACLE)?,
                nft_oracle: get_env(env::NFT_ORACLE)?,
                incentives: std::env::var(env::INCENTIVES).ok(),
            },
        })
    }

    /// Expand env references and parse addresses.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let contracts = &self.contracts;

        let incentives = match contracts.incentives.as_deref().map(expand_env) {
            Some(value) if !value.trim().is_empty() => {
                Some(parse_address("incentives", &value)?).filter(|a| !a.is_zero())
            }
            _ => None,
        };

        let facade = FacadeConfig {
            incentives_controller: incentives,
            reserve_oracle: parse_address("reserve_oracle", &expand_env(&contracts.reserve_oracle))?,
            nft_oracle: parse_address("nft_oracle", &expand_env(&contracts.nft_oracle))?,
        };

        Ok(ResolvedConfig {
            rpc_url: expand_env(&self.rpc.http),
            registry: parse_address("registry", &expand_env(&contracts.registry))?,
            facade,
        })
    }
}

/// Load configuration from `LENDVIEW_CONFIG` if set, otherwise from the environment.
pub fn load_config() -> Result<ResolvedConfig> {
    let config = match std::env::var(env::CONFIG) {
        Ok(path) => {
            info!(path = %path, "Loading configuration file");
            AppConfig::from_file(&path)?
        }
        Err(_) => {
            info!("Loading configuration from environment");
            AppConfig::from_env()?
        }
    };

    let resolved = config.resolve()?;
    info!(
        registry = %resolved.registry,
        reserve_oracle = %resolved.facade.reserve_oracle,
        nft_oracle = %resolved.facade.nft_oracle,
        incentives = resolved.facade.incentives_enabled(),
        "Configuration resolved"
    );
    Ok(resolved)
}

/// Expand a whole-value `${VAR}` reference; anything else is returned as is.
fn expand_env(s: &str) -> String {
    let s = s.trim();
    if s.starts_with("${") && s.ends_with('}') {
        let var_name = &s[2..s.len() - 1];
        std::env::var(var_name).unwrap_or_else(|_| s.to_string())
    } else {
        s.to_string()
    }
}

fn parse_address(name: &str, value: &str) -> Result<Address> {
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address for {}: {}", name, e))
}
