//! lendview
//!
//! Command-line front end for the lending protocol view facade.
//! Prints composite reserve, NFT pool and loan views as JSON.
//!
//! ```text
//! lendview reserves [user]
//! lendview nfts [user]
//! lendview loans <asset>:<token_id> ...
//! lendview list
//! ```

use alloy::primitives::{Address, U256};
use alloy::providers::ProviderBuilder;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lendview_chain::RpcStateSource;
use lendview_core::{load_config, AggregationFacade};

const USAGE: &str = "usage: lendview <reserves [user] | nfts [user] | loans <asset>:<token_id>... | list>";

/// Parsed command line.
#[derive(Debug)]
enum Command {
    Reserves { user: Option<Address> },
    Nfts { user: Option<Address> },
    Loans { assets: Vec<Address>, token_ids: Vec<U256> },
    List,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Listing {
    reserves: Vec<Address>,
    nfts: Vec<Address>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lendview_core=debug,lendview_chain=debug")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(&args)?;

    let config = load_config()?;

    let provider = ProviderBuilder::new().on_http(
        config
            .rpc_url
            .parse()
            .with_context(|| format!("Invalid RPC URL: {}", config.rpc_url))?,
    );
    let source = RpcStateSource::new(provider);

    let chain_id = source.chain_id().await?;
    info!(rpc = %config.rpc_url, chain_id = chain_id, "Connected");

    let facade = AggregationFacade::new(source, config.facade);
    let registry = config.registry;

    let output = match command {
        Command::Reserves { user } => {
            serde_json::to_string_pretty(&facade.get_reserves_view(registry, user).await?)?
        }
        Command::Nfts { user } => {
            serde_json::to_string_pretty(&facade.get_nfts_data(registry, user).await?)?
        }
        Command::Loans { assets, token_ids } => serde_json::to_string_pretty(
            &facade
                .get_loan_snapshots(registry, &assets, &token_ids)
                .await?,
        )?,
        Command::List => {
            let (reserves, nfts) =
                tokio::try_join!(facade.list_reserves(registry), facade.list_nfts(registry))?;
            serde_json::to_string_pretty(&Listing { reserves, nfts })?
        }
    };

    println!("{}", output);
    Ok(())
}

fn parse_command(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    match name.as_str() {
        "reserves" => Ok(Command::Reserves {
            user: parse_user(rest)?,
        }),
        "nfts" => Ok(Command::Nfts {
            user: parse_user(rest)?,
        }),
        "loans" => {
            if rest.is_empty() {
                bail!(USAGE);
            }
            let (assets, token_ids): (Vec<Address>, Vec<U256>) = rest
                .iter()
                .map(|arg| parse_loan(arg))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .unzip();
            Ok(Command::Loans { assets, token_ids })
        }
        "list" => Ok(Command::List),
        other => bail!("Unknown command: {}\n{}", other, USAGE),
    }
}

fn parse_user(args: &[String]) -> Result<Option<Address>> {
    match args {
        [] => Ok(None),
        [user] => Ok(Some(
            user.parse()
                .map_err(|e| anyhow::anyhow!("Invalid user address {}: {}", user, e))?,
        )),
        _ => bail!(USAGE),
    }
}

/// Parse `<asset>:<token_id>`.
fn parse_loan(arg: &str) -> Result<(Address, U256)> {
    let (asset, token_id) = arg
        .split_once(':')
        .with_context(|| format!("Expected <asset>:<token_id>, got {}", arg))?;

    let asset = asset
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid asset address {}: {}", asset, e))?;
    let token_id = token_id
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid token id {}: {}", token_id, e))?;

    Ok((asset, token_id))
}
