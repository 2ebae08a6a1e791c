//! wo-inspect - work object inspection tool
//!
//! Decodes work objects from hex or binary files, prints their hashes and
//! lists the locations of the configured hierarchy.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use quai_work_object::{
    config::ConfigOverrides, logging::init_logging, AddressScope, Config, Hash, Header, Location,
    NodeInfoFile, WorkObject, WorkObjectView, APP_NAME, APP_VERSION, EMPTY_ROOT_HASH,
    EMPTY_UNCLE_HASH,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Parser)]
#[command(
    name = APP_NAME,
    version = APP_VERSION,
    about = "Inspect work objects of a hierarchical proof-of-work chain"
)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a work object and print a JSON summary
    Decode {
        /// Wire view the bytes were encoded with
        #[arg(long, default_value = "block")]
        view: WorkObjectView,

        /// Location used to resolve address scope (`prime`, `r` or `r,z`)
        #[arg(long, default_value = "prime")]
        location: Location,

        /// Read raw bytes from a file instead of hex
        #[arg(long, value_name = "PATH", conflicts_with = "hex")]
        file: Option<PathBuf>,

        /// Hex-encoded work object
        #[arg(required_unless_present = "file")]
        hex: Option<String>,
    },

    /// List every zone location of the configured hierarchy
    Locations,

    /// Print the well-known empty roots and the empty header hash
    EmptyHashes,
}

#[derive(Debug, Serialize)]
struct Summary {
    view: WorkObjectView,
    hash: Hash,
    seal_hash: Hash,
    header_hash: Hash,
    parent_hash: Hash,
    number: String,
    difficulty: String,
    location: String,
    primary_coinbase: String,
    coinbase_scope: AddressScope,
    time: u64,
    nonce: String,
    uncles: usize,
    transactions: usize,
    outbound_etxs: usize,
    has_tx: bool,
}

impl Summary {
    fn new(view: WorkObjectView, wo: &WorkObject) -> Self {
        let header = wo.wo_header();
        Self {
            view,
            hash: wo.hash(),
            seal_hash: wo.seal_hash(),
            header_hash: header.header_hash(),
            parent_hash: header.parent_hash(),
            number: header.number().to_string(),
            difficulty: header.difficulty().to_string(),
            location: header.location().to_string(),
            primary_coinbase: header.primary_coinbase().to_hex(),
            coinbase_scope: header.primary_coinbase().scope(),
            time: header.time(),
            nonce: header.nonce().to_string(),
            uncles: wo.body().uncles().len(),
            transactions: wo.body().transactions().len(),
            outbound_etxs: wo.body().outbound_etxs().len(),
            has_tx: wo.tx().is_some(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.overrides)
        .await
        .context("failed to load configuration")?;

    init_logging(config.log_level, config.log_format);
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Decode {
            view,
            location,
            file,
            hex,
        } => decode(&config, view, location, file, hex).await,
        Command::Locations => {
            for location in config.hierarchy.locations() {
                println!("{location}\t{}", hex::encode(location.as_slice()));
            }
            Ok(())
        }
        Command::EmptyHashes => {
            println!("empty_root_hash   {EMPTY_ROOT_HASH}");
            println!("empty_uncle_hash  {EMPTY_UNCLE_HASH}");
            println!("empty_header_hash {}", Header::empty().hash());
            Ok(())
        }
    }
}

async fn decode(
    config: &Config,
    view: WorkObjectView,
    location: Location,
    file: Option<PathBuf>,
    hex_input: Option<String>,
) -> anyhow::Result<()> {
    location
        .validate_in(&config.hierarchy)
        .context("location outside the configured hierarchy")?;

    let bytes = match (file, hex_input) {
        (Some(path), _) => tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(input)) => {
            let input = input.trim();
            hex::decode(input.strip_prefix("0x").unwrap_or(input)).context("invalid hex input")?
        }
        (None, None) => bail!("either a hex argument or --file is required"),
    };

    let wo = WorkObject::decode(&bytes, &location, view)
        .with_context(|| format!("failed to decode {} bytes as {view}", bytes.len()))?;
    let summary = Summary::new(view, &wo);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    info!(%view, hash = %summary.hash, "decoded work object");

    let node_info = NodeInfoFile::from_config(config);
    match node_info.save(format!("{view} {}", summary.hash)) {
        Some(task) => {
            if let Err(e) = task.await {
                warn!(error = %e, "node info task did not complete");
            }
        }
        None => warn!("node info not recorded"),
    }

    Ok(())
}
