// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Inspects and validates swap genesis files.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context as _, Result};
use clap::Parser as _;
use fury_swap::{
    coin::validate_denom, pool_id::pool_id, store::memory::MemoryStore, GenesisState,
    Import as _, SwapState,
};
use tracing::{debug, info};

/// Command line parameters of the swap tool.
#[derive(Debug, clap::Parser)]
#[command(name = "fury-swap", version, about)]
struct SwapOptions {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Print the canonical identifier of the pool holding two denominations.
    PoolId {
        /// One denomination of the pool.
        denom_a: String,
        /// The other denomination of the pool.
        denom_b: String,
    },

    /// Validate a genesis file.
    Validate {
        /// The path of the JSON genesis file.
        genesis: PathBuf,
    },

    /// Print a validated genesis file in another encoding.
    Show {
        /// The path of the JSON genesis file.
        genesis: PathBuf,

        /// The output encoding.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Load a genesis file into an in-memory store, export it back and compare.
    Load {
        /// The path of the JSON genesis file.
        genesis: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    fury_swap::tracing::init("fury-swap")?;
    let options = SwapOptions::parse();

    match options.command {
        Command::PoolId { denom_a, denom_b } => {
            validate_denom(&denom_a)?;
            validate_denom(&denom_b)?;
            ensure!(denom_a != denom_b, "a pool needs two distinct denominations");
            println!("{}", pool_id(&denom_a, &denom_b));
        }
        Command::Validate { genesis } => {
            let state = read_genesis(&genesis)?;
            info!(
                pools = state.pool_records.len(),
                share_records = state.share_records.len(),
                allowed_pools = state.params.allowed_pools.len(),
                "genesis file {} is valid",
                genesis.display()
            );
        }
        Command::Show { genesis, format } => {
            let state = read_genesis(&genesis)?;
            let output = match format {
                Format::Json => serde_json::to_string_pretty(&state)? + "\n",
                Format::Yaml => serde_yaml::to_string(&state)?,
            };
            print!("{output}");
        }
        Command::Load { genesis } => {
            let state = read_genesis(&genesis)?;
            let store = MemoryStore::new();
            let swap_state = SwapState::new(store.clone());
            swap_state.init_genesis(&state)?;
            debug!(keys = store.len()?, "loaded genesis into memory");

            let exported = swap_state.export_genesis()?;
            exported.validate()?;
            ensure!(
                same_contents(&state, &exported),
                "exported genesis state differs from {}",
                genesis.display()
            );
            info!(
                pools = exported.pool_records.len(),
                share_records = exported.share_records.len(),
                "genesis file {} survives a load and export",
                genesis.display()
            );
        }
    }

    Ok(())
}

/// Reads and validates a genesis file.
fn read_genesis(path: &Path) -> Result<GenesisState> {
    let state = GenesisState::read(path)
        .with_context(|| format!("failed to read genesis file {}", path.display()))?;
    state
        .validate()
        .with_context(|| format!("invalid genesis file {}", path.display()))?;
    Ok(state)
}

/// Compares two genesis states, ignoring the order of their records.
fn same_contents(left: &GenesisState, right: &GenesisState) -> bool {
    let sorted_pools = |state: &GenesisState| {
        let mut records = state.pool_records.0.clone();
        records.sort_by(|a, b| a.pool_id.cmp(&b.pool_id));
        records
    };
    let sorted_shares = |state: &GenesisState| {
        let mut records = state.share_records.0.clone();
        records.sort_by(|a, b| (&a.depositor, &a.pool_id).cmp(&(&b.depositor, &b.pool_id)));
        records
    };
    left.params == right.params
        && sorted_pools(left) == sorted_pools(right)
        && sorted_shares(left) == sorted_shares(right)
}
