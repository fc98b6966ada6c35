// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # nd
//!
//! Command-line harness for nd-core arrays.
//!
//! ## Usage
//! ```bash
//! # Describe an array loaded from TOML
//! nd --config array.toml inspect
//!
//! # Read and write single elements
//! nd --config array.toml get --index 0,1
//! nd --config array.toml set --index 0,1 --value 356
//!
//! # Run the index engine directly
//! nd offset --shape 2,3 --index 1,2
//! nd coord --shape 2,3 --offset 5
//! ```

mod commands;
mod config;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nd",
    about = "Inspect and index typed N-dimensional arrays",
    version,
    author
)]
struct Cli {
    /// Path to a TOML file describing the array (dtype, shape, data).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print element type, shape, strides and contents of the configured array.
    Inspect,

    /// Print the element at a coordinate.
    Get {
        /// Comma-separated coordinate, e.g. "0,1".
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        index: Vec<isize>,
    },

    /// Write an element and print the updated array.
    Set {
        /// Comma-separated coordinate, e.g. "0,1".
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        index: Vec<isize>,

        /// New value, converted to the array's element type.
        #[arg(long, allow_hyphen_values = true)]
        value: f64,
    },

    /// Map a coordinate to its row-major offset.
    Offset {
        /// Comma-separated extents, e.g. "2,3".
        #[arg(short, long, value_delimiter = ',', required = true)]
        shape: Vec<usize>,

        /// Comma-separated coordinate.
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        index: Vec<isize>,
    },

    /// Map a row-major offset back to its coordinate.
    Coord {
        /// Comma-separated extents, e.g. "2,3".
        #[arg(short, long, value_delimiter = ',', required = true)]
        shape: Vec<usize>,

        /// Flat offset.
        #[arg(short, long)]
        offset: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect => commands::inspect::execute(cli.config.as_deref()),
        Commands::Get { index } => commands::access::get(cli.config.as_deref(), &index),
        Commands::Set { index, value } => {
            commands::access::set(cli.config.as_deref(), &index, value)
        }
        Commands::Offset { shape, index } => commands::engine::offset(&shape, &index),
        Commands::Coord { shape, offset } => commands::engine::coord(&shape, offset),
    }
}
