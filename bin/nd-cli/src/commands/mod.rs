// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared helpers.

pub mod access;
pub mod engine;
pub mod inspect;

use crate::config::ArrayConfig;
use anyhow::Context;
use nd_core::DynArray;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads and builds the array named by `--config`.
pub fn load_array(config: Option<&Path>) -> anyhow::Result<DynArray> {
    let path = config.context("this command needs --config <FILE>")?;
    let cfg = ArrayConfig::from_file(path)?;
    cfg.build()
        .with_context(|| format!("invalid array in '{}'", path.display()))
}

/// Formats a coordinate as `[i, j, ...]`.
pub fn fmt_coordinate(coordinate: &[isize]) -> String {
    let parts: Vec<String> = coordinate.iter().map(|c| c.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::NdError;
    use std::path::PathBuf;

    fn square_config() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/square.toml")
    }

    #[test]
    fn test_fmt_coordinate() {
        assert_eq!(fmt_coordinate(&[]), "[]");
        assert_eq!(fmt_coordinate(&[3]), "[3]");
        assert_eq!(fmt_coordinate(&[0, -1, 2]), "[0, -1, 2]");
    }

    #[test]
    fn test_engine_commands() {
        engine::offset(&[2, 3], &[1, 2]).unwrap();
        engine::coord(&[2, 3], 5).unwrap();

        let err = engine::offset(&[2, 3], &[2, 0]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NdError>(),
            Some(NdError::OutOfBounds { axis: Some(0), .. })
        ));
        let err = engine::coord(&[2, 3], 6).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NdError>(),
            Some(NdError::OutOfBounds { axis: None, .. })
        ));
        let err = engine::offset(&[], &[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NdError>(),
            Some(NdError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_access_commands() {
        let path = square_config();
        access::get(Some(&path), &[1, 1]).unwrap();
        access::set(Some(&path), &[0, 1], 356.0).unwrap();

        let err = access::get(Some(&path), &[2, 0]).unwrap_err();
        assert!(err.downcast_ref::<NdError>().is_some_and(NdError::is_out_of_bounds));
        let err = access::set(Some(&path), &[0, 0], 0.5).unwrap_err();
        assert!(err.to_string().contains("i32"), "{err}");
        assert!(access::get(None, &[0, 0]).is_err());
    }

    #[test]
    fn test_load_array_reports_missing_file() {
        let err = load_array(Some(Path::new("does-not-exist.toml"))).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.toml"), "{err:#}");
    }
}
