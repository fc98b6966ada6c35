// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nd get` / `nd set` commands: single-element access on the configured array.

use crate::config::scalar_from_f64;
use anyhow::Context;
use std::path::Path;

pub fn get(config: Option<&Path>, index: &[isize]) -> anyhow::Result<()> {
    let array = super::load_array(config)?;
    let value = array
        .get_scalar(index)
        .with_context(|| format!("cannot read {}", super::fmt_coordinate(index)))?;
    println!("{value}");
    Ok(())
}

pub fn set(config: Option<&Path>, index: &[isize], value: f64) -> anyhow::Result<()> {
    let mut array = super::load_array(config)?;
    let scalar = scalar_from_f64(array.dtype(), value)?;
    array
        .set_scalar(index, scalar)
        .with_context(|| format!("cannot write {}", super::fmt_coordinate(index)))?;
    tracing::info!(index = ?index, %scalar, "element written");
    println!("{array}");
    Ok(())
}
