// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nd offset` / `nd coord` commands: the index engine without an array.

use nd_core::{coordinate_to_offset, offset_to_coordinate};

pub fn offset(shape: &[usize], index: &[isize]) -> anyhow::Result<()> {
    let offset = coordinate_to_offset(shape, index)?;
    println!("{offset}");
    Ok(())
}

pub fn coord(shape: &[usize], offset: usize) -> anyhow::Result<()> {
    let coordinate = offset_to_coordinate(shape, offset)?;
    println!("{}", super::fmt_coordinate(&coordinate));
    Ok(())
}
