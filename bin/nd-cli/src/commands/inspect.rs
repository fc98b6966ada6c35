// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nd inspect` command: describe the configured array.

use std::path::Path;

pub fn execute(config: Option<&Path>) -> anyhow::Result<()> {
    let array = super::load_array(config)?;
    let shape = array.shape();

    println!("  Element type: {}", array.dtype());
    println!("  Shape:        {shape}");
    println!("  Dimensions:   {}", array.ndim());
    println!("  Size:         {} elements", array.size());
    println!("  Strides:      {:?}", shape.strides());
    println!("  Bytes:        {}", array.size_bytes());
    println!();
    println!("  {array}");
    Ok(())
}
