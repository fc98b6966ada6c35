// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # nd-core
//!
//! Typed, contiguous N-dimensional arrays with row-major coordinate indexing.
//!
//! This crate provides:
//! - [`shape`]: the index engine for element counts, row-major strides, and the
//!   coordinate ⇄ offset mapping, plus the validated [`Shape`] descriptor.
//! - [`ElementType`]: the closed set of scalar kinds (i8, i16, i32, ui8,
//!   ui16, ui32, f32, f64) and the sealed [`Element`] trait tying each to a
//!   Rust primitive.
//! - [`NdArray`]: an owned array of one element type, generic over `T`.
//! - [`DynArray`]: the same array with its element type picked at runtime,
//!   with per-kind `get_*`/`set_*` entry points.
//! - [`SharedArray`]: an `Arc<RwLock<_>>` handle for concurrent access.
//!
//! # Design Goals
//! - Element type fixed at construction and enforced by the type system.
//! - Every failed access reports why and leaves the buffer untouched.
//! - Buffers are released when the owning array is dropped; there is no
//!   explicit destroy call.
//! - Clean error types via `thiserror`.
//!
//! # Example
//! ```
//! use nd_core::{NdArray, NdError, Shape};
//!
//! let a = NdArray::from_vec(Shape::vector(3)?, vec![1.0f64, 2.0, 3.0])?;
//! assert_eq!(a.get(&[2])?, 3.0);
//! assert!(matches!(a.get(&[3]), Err(NdError::OutOfBounds { .. })));
//! # Ok::<(), NdError>(())
//! ```

mod array;
mod dtype;
mod dyn_array;
mod element;
mod error;
pub mod shape;
mod shared;

pub use array::NdArray;
pub use dtype::ElementType;
pub use dyn_array::DynArray;
pub use element::{Element, Scalar};
pub use error::NdError;
pub use shape::{coordinate_to_offset, offset_to_coordinate, Shape};
pub use shared::SharedArray;
