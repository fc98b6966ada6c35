// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for shape arithmetic and array access.

use crate::ElementType;

/// Errors that can occur while building shapes or accessing array elements.
///
/// Every variant describes a caller-side precondition violation. Operations
/// that fail leave the array untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdError {
    /// The coordinate has a different number of components than the array has dimensions.
    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An index is at or past its extent.
    ///
    /// `axis` names the coordinate component that failed. It is `None` for a
    /// flat offset, in which case `index` is the offset and `extent` the
    /// element count.
    #[error("index {index} out of bounds for {} with extent {extent}", axis_label(.axis))]
    OutOfBounds {
        axis: Option<usize>,
        index: usize,
        extent: usize,
    },

    /// A coordinate component is negative. From-the-end indexing is not supported.
    #[error("negative index {index} on axis {axis}")]
    NegativeIndex { axis: usize, index: isize },

    /// Initial flat data does not hold exactly one value per element.
    #[error("data length mismatch: shape needs {expected} elements, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// The requested scalar kind differs from the array's declared element type.
    #[error("type mismatch: array holds {expected}, accessed as {actual}")]
    TypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },

    /// The element count (or byte size) of a shape is not representable.
    #[error("shape {dims:?} overflows the addressable size")]
    Overflow { dims: Vec<usize> },

    /// The shape has no dimensions or contains a zero-length dimension.
    #[error("invalid shape {dims:?}: {reason}")]
    InvalidShape {
        dims: Vec<usize>,
        reason: &'static str,
    },

    /// A reshape was requested between shapes holding different element counts.
    #[error("cannot reshape {from} elements into {to}")]
    SizeMismatch { from: usize, to: usize },

    /// Two arrays that must share a shape do not.
    #[error("shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// An element type code was not recognised.
    #[error("unknown element type '{0}'")]
    UnknownElementType(String),

    /// A shared array's lock was poisoned by a panicking writer.
    #[error("array lock poisoned")]
    LockPoisoned,
}

impl NdError {
    /// Out-of-range flat offset.
    pub(crate) fn offset_out_of_bounds(offset: usize, size: usize) -> Self {
        NdError::OutOfBounds {
            axis: None,
            index: offset,
            extent: size,
        }
    }

    /// Returns `true` for an out-of-range coordinate component or offset.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, NdError::OutOfBounds { .. })
    }
}

fn axis_label(axis: &Option<usize>) -> String {
    match axis {
        Some(axis) => format!("axis {axis}"),
        None => "flat offset".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_messages() {
        let axis = NdError::OutOfBounds {
            axis: Some(1),
            index: 3,
            extent: 3,
        };
        assert_eq!(
            axis.to_string(),
            "index 3 out of bounds for axis 1 with extent 3"
        );
        let flat = NdError::offset_out_of_bounds(4, 4);
        assert_eq!(
            flat.to_string(),
            "index 4 out of bounds for flat offset with extent 4"
        );
        assert!(flat.is_out_of_bounds());
        assert!(!NdError::LockPoisoned.is_out_of_bounds());
    }
}
