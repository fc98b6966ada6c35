// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape descriptors and the row-major index engine.
//!
//! The free functions ([`size`], [`strides`], [`coordinate_to_offset`],
//! [`offset_to_coordinate`]) work on raw extents and validate them on every
//! call. [`Shape`] validates once, caches the strides, and exposes the same
//! conversions without re-checking the extents.
//!
//! # Layout
//! Row-major (C order): the last axis varies fastest.
//!
//! ```text
//! dims    = [2, 3, 4]
//! strides = [12, 4, 1]
//! offset([1, 2, 3]) = 1*12 + 2*4 + 3*1 = 23
//! ```

use crate::{ElementType, NdError};
use std::fmt;

/// Returns the number of elements described by `dims`.
///
/// Fails with [`NdError::InvalidShape`] for an empty shape or a zero-length
/// dimension and with [`NdError::Overflow`] when the product does not fit in
/// `isize` (the largest element count Rust can allocate).
///
/// # Examples
/// ```
/// assert_eq!(nd_core::shape::size(&[2, 3, 4]).unwrap(), 24);
/// assert!(nd_core::shape::size(&[]).is_err());
/// ```
pub fn size(dims: &[usize]) -> Result<usize, NdError> {
    if dims.is_empty() {
        return Err(NdError::InvalidShape {
            dims: Vec::new(),
            reason: "at least one dimension is required",
        });
    }
    if dims.contains(&0) {
        return Err(NdError::InvalidShape {
            dims: dims.to_vec(),
            reason: "zero-length dimensions are not allowed",
        });
    }
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(|| NdError::Overflow {
            dims: dims.to_vec(),
        })
}

/// Computes row-major strides for `dims`.
///
/// The stride for axis `i` is the product of all extents after it; the last
/// axis has stride 1.
pub fn strides(dims: &[usize]) -> Result<Vec<usize>, NdError> {
    size(dims)?;
    Ok(row_major_strides(dims))
}

/// Maps a coordinate to its flat offset.
///
/// Checks, in order: arity ([`NdError::DimensionMismatch`]), then per axis
/// sign ([`NdError::NegativeIndex`]) and upper bound ([`NdError::OutOfBounds`]).
pub fn coordinate_to_offset(dims: &[usize], coordinate: &[isize]) -> Result<usize, NdError> {
    size(dims)?;
    check_arity(dims, coordinate)?;
    // Horner form of sum(index[i] * stride[i]); cannot overflow once size(dims) passed.
    let mut offset = 0usize;
    for (axis, (&index, &extent)) in coordinate.iter().zip(dims).enumerate() {
        offset = offset * extent + check_axis(axis, index, extent)?;
    }
    Ok(offset)
}

/// Maps a flat offset back to its coordinate.
///
/// Walks the axes from last to first, peeling off `offset mod extent` for
/// each one. Fails with [`NdError::OutOfBounds`] (no axis) when
/// `offset >= size(dims)`.
pub fn offset_to_coordinate(dims: &[usize], offset: usize) -> Result<Vec<isize>, NdError> {
    let total = size(dims)?;
    if offset >= total {
        return Err(NdError::offset_out_of_bounds(offset, total));
    }
    Ok(unravel(dims, offset))
}

fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let rank = dims.len();
    let mut strides = vec![0usize; rank];
    strides[rank - 1] = 1;
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

// Caller guarantees `dims` is valid and `offset < size(dims)`.
fn unravel(dims: &[usize], mut offset: usize) -> Vec<isize> {
    let mut coordinate = vec![0isize; dims.len()];
    for axis in (0..dims.len()).rev() {
        coordinate[axis] = (offset % dims[axis]) as isize;
        offset /= dims[axis];
    }
    coordinate
}

fn check_arity(dims: &[usize], coordinate: &[isize]) -> Result<(), NdError> {
    if coordinate.len() != dims.len() {
        return Err(NdError::DimensionMismatch {
            expected: dims.len(),
            actual: coordinate.len(),
        });
    }
    Ok(())
}

fn check_axis(axis: usize, index: isize, extent: usize) -> Result<usize, NdError> {
    if index < 0 {
        return Err(NdError::NegativeIndex { axis, index });
    }
    let index = index as usize;
    if index >= extent {
        return Err(NdError::OutOfBounds {
            axis: Some(axis),
            index,
            extent,
        });
    }
    Ok(index)
}

/// A validated array shape.
///
/// Holds at least one dimension, no zero-length dimension, and an element
/// count that fits in `isize`. Row-major strides are computed once at
/// construction, so coordinate lookups do not rebuild the product chain.
///
/// Shapes are immutable; resizing an array swaps in a new `Shape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Shape {
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl Shape {
    /// Creates a shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use nd_core::Shape;
    /// let s = Shape::new(vec![2, 3, 4]).unwrap();
    /// assert_eq!(s.ndim(), 3);
    /// assert_eq!(s.size(), 24);
    /// assert_eq!(s.strides(), &[12, 4, 1]);
    /// ```
    pub fn new(dims: Vec<usize>) -> Result<Self, NdError> {
        size(&dims)?;
        let strides = row_major_strides(&dims);
        Ok(Self { dims, strides })
    }

    /// Creates a 1-D shape.
    pub fn vector(len: usize) -> Result<Self, NdError> {
        Self::new(vec![len])
    }

    /// Creates a 2-D shape (matrix).
    pub fn matrix(rows: usize, cols: usize) -> Result<Self, NdError> {
        Self::new(vec![rows, cols])
    }

    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    pub fn size(&self) -> usize {
        // The first stride already holds the product of every later extent.
        self.dims[0] * self.strides[0]
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the extent of one axis, or `None` if the axis does not exist.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Returns the cached row-major strides.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Computes the buffer footprint in bytes for elements of `dtype`.
    pub fn size_bytes(&self, dtype: ElementType) -> Result<usize, NdError> {
        self.size()
            .checked_mul(dtype.size_bytes())
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or_else(|| NdError::Overflow {
                dims: self.dims.clone(),
            })
    }

    /// Maps a coordinate to its flat offset using the cached strides.
    ///
    /// # Examples
    /// ```
    /// use nd_core::Shape;
    /// let s = Shape::matrix(2, 3).unwrap();
    /// assert_eq!(s.offset_of(&[1, 2]).unwrap(), 5);
    /// assert!(s.offset_of(&[2, 0]).is_err());
    /// ```
    pub fn offset_of(&self, coordinate: &[isize]) -> Result<usize, NdError> {
        check_arity(&self.dims, coordinate)?;
        let mut offset = 0usize;
        for (axis, (&index, (&extent, &stride))) in coordinate
            .iter()
            .zip(self.dims.iter().zip(&self.strides))
            .enumerate()
        {
            offset += check_axis(axis, index, extent)? * stride;
        }
        Ok(offset)
    }

    /// Maps a flat offset back to its coordinate.
    pub fn coordinate_of(&self, offset: usize) -> Result<Vec<isize>, NdError> {
        let total = self.size();
        if offset >= total {
            return Err(NdError::offset_out_of_bounds(offset, total));
        }
        Ok(unravel(&self.dims, offset))
    }

    /// Returns `true` if `coordinate` addresses an element of this shape.
    pub fn contains(&self, coordinate: &[isize]) -> bool {
        coordinate.len() == self.dims.len()
            && coordinate
                .iter()
                .zip(&self.dims)
                .all(|(&i, &d)| i >= 0 && (i as usize) < d)
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coordinates(&self) -> Coordinates<'_> {
        Coordinates {
            shape: self,
            next: 0,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = NdError;

    fn try_from(dims: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(dims)
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = NdError;

    fn try_from(dims: &[usize]) -> Result<Self, Self::Error> {
        Self::new(dims.to_vec())
    }
}

impl From<Shape> for Vec<usize> {
    fn from(shape: Shape) -> Self {
        shape.dims
    }
}

/// Row-major coordinate iterator returned by [`Shape::coordinates`].
#[derive(Debug, Clone)]
pub struct Coordinates<'a> {
    shape: &'a Shape,
    next: usize,
}

impl Iterator for Coordinates<'_> {
    type Item = Vec<isize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.shape.size() {
            return None;
        }
        let coordinate = unravel(&self.shape.dims, self.next);
        self.next += 1;
        Some(coordinate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shape.size() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coordinates<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(size(&[5]).unwrap(), 5);
        assert_eq!(size(&[2, 3, 4]).unwrap(), 24);
    }

    #[test]
    fn test_size_rejects_empty_and_zero() {
        assert!(matches!(size(&[]), Err(NdError::InvalidShape { .. })));
        assert!(matches!(size(&[3, 0, 2]), Err(NdError::InvalidShape { .. })));
    }

    #[test]
    fn test_size_overflow() {
        let err = size(&[usize::MAX, 2]).unwrap_err();
        assert_eq!(
            err,
            NdError::Overflow {
                dims: vec![usize::MAX, 2]
            }
        );
        // Fits in usize but not in isize.
        assert!(matches!(
            size(&[usize::MAX / 2 + 1]),
            Err(NdError::Overflow { .. })
        ));
    }

    #[test]
    fn test_vector_shape() {
        let s = Shape::vector(5).unwrap();
        assert_eq!(s.ndim(), 1);
        assert_eq!(s.size(), 5);
        assert_eq!(s.strides(), &[1]);
    }

    #[test]
    fn test_matrix_shape() {
        let s = Shape::matrix(3, 4).unwrap();
        assert_eq!(s.ndim(), 2);
        assert_eq!(s.size(), 12);
        assert_eq!(s.strides(), &[4, 1]);
        assert_eq!(s.size_bytes(ElementType::F32).unwrap(), 48);
    }

    #[test]
    fn test_3d_strides() {
        let s = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(s.strides(), &[12, 4, 1]);
        assert_eq!(strides(&[2, 3, 4]).unwrap(), vec![12, 4, 1]);
    }

    #[test]
    fn test_coordinate_to_offset_row_major() {
        let dims = [2, 3, 4];
        assert_eq!(coordinate_to_offset(&dims, &[0, 0, 0]).unwrap(), 0);
        assert_eq!(coordinate_to_offset(&dims, &[0, 0, 1]).unwrap(), 1);
        assert_eq!(coordinate_to_offset(&dims, &[0, 1, 0]).unwrap(), 4);
        assert_eq!(coordinate_to_offset(&dims, &[1, 2, 3]).unwrap(), 23);
    }

    #[test]
    fn test_coordinate_to_offset_errors() {
        let dims = [2, 2];
        assert_eq!(
            coordinate_to_offset(&dims, &[0]).unwrap_err(),
            NdError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            coordinate_to_offset(&dims, &[0, -1]).unwrap_err(),
            NdError::NegativeIndex { axis: 1, index: -1 }
        );
        assert_eq!(
            coordinate_to_offset(&dims, &[2, 0]).unwrap_err(),
            NdError::OutOfBounds {
                axis: Some(0),
                index: 2,
                extent: 2
            }
        );
    }

    #[test]
    fn test_offset_to_coordinate_last_axis_fastest() {
        let dims = [2, 3];
        assert_eq!(offset_to_coordinate(&dims, 0).unwrap(), vec![0, 0]);
        assert_eq!(offset_to_coordinate(&dims, 1).unwrap(), vec![0, 1]);
        assert_eq!(offset_to_coordinate(&dims, 3).unwrap(), vec![1, 0]);
        assert_eq!(offset_to_coordinate(&dims, 5).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_offset_to_coordinate_out_of_bounds() {
        let err = offset_to_coordinate(&[2, 3], 6).unwrap_err();
        assert_eq!(
            err,
            NdError::OutOfBounds {
                axis: None,
                index: 6,
                extent: 6
            }
        );
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_round_trip_every_offset() {
        // Regression: unravelling must walk from the last axis to the first.
        let dims = [3, 1, 4, 2];
        for offset in 0..size(&dims).unwrap() {
            let c = offset_to_coordinate(&dims, offset).unwrap();
            assert_eq!(coordinate_to_offset(&dims, &c).unwrap(), offset);
        }
    }

    #[test]
    fn test_shape_methods_agree_with_free_functions() {
        let s = Shape::new(vec![4, 3, 5]).unwrap();
        for offset in 0..s.size() {
            let c = s.coordinate_of(offset).unwrap();
            assert_eq!(c, offset_to_coordinate(s.dims(), offset).unwrap());
            assert_eq!(s.offset_of(&c).unwrap(), offset);
        }
    }

    #[test]
    fn test_contains() {
        let s = Shape::matrix(2, 3).unwrap();
        assert!(s.contains(&[1, 2]));
        assert!(!s.contains(&[2, 0]));
        assert!(!s.contains(&[0, -1]));
        assert!(!s.contains(&[0]));
    }

    #[test]
    fn test_coordinates_iterator() {
        let s = Shape::matrix(2, 2).unwrap();
        let all: Vec<_> = s.coordinates().collect();
        assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
        assert_eq!(s.coordinates().len(), 4);
    }

    #[test]
    fn test_display() {
        let s = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(format!("{s}"), "[2, 3, 4]");
    }

    #[test]
    fn test_try_from_conversions() {
        let s1: Shape = vec![2, 3].try_into().unwrap();
        let s2: Shape = (&[2, 3][..]).try_into().unwrap();
        assert_eq!(s1, s2);
        assert!(Shape::try_from(vec![2, 0]).is_err());
    }

    #[test]
    fn test_serde_validates() {
        #[derive(serde::Deserialize)]
        struct Doc {
            shape: Shape,
        }
        let doc: Doc = toml::from_str("shape = [2, 3]").unwrap();
        assert_eq!(doc.shape.strides(), &[3, 1]);
        assert!(toml::from_str::<Doc>("shape = []").is_err());
    }
}
