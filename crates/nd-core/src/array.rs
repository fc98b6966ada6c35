// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The owned, typed N-dimensional array.

use crate::{Element, ElementType, NdError, Shape};
use std::fmt;

/// An owned, n-dimensional array of one scalar kind stored in contiguous memory.
///
/// The element type is the type parameter, so it is fixed for the array's
/// whole lifetime. The array exclusively owns its buffer; dropping the array
/// releases it.
///
/// # Memory Layout
/// Elements are stored in row-major (C) order in a `Vec<T>` of exactly
/// `shape.size()` elements. Every coordinate access goes through
/// [`Shape::offset_of`].
///
/// # Examples
/// ```
/// use nd_core::{NdArray, Shape};
/// let mut a = NdArray::from_vec(Shape::matrix(2, 2).unwrap(), vec![4, 5, 6, 7]).unwrap();
/// assert_eq!(a.get(&[1, 0]).unwrap(), 6);
/// a.set(&[0, 1], 356).unwrap();
/// assert_eq!(a.as_slice(), &[4, 356, 6, 7]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T: Element> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Element> NdArray<T> {
    /// Creates an array filled with zeros.
    pub fn zeros(shape: Shape) -> Result<Self, NdError> {
        Self::full(shape, T::default())
    }

    /// Creates an array with every element set to `value`.
    pub fn full(shape: Shape, value: T) -> Result<Self, NdError> {
        shape.size_bytes(T::TYPE)?;
        tracing::debug!(dtype = %T::TYPE, %shape, "allocating array");
        let data = vec![value; shape.size()];
        Ok(Self { shape, data })
    }

    /// Creates an array that takes ownership of row-major `data`.
    ///
    /// Returns [`NdError::DataLengthMismatch`] unless `data.len() == shape.size()`.
    pub fn from_vec(shape: Shape, data: Vec<T>) -> Result<Self, NdError> {
        if data.len() != shape.size() {
            return Err(NdError::DataLengthMismatch {
                expected: shape.size(),
                actual: data.len(),
            });
        }
        tracing::debug!(dtype = %T::TYPE, %shape, "wrapping initial data");
        Ok(Self { shape, data })
    }

    /// Creates an array by copying row-major `data`.
    pub fn from_slice(shape: Shape, data: &[T]) -> Result<Self, NdError> {
        // Check before copying so a bad length never allocates.
        if data.len() != shape.size() {
            return Err(NdError::DataLengthMismatch {
                expected: shape.size(),
                actual: data.len(),
            });
        }
        Self::from_vec(shape, data.to_vec())
    }

    /// Creates an array from raw extents and optional initial flat data.
    ///
    /// Without data the array is zero-filled.
    pub fn new(dims: &[usize], data: Option<&[T]>) -> Result<Self, NdError> {
        let shape = Shape::try_from(dims)?;
        match data {
            Some(values) => Self::from_slice(shape, values),
            None => Self::zeros(shape),
        }
    }

    /// Returns the array's element type.
    pub fn dtype(&self) -> ElementType {
        T::TYPE
    }

    /// Returns the array's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Returns the total number of elements.
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Returns the buffer footprint in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len() * T::TYPE.size_bytes()
    }

    /// Reads the element at `coordinate`.
    pub fn get(&self, coordinate: &[isize]) -> Result<T, NdError> {
        let offset = self.shape.offset_of(coordinate)?;
        Ok(self.data[offset])
    }

    /// Returns a mutable reference to the element at `coordinate`.
    pub fn get_mut(&mut self, coordinate: &[isize]) -> Result<&mut T, NdError> {
        let offset = self.shape.offset_of(coordinate)?;
        Ok(&mut self.data[offset])
    }

    /// Writes `value` at `coordinate`.
    ///
    /// The buffer is left untouched if the coordinate is rejected.
    pub fn set(&mut self, coordinate: &[isize], value: T) -> Result<(), NdError> {
        *self.get_mut(coordinate)? = value;
        Ok(())
    }

    /// Reads the element at a flat row-major offset.
    pub fn get_at(&self, offset: usize) -> Result<T, NdError> {
        self.data
            .get(offset)
            .copied()
            .ok_or(NdError::offset_out_of_bounds(offset, self.data.len()))
    }

    /// Writes `value` at a flat row-major offset.
    pub fn set_at(&mut self, offset: usize, value: T) -> Result<(), NdError> {
        let size = self.data.len();
        let slot = self
            .data
            .get_mut(offset)
            .ok_or(NdError::offset_out_of_bounds(offset, size))?;
        *slot = value;
        Ok(())
    }

    /// Replaces the shape and reallocates the buffer, zero-filled.
    ///
    /// Previous contents are discarded, even when the element count does not
    /// change. Use [`reshape`](Self::reshape) to keep the data.
    pub fn resize(&mut self, shape: Shape) -> Result<(), NdError> {
        shape.size_bytes(T::TYPE)?;
        tracing::debug!(dtype = %T::TYPE, from = %self.shape, to = %shape, "resizing array");
        self.data = vec![T::default(); shape.size()];
        self.shape = shape;
        Ok(())
    }

    /// Reinterprets the buffer under a new shape with the same element count.
    ///
    /// The buffer is not touched, so the row-major sequence of elements is
    /// preserved.
    pub fn reshape(&mut self, shape: Shape) -> Result<(), NdError> {
        if shape.size() != self.size() {
            return Err(NdError::SizeMismatch {
                from: self.size(),
                to: shape.size(),
            });
        }
        tracing::debug!(from = %self.shape, to = %shape, "reshaping array");
        self.shape = shape;
        Ok(())
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Copies every element of `other` into this array. Shapes must be equal.
    pub fn copy_from(&mut self, other: &NdArray<T>) -> Result<(), NdError> {
        if self.shape != other.shape {
            return Err(NdError::ShapeMismatch {
                lhs: self.shape.dims().to_vec(),
                rhs: other.shape.dims().to_vec(),
            });
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Returns `true` if both arrays have the same shape.
    pub fn is_shape_equal<U: Element>(&self, other: &NdArray<U>) -> bool {
        self.shape == other.shape
    }

    /// Returns the row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the row-major buffer mutably. Its length cannot change.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the array and returns its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterates over `(coordinate, element)` pairs in row-major order.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Vec<isize>, &T)> + '_ {
        self.shape.coordinates().zip(self.data.iter())
    }
}

/// Renders the array as nested brackets, e.g. `[[4, 5], [6, 7]]`.
impl<T: Element> fmt::Display for NdArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_axis(f, self.shape.dims(), self.shape.strides(), &self.data, 0)
    }
}

fn fmt_axis<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    dims: &[usize],
    strides: &[usize],
    data: &[T],
    base: usize,
) -> fmt::Result {
    write!(f, "[")?;
    for i in 0..dims[0] {
        if i > 0 {
            write!(f, ", ")?;
        }
        let offset = base + i * strides[0];
        if dims.len() == 1 {
            write!(f, "{}", data[offset])?;
        } else {
            fmt_axis(f, &dims[1..], &strides[1..], data, offset)?;
        }
    }
    write!(f, "]")
}
