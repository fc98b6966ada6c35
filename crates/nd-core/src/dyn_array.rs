// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runtime-typed arrays for callers that pick the element type dynamically.
//!
//! [`DynArray`] is a closed enum over the eight [`NdArray<T>`]
//! instantiations. All coordinate logic stays in the generic code; this
//! module only translates an [`ElementType`] tag into the matching variant
//! and checks scalar kinds at the boundary.

use crate::{Element, ElementType, NdArray, NdError, Scalar, Shape};
use std::fmt;

/// An [`NdArray`] whose element type is chosen at runtime.
///
/// # Examples
/// ```
/// use nd_core::{DynArray, ElementType, NdError, Scalar};
///
/// let data = [Scalar::F32(1.0), Scalar::F32(2.0), Scalar::F32(3.0), Scalar::F32(4.0)];
/// let mut a = DynArray::new(ElementType::F32, &[2, 2], Some(&data[..])).unwrap();
/// assert_eq!(a.get_f32(&[1, 0]).unwrap(), 3.0);
/// assert!(matches!(a.get_i32(&[1, 0]), Err(NdError::TypeMismatch { .. })));
/// a.set_scalar(&[0, 0], Scalar::F32(9.5)).unwrap();
/// assert_eq!(a.get_scalar(&[0, 0]).unwrap(), Scalar::F32(9.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DynArray {
    I8(NdArray<i8>),
    I16(NdArray<i16>),
    I32(NdArray<i32>),
    U8(NdArray<u8>),
    U16(NdArray<u16>),
    U32(NdArray<u32>),
    F32(NdArray<f32>),
    F64(NdArray<f64>),
}

/// Runs `$body` with `$a` bound to the inner typed array.
macro_rules! dispatch {
    ($value:expr, $a:ident => $body:expr) => {
        match $value {
            DynArray::I8($a) => $body,
            DynArray::I16($a) => $body,
            DynArray::I32($a) => $body,
            DynArray::U8($a) => $body,
            DynArray::U16($a) => $body,
            DynArray::U32($a) => $body,
            DynArray::F32($a) => $body,
            DynArray::F64($a) => $body,
        }
    };
}

/// Generates the per-kind `get_*` / `set_*` entry points.
macro_rules! typed_accessors {
    ($($ty:ty => $get:ident, $set:ident;)*) => {
        $(
            #[doc = concat!("Reads a `", stringify!($ty), "` element; fails with [`NdError::TypeMismatch`] on any other element type.")]
            pub fn $get(&self, coordinate: &[isize]) -> Result<$ty, NdError> {
                self.get::<$ty>(coordinate)
            }

            #[doc = concat!("Writes a `", stringify!($ty), "` element; fails with [`NdError::TypeMismatch`] on any other element type.")]
            pub fn $set(&mut self, coordinate: &[isize], value: $ty) -> Result<(), NdError> {
                self.set::<$ty>(coordinate, value)
            }
        )*
    };
}

impl DynArray {
    /// Creates a zero-filled array of the given element type.
    pub fn zeros(dtype: ElementType, shape: Shape) -> Result<Self, NdError> {
        Ok(match dtype {
            ElementType::I8 => DynArray::I8(NdArray::zeros(shape)?),
            ElementType::I16 => DynArray::I16(NdArray::zeros(shape)?),
            ElementType::I32 => DynArray::I32(NdArray::zeros(shape)?),
            ElementType::U8 => DynArray::U8(NdArray::zeros(shape)?),
            ElementType::U16 => DynArray::U16(NdArray::zeros(shape)?),
            ElementType::U32 => DynArray::U32(NdArray::zeros(shape)?),
            ElementType::F32 => DynArray::F32(NdArray::zeros(shape)?),
            ElementType::F64 => DynArray::F64(NdArray::zeros(shape)?),
        })
    }

    /// Creates an array from a type tag, raw extents and optional flat data.
    ///
    /// Every scalar in `data` must carry `dtype`; the first one that does not
    /// fails the whole construction with [`NdError::TypeMismatch`].
    pub fn new(dtype: ElementType, dims: &[usize], data: Option<&[Scalar]>) -> Result<Self, NdError> {
        let shape = Shape::try_from(dims)?;
        let Some(values) = data else {
            return Self::zeros(dtype, shape);
        };
        Ok(match dtype {
            ElementType::I8 => DynArray::I8(typed_from_scalars(shape, values)?),
            ElementType::I16 => DynArray::I16(typed_from_scalars(shape, values)?),
            ElementType::I32 => DynArray::I32(typed_from_scalars(shape, values)?),
            ElementType::U8 => DynArray::U8(typed_from_scalars(shape, values)?),
            ElementType::U16 => DynArray::U16(typed_from_scalars(shape, values)?),
            ElementType::U32 => DynArray::U32(typed_from_scalars(shape, values)?),
            ElementType::F32 => DynArray::F32(typed_from_scalars(shape, values)?),
            ElementType::F64 => DynArray::F64(typed_from_scalars(shape, values)?),
        })
    }

    /// Returns the declared element type.
    pub fn dtype(&self) -> ElementType {
        dispatch!(self, a => a.dtype())
    }

    pub fn shape(&self) -> &Shape {
        dispatch!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        dispatch!(self, a => a.ndim())
    }

    pub fn size(&self) -> usize {
        dispatch!(self, a => a.size())
    }

    pub fn size_bytes(&self) -> usize {
        dispatch!(self, a => a.size_bytes())
    }

    /// See [`NdArray::resize`]: the buffer is reallocated and zero-filled.
    pub fn resize(&mut self, shape: Shape) -> Result<(), NdError> {
        dispatch!(self, a => a.resize(shape))
    }

    /// See [`NdArray::reshape`]: the buffer is kept, element count must match.
    pub fn reshape(&mut self, shape: Shape) -> Result<(), NdError> {
        dispatch!(self, a => a.reshape(shape))
    }

    /// Borrows the inner array as `NdArray<T>`.
    pub fn as_typed<T: Element>(&self) -> Result<&NdArray<T>, NdError> {
        let dtype = self.dtype();
        T::downcast_ref(self).ok_or(NdError::TypeMismatch {
            expected: dtype,
            actual: T::TYPE,
        })
    }

    /// Mutably borrows the inner array as `NdArray<T>`.
    pub fn as_typed_mut<T: Element>(&mut self) -> Result<&mut NdArray<T>, NdError> {
        let dtype = self.dtype();
        T::downcast_mut(self).ok_or(NdError::TypeMismatch {
            expected: dtype,
            actual: T::TYPE,
        })
    }

    /// Consumes the wrapper and returns the inner `NdArray<T>`.
    ///
    /// Hands the wrapper back unchanged if `T` is not the element type.
    pub fn into_typed<T: Element>(self) -> Result<NdArray<T>, Self> {
        T::downcast(self)
    }

    /// Reads the element at `coordinate` as `T`.
    ///
    /// The type check happens before the coordinate is resolved.
    pub fn get<T: Element>(&self, coordinate: &[isize]) -> Result<T, NdError> {
        self.as_typed::<T>()?.get(coordinate)
    }

    /// Writes a `T` at `coordinate`.
    pub fn set<T: Element>(&mut self, coordinate: &[isize], value: T) -> Result<(), NdError> {
        self.as_typed_mut::<T>()?.set(coordinate, value)
    }

    /// Reads the element at `coordinate` as a tagged [`Scalar`].
    pub fn get_scalar(&self, coordinate: &[isize]) -> Result<Scalar, NdError> {
        dispatch!(self, a => a.get(coordinate).map(|v| v.into_scalar()))
    }

    /// Writes a tagged [`Scalar`]; its tag must equal the array's element type.
    pub fn set_scalar(&mut self, coordinate: &[isize], value: Scalar) -> Result<(), NdError> {
        match (self, value) {
            (DynArray::I8(a), Scalar::I8(v)) => a.set(coordinate, v),
            (DynArray::I16(a), Scalar::I16(v)) => a.set(coordinate, v),
            (DynArray::I32(a), Scalar::I32(v)) => a.set(coordinate, v),
            (DynArray::U8(a), Scalar::U8(v)) => a.set(coordinate, v),
            (DynArray::U16(a), Scalar::U16(v)) => a.set(coordinate, v),
            (DynArray::U32(a), Scalar::U32(v)) => a.set(coordinate, v),
            (DynArray::F32(a), Scalar::F32(v)) => a.set(coordinate, v),
            (DynArray::F64(a), Scalar::F64(v)) => a.set(coordinate, v),
            (this, value) => Err(NdError::TypeMismatch {
                expected: this.dtype(),
                actual: value.dtype(),
            }),
        }
    }

    /// Returns every element, in row-major order, as tagged scalars.
    pub fn to_scalars(&self) -> Vec<Scalar> {
        dispatch!(self, a => a.as_slice().iter().map(|&v| v.into_scalar()).collect())
    }

    typed_accessors! {
        i8 => get_i8, set_i8;
        i16 => get_i16, set_i16;
        i32 => get_i32, set_i32;
        u8 => get_ui8, set_ui8;
        u16 => get_ui16, set_ui16;
        u32 => get_ui32, set_ui32;
        f32 => get_f32, set_f32;
        f64 => get_f64, set_f64;
    }
}

fn typed_from_scalars<T: Element>(shape: Shape, values: &[Scalar]) -> Result<NdArray<T>, NdError> {
    if values.len() != shape.size() {
        return Err(NdError::DataLengthMismatch {
            expected: shape.size(),
            actual: values.len(),
        });
    }
    let data = values
        .iter()
        .map(|&s| {
            T::from_scalar(s).ok_or(NdError::TypeMismatch {
                expected: T::TYPE,
                actual: s.dtype(),
            })
        })
        .collect::<Result<Vec<T>, _>>()?;
    tracing::trace!(dtype = %T::TYPE, len = data.len(), "converted scalars");
    NdArray::from_vec(shape, data)
}

impl<T: Element> From<NdArray<T>> for DynArray {
    fn from(array: NdArray<T>) -> Self {
        T::into_dyn(array)
    }
}

impl fmt::Display for DynArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, a => fmt::Display::fmt(a, f))
    }
}
