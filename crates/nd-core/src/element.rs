// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Scalar element trait and the tagged [`Scalar`] value.
//!
//! [`Element`] ties each Rust primitive to its [`ElementType`] tag. It is
//! sealed: the eight implementations below are the only ones, so a generic
//! [`crate::NdArray<T>`] can never hold anything outside the closed set.

use crate::{DynArray, ElementType, NdArray};
use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// A primitive that can be stored in an [`crate::NdArray`].
pub trait Element:
    sealed::Sealed + Copy + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The runtime tag for this element type.
    const TYPE: ElementType;

    /// Wraps a value into a tagged [`Scalar`].
    fn into_scalar(self) -> Scalar;

    /// Unwraps a [`Scalar`] carrying this type's tag.
    fn from_scalar(scalar: Scalar) -> Option<Self>;

    #[doc(hidden)]
    fn into_dyn(array: NdArray<Self>) -> DynArray;

    #[doc(hidden)]
    fn downcast(array: DynArray) -> Result<NdArray<Self>, DynArray>;

    #[doc(hidden)]
    fn downcast_ref(array: &DynArray) -> Option<&NdArray<Self>>;

    #[doc(hidden)]
    fn downcast_mut(array: &mut DynArray) -> Option<&mut NdArray<Self>>;
}

/// A single value tagged with its element type.
///
/// Used at the dynamic boundary ([`crate::DynArray`]) where the element type
/// is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Scalar {
    I8(i8),
    I16(i16),
    I32(i32),
    #[serde(rename = "ui8")]
    U8(u8),
    #[serde(rename = "ui16")]
    U16(u16),
    #[serde(rename = "ui32")]
    U32(u32),
    F32(f32),
    F64(f64),
}

impl Scalar {
    /// Returns the element type this value carries.
    pub fn dtype(&self) -> ElementType {
        match self {
            Scalar::I8(_) => ElementType::I8,
            Scalar::I16(_) => ElementType::I16,
            Scalar::I32(_) => ElementType::I32,
            Scalar::U8(_) => ElementType::U8,
            Scalar::U16(_) => ElementType::U16,
            Scalar::U32(_) => ElementType::U32,
            Scalar::F32(_) => ElementType::F32,
            Scalar::F64(_) => ElementType::F64,
        }
    }

    /// Widens the value to `f64`. Lossless for every supported kind.
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::I8(v) => v.into(),
            Scalar::I16(v) => v.into(),
            Scalar::I32(v) => v.into(),
            Scalar::U8(v) => v.into(),
            Scalar::U16(v) => v.into(),
            Scalar::U32(v) => v.into(),
            Scalar::F32(v) => v.into(),
            Scalar::F64(v) => v,
        }
    }

    /// Returns the zero value of `dtype`.
    pub fn zero(dtype: ElementType) -> Self {
        match dtype {
            ElementType::I8 => Scalar::I8(0),
            ElementType::I16 => Scalar::I16(0),
            ElementType::I32 => Scalar::I32(0),
            ElementType::U8 => Scalar::U8(0),
            ElementType::U16 => Scalar::U16(0),
            ElementType::U32 => Scalar::U32(0),
            ElementType::F32 => Scalar::F32(0.0),
            ElementType::F64 => Scalar::F64(0.0),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::I8(v) => write!(f, "{v}"),
            Scalar::I16(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::U8(v) => write!(f, "{v}"),
            Scalar::U16(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::F64(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const TYPE: ElementType = ElementType::$variant;

            fn into_scalar(self) -> Scalar {
                Scalar::$variant(self)
            }

            fn from_scalar(scalar: Scalar) -> Option<Self> {
                match scalar {
                    Scalar::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_dyn(array: NdArray<Self>) -> DynArray {
                DynArray::$variant(array)
            }

            fn downcast(array: DynArray) -> Result<NdArray<Self>, DynArray> {
                match array {
                    DynArray::$variant(a) => Ok(a),
                    other => Err(other),
                }
            }

            fn downcast_ref(array: &DynArray) -> Option<&NdArray<Self>> {
                match array {
                    DynArray::$variant(a) => Some(a),
                    _ => None,
                }
            }

            fn downcast_mut(array: &mut DynArray) -> Option<&mut NdArray<Self>> {
                match array {
                    DynArray::$variant(a) => Some(a),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Scalar {
            fn from(value: $ty) -> Self {
                Scalar::$variant(value)
            }
        }
    };
}

impl_element!(i8, I8);
impl_element!(i16, I16);
impl_element!(i32, I32);
impl_element!(u8, U8);
impl_element!(u16, U16);
impl_element!(u32, U32);
impl_element!(f32, F32);
impl_element!(f64, F64);
