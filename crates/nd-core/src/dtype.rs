// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Supported array element types.

use crate::NdError;
use std::fmt;
use std::str::FromStr;

/// Enumerates the scalar kinds an array can hold.
///
/// The set is closed: every array is created with exactly one of these and
/// keeps it for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 8-bit unsigned integer.
    #[serde(rename = "ui8", alias = "u8")]
    U8,
    /// 16-bit unsigned integer.
    #[serde(rename = "ui16", alias = "u16")]
    U16,
    /// 32-bit unsigned integer.
    #[serde(rename = "ui32", alias = "u32")]
    U32,
    /// 32-bit IEEE 754 floating point.
    F32,
    /// 64-bit IEEE 754 floating point.
    F64,
}

impl ElementType {
    /// All element types, in declaration order.
    pub const ALL: [ElementType; 8] = [
        ElementType::I8,
        ElementType::I16,
        ElementType::I32,
        ElementType::U8,
        ElementType::U16,
        ElementType::U32,
        ElementType::F32,
        ElementType::F64,
    ];

    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            ElementType::I8 | ElementType::U8 => 1,
            ElementType::I16 | ElementType::U16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }

    /// Returns the short type code (`"i8"`, `"ui16"`, `"f64"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::I8 => "i8",
            ElementType::I16 => "i16",
            ElementType::I32 => "i32",
            ElementType::U8 => "ui8",
            ElementType::U16 => "ui16",
            ElementType::U32 => "ui32",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, ElementType::F32 | ElementType::F64)
    }

    pub fn is_signed(self) -> bool {
        !matches!(self, ElementType::U8 | ElementType::U16 | ElementType::U32)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a type code. `u8`/`u16`/`u32` are accepted next to `ui8`/`ui16`/`ui32`.
impl FromStr for ElementType {
    type Err = NdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i8" => Ok(ElementType::I8),
            "i16" => Ok(ElementType::I16),
            "i32" => Ok(ElementType::I32),
            "ui8" | "u8" => Ok(ElementType::U8),
            "ui16" | "u16" => Ok(ElementType::U16),
            "ui32" | "u32" => Ok(ElementType::U32),
            "f32" => Ok(ElementType::F32),
            "f64" => Ok(ElementType::F64),
            _ => Err(NdError::UnknownElementType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_bytes() {
        assert_eq!(ElementType::I8.size_bytes(), 1);
        assert_eq!(ElementType::U16.size_bytes(), 2);
        assert_eq!(ElementType::F32.size_bytes(), 4);
        assert_eq!(ElementType::F64.size_bytes(), 8);
    }

    #[test]
    fn test_parse_round_trips_codes() {
        for ty in ElementType::ALL {
            assert_eq!(ty.as_str().parse::<ElementType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_parse_aliases_and_case() {
        assert_eq!("U8".parse::<ElementType>().unwrap(), ElementType::U8);
        assert_eq!(" f32 ".parse::<ElementType>().unwrap(), ElementType::F32);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "c64".parse::<ElementType>().unwrap_err();
        assert_eq!(err, NdError::UnknownElementType("c64".into()));
    }

    #[test]
    fn test_predicates() {
        assert!(ElementType::F64.is_float());
        assert!(!ElementType::I32.is_float());
        assert!(ElementType::I8.is_signed());
        assert!(ElementType::F32.is_signed());
        assert!(!ElementType::U32.is_signed());
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementType::U32.to_string(), "ui32");
    }
}
