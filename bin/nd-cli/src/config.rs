// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Array descriptions loaded from TOML files.
//!
//! # TOML Format
//! ```toml
//! dtype = "f32"
//! shape = [2, 2]
//! data = [4, 5, 6, 7]   # optional, row-major; zero-filled when absent
//! ```

use anyhow::{bail, Context};
use nd_core::{DynArray, ElementType, Scalar};
use std::path::Path;

/// Describes one array: element type, extents and optional initial data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrayConfig {
    /// Element type code: `i8`, `i16`, `i32`, `ui8`, `ui16`, `ui32`, `f32`, `f64`.
    pub dtype: ElementType,
    /// Extent of each axis, outermost first.
    pub shape: Vec<usize>,
    /// Row-major initial values, converted to `dtype`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<f64>>,
}

impl ArrayConfig {
    /// Loads a description from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config '{}'", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parses a description from a TOML string.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("TOML parse error")
    }

    /// Serialises the description to TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("TOML serialise error")
    }

    /// Builds the array this description names.
    pub fn build(&self) -> anyhow::Result<DynArray> {
        let scalars = self
            .data
            .as_ref()
            .map(|values| {
                values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        scalar_from_f64(self.dtype, v)
                            .with_context(|| format!("data[{i}] is not a valid {}", self.dtype))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .transpose()?;
        let array = DynArray::new(self.dtype, &self.shape, scalars.as_deref())?;
        tracing::info!(dtype = %self.dtype, shape = ?self.shape, "array built from config");
        Ok(array)
    }
}

/// Converts a number read from TOML or the command line into a `dtype` scalar.
///
/// Integer types require an integral value inside the type's range; `f32`
/// rejects finite values outside its range.
pub fn scalar_from_f64(dtype: ElementType, value: f64) -> anyhow::Result<Scalar> {
    macro_rules! integral {
        ($ty:ty, $variant:ident) => {{
            if value.fract() != 0.0 || value < (<$ty>::MIN as f64) || value > (<$ty>::MAX as f64) {
                bail!("{value} does not fit in {}", dtype);
            }
            Scalar::$variant(value as $ty)
        }};
    }

    Ok(match dtype {
        ElementType::I8 => integral!(i8, I8),
        ElementType::I16 => integral!(i16, I16),
        ElementType::I32 => integral!(i32, I32),
        ElementType::U8 => integral!(u8, U8),
        ElementType::U16 => integral!(u16, U16),
        ElementType::U32 => integral!(u32, U32),
        ElementType::F32 => {
            if value.is_finite() && value.abs() > f32::MAX as f64 {
                bail!("{value} does not fit in {dtype}");
            }
            Scalar::F32(value as f32)
        }
        ElementType::F64 => Scalar::F64(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let cfg = ArrayConfig::from_toml(
            r#"
            dtype = "i32"
            shape = [2, 2]
            data = [4, 5, 6, 7]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.dtype, ElementType::I32);
        let a = cfg.build().unwrap();
        assert_eq!(a.get_i32(&[1, 0]).unwrap(), 6);
    }

    #[test]
    fn test_data_optional() {
        let cfg = ArrayConfig::from_toml("dtype = \"ui8\"\nshape = [3]").unwrap();
        let a = cfg.build().unwrap();
        assert_eq!(a.size(), 3);
        assert_eq!(a.get_ui8(&[2]).unwrap(), 0);
    }

    #[test]
    fn test_roundtrip_toml() {
        let cfg = ArrayConfig {
            dtype: ElementType::F64,
            shape: vec![2, 3],
            data: None,
        };
        let s = cfg.to_toml().unwrap();
        assert_eq!(ArrayConfig::from_toml(&s).unwrap(), cfg);
    }

    #[test]
    fn test_unknown_dtype() {
        assert!(ArrayConfig::from_toml("dtype = \"c128\"\nshape = [1]").is_err());
    }

    #[test]
    fn test_build_length_mismatch() {
        let cfg = ArrayConfig::from_toml("dtype = \"f32\"\nshape = [2, 2]\ndata = [1, 2, 3]").unwrap();
        let err = cfg.build().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<nd_core::NdError>(),
            Some(nd_core::NdError::DataLengthMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_scalar_conversion() {
        assert_eq!(scalar_from_f64(ElementType::U8, 255.0).unwrap(), Scalar::U8(255));
        assert!(scalar_from_f64(ElementType::U8, 256.0).is_err());
        assert!(scalar_from_f64(ElementType::U16, -1.0).is_err());
        assert!(scalar_from_f64(ElementType::I8, 1.5).is_err());
        assert_eq!(scalar_from_f64(ElementType::I8, -128.0).unwrap(), Scalar::I8(-128));
        assert_eq!(scalar_from_f64(ElementType::F32, 0.5).unwrap(), Scalar::F32(0.5));
        assert!(scalar_from_f64(ElementType::F32, 1e300).is_err());
    }

    #[test]
    fn test_build_rejects_out_of_range_data() {
        let cfg = ArrayConfig::from_toml("dtype = \"i8\"\nshape = [2]\ndata = [1, 300]").unwrap();
        let msg = format!("{:#}", cfg.build().unwrap_err());
        assert!(msg.contains("data[1]"), "{msg}");
    }
}
