//! Scalar leaf types and their wire encoding.

use std::fmt;

use tessel_core::hash;
use tessel_format::{BinaryWriter, ByteReader, FormatError};

use crate::Value;

/// Host representation of a scalar root type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scalar {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
}

/// Root type names with a known host representation.
const SCALAR_NAMES: &[(&str, Scalar)] = &[
    ("char", Scalar::I8),
    ("unsigned char", Scalar::U8),
    ("short", Scalar::I16),
    ("unsigned short", Scalar::U16),
    ("int", Scalar::I32),
    ("unsigned int", Scalar::U32),
    ("long long int", Scalar::I64),
    ("unsigned long long int", Scalar::U64),
    ("float", Scalar::F32),
];

/// A value that doesn't fit the scalar it is written as.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{value} doesn't fit {scalar}")]
pub struct OutOfRange {
    pub scalar: Scalar,
    pub value: String,
}

impl Scalar {
    /// Scalar for a root type, looked up by the type's name hash.
    pub fn from_type_hash(type_hash: u32) -> Option<Self> {
        SCALAR_NAMES
            .iter()
            .find(|(name, _)| hash(name) == type_hash)
            .map(|&(_, scalar)| scalar)
    }

    /// Bytes on the wire.
    pub fn width(self) -> u32 {
        match self {
            Scalar::I8 | Scalar::U8 => 1,
            Scalar::I16 | Scalar::U16 => 2,
            Scalar::I32 | Scalar::U32 | Scalar::F32 => 4,
            Scalar::I64 | Scalar::U64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        self == Scalar::F32
    }

    pub fn read(self, reader: &mut ByteReader<'_>) -> Result<Value, FormatError> {
        Ok(match self {
            Scalar::I8 => Value::Int(reader.read_i8()?.into()),
            Scalar::U8 => Value::UInt(reader.read_u8()?.into()),
            Scalar::I16 => Value::Int(reader.read_i16()?.into()),
            Scalar::U16 => Value::UInt(reader.read_u16()?.into()),
            Scalar::I32 => Value::Int(reader.read_i32()?.into()),
            Scalar::U32 => Value::UInt(reader.read_u32()?.into()),
            Scalar::I64 => Value::Int(reader.read_i64()?),
            Scalar::U64 => Value::UInt(reader.read_u64()?),
            Scalar::F32 => Value::Float(reader.read_f32()?),
        })
    }

    /// Write a numeric value. Integers are range-checked, floats only fit
    /// [`Scalar::F32`]. Non-numeric values return `Ok(false)`.
    pub fn write(self, value: &Value, writer: &mut BinaryWriter) -> Result<bool, OutOfRange> {
        let out_of_range = |text: String| OutOfRange {
            scalar: self,
            value: text,
        };

        let wide: i128 = match *value {
            Value::Int(n) => n.into(),
            Value::UInt(n) => n.into(),
            Value::Float(x) if self.is_float() => {
                writer.write_f32(x);
                return Ok(true);
            }
            Value::Float(x) => return Err(out_of_range(x.to_string())),
            Value::Array(_) | Value::Struct(_) => return Ok(false),
        };

        macro_rules! narrow {
            ($ty:ty, $write:ident) => {{
                let n = <$ty>::try_from(wide).map_err(|_| out_of_range(wide.to_string()))?;
                writer.$write(n);
            }};
        }

        match self {
            Scalar::I8 => narrow!(i8, write_i8),
            Scalar::U8 => narrow!(u8, write_u8),
            Scalar::I16 => narrow!(i16, write_i16),
            Scalar::U16 => narrow!(u16, write_u16),
            Scalar::I32 => narrow!(i32, write_i32),
            Scalar::U32 => narrow!(u32, write_u32),
            Scalar::I64 => narrow!(i64, write_i64),
            Scalar::U64 => narrow!(u64, write_u64),
            Scalar::F32 => writer.write_f32(wide as f32),
        }
        Ok(true)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scalar::I8 => "i8",
            Scalar::U8 => "u8",
            Scalar::I16 => "i16",
            Scalar::U16 => "u16",
            Scalar::I32 => "i32",
            Scalar::U32 => "u32",
            Scalar::I64 => "i64",
            Scalar::U64 => "u64",
            Scalar::F32 => "f32",
        };
        f.write_str(name)
    }
}
