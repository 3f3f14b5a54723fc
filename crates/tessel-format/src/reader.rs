//! Bounds-checked cursor over a byte slice.

use crate::{Endian, FormatError};

macro_rules! read_num {
    ($name:ident, $ty:ty, $len:literal) => {
        pub fn $name(&mut self) -> Result<$ty, FormatError> {
            let bytes = self.take::<$len>()?;
            Ok(match self.endian {
                Endian::Big => <$ty>::from_be_bytes(bytes),
                Endian::Little => <$ty>::from_le_bytes(bytes),
            })
        }
    };
}

#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8], endian: Endian) -> Self {
        Self {
            bytes,
            pos: 0,
            endian,
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    pub fn seek(&mut self, position: usize) -> Result<(), FormatError> {
        if position > self.bytes.len() {
            return Err(FormatError::SeekOutOfBounds {
                position,
                len: self.bytes.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        if len > self.remaining() {
            return Err(FormatError::Truncated {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, FormatError> {
        Ok(i8::from_be_bytes(self.take::<1>()?))
    }

    read_num!(read_u16, u16, 2);
    read_num!(read_i16, i16, 2);
    read_num!(read_u32, u32, 4);
    read_num!(read_i32, i32, 4);
    read_num!(read_u64, u64, 8);
    read_num!(read_i64, i64, 8);
    read_num!(read_f32, f32, 4);

    /// Read up to the next NUL and consume it.
    pub fn read_cstr(&mut self) -> Result<&'a str, FormatError> {
        let start = self.pos;
        let rest = &self.bytes[start..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(FormatError::MissingTerminator { offset: start })?;
        let text = std::str::from_utf8(&rest[..len])
            .map_err(|_| FormatError::InvalidUtf8 { offset: start })?;
        self.pos += len + 1;
        Ok(text)
    }
}
