//! Endian-aware in-memory byte writer.
//!
//! Writes go to the cursor, overwriting existing bytes and growing the
//! buffer past its end. Values that are only known later are written as
//! placeholders with [`BinaryWriter::reserve_u32`] and filled in through the
//! returned [`Fixup`] handle, which is bounds-checked.

use crate::FormatError;

/// Byte order applied to every multi-byte value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

/// Placeholder value written by [`BinaryWriter::reserve_u32`].
pub const UNWRITTEN: u32 = 0xFFFF_FFFF;

/// Position of a reserved `u32` awaiting its final value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fixup {
    position: usize,
}

impl Fixup {
    pub fn position(self) -> usize {
        self.position
    }
}

macro_rules! write_num {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: $ty) {
            let bytes = match self.endian {
                Endian::Big => value.to_be_bytes(),
                Endian::Little => value.to_le_bytes(),
            };
            self.write_bytes(&bytes);
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
    pos: usize,
    endian: Endian,
}

impl BinaryWriter {
    pub fn new(endian: Endian) -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            endian,
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Move the cursor to an absolute position within the written data.
    pub fn seek(&mut self, position: usize) -> Result<(), FormatError> {
        if position > self.buf.len() {
            return Err(FormatError::SeekOutOfBounds {
                position,
                len: self.buf.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.write_bytes(&value.to_be_bytes());
    }

    write_num!(write_u16, u16);
    write_num!(write_i16, i16);
    write_num!(write_u32, u32);
    write_num!(write_i32, i32);
    write_num!(write_u64, u64);
    write_num!(write_i64, i64);
    write_num!(
        /// IEEE-754 bits in the writer's byte order.
        write_f32,
        f32
    );

    /// Write the string bytes followed by a NUL.
    pub fn write_cstr(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
        self.write_u8(0);
    }

    /// Pad with `fill` until the cursor is a multiple of `align`.
    pub fn pad_to(&mut self, align: usize, fill: u8) {
        let aligned = self.pos.next_multiple_of(align);
        while self.pos < aligned {
            self.write_u8(fill);
        }
    }

    /// Write [`UNWRITTEN`] and return a handle to patch it later.
    pub fn reserve_u32(&mut self) -> Fixup {
        let fixup = Fixup { position: self.pos };
        self.write_u32(UNWRITTEN);
        fixup
    }

    /// Overwrite a reserved slot without moving the cursor.
    pub fn patch_u32(&mut self, fixup: Fixup, value: u32) -> Result<(), FormatError> {
        let end = fixup.position + 4;
        if end > self.buf.len() {
            return Err(FormatError::FixupOutOfBounds {
                position: fixup.position,
                len: self.buf.len(),
            });
        }
        let bytes = match self.endian {
            Endian::Big => value.to_be_bytes(),
            Endian::Little => value.to_le_bytes(),
        };
        self.buf[fixup.position..end].copy_from_slice(&bytes);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
