//! Read-side view over a finished container.

use crate::{ByteReader, Endian, FormatError, UNWRITTEN};

use super::CHUNK_ALIGN;

/// Parsed container header plus borrowed chunk bodies.
#[derive(Debug, Clone)]
pub struct ContainerView<'a> {
    bytes: &'a [u8],
    endian: Endian,
    magic: &'a str,
    offsets: Vec<u32>,
}

impl<'a> ContainerView<'a> {
    /// Validate the header and every chunk offset.
    pub fn parse(bytes: &'a [u8], endian: Endian, expected_magic: &str) -> Result<Self, FormatError> {
        let mut reader = ByteReader::new(bytes, endian);
        let magic = reader.read_cstr()?;
        if magic != expected_magic {
            return Err(FormatError::InvalidMagic {
                expected: expected_magic.to_owned(),
                found: magic.to_owned(),
            });
        }

        let num_chunks = reader.read_i32()?;
        if num_chunks < 0 {
            return Err(FormatError::InvalidChunkCount(num_chunks));
        }

        let needed = num_chunks as usize * 4;
        if needed > reader.remaining() {
            return Err(FormatError::Truncated {
                offset: reader.position(),
                needed,
                available: reader.remaining(),
            });
        }
        let mut offsets = Vec::with_capacity(num_chunks as usize);
        for _ in 0..num_chunks {
            offsets.push(reader.read_u32()?);
        }
        let header_len = reader.position();

        for (index, &offset) in offsets.iter().enumerate() {
            if offset == UNWRITTEN {
                return Err(FormatError::UnwrittenChunk { index });
            }
            if offset as usize % CHUNK_ALIGN != 0 {
                return Err(FormatError::MisalignedChunk { index, offset });
            }
            if (offset as usize) < header_len || offset as usize > bytes.len() {
                return Err(FormatError::ChunkOutOfBounds {
                    index,
                    offset,
                    len: bytes.len(),
                });
            }
        }

        Ok(Self {
            bytes,
            endian,
            magic,
            offsets,
        })
    }

    pub fn magic(&self) -> &'a str {
        self.magic
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn num_chunks(&self) -> usize {
        self.offsets.len()
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Body of chunk `index`, up to the next chunk or the end of data.
    ///
    /// Trailing alignment padding is included.
    pub fn chunk(&self, index: usize) -> Result<&'a [u8], FormatError> {
        let start = *self.offsets.get(index).ok_or(FormatError::NoSuchChunk {
            index,
            count: self.offsets.len(),
        })? as usize;
        let end = self
            .offsets
            .get(index + 1)
            .map_or(self.bytes.len(), |&next| next as usize);
        if end < start {
            return Err(FormatError::ChunkOutOfBounds {
                index,
                offset: start as u32,
                len: end,
            });
        }
        Ok(&self.bytes[start..end])
    }

    /// Reader positioned at the start of chunk `index`.
    pub fn chunk_reader(&self, index: usize) -> Result<ByteReader<'a>, FormatError> {
        Ok(ByteReader::new(self.chunk(index)?, self.endian))
    }
}
