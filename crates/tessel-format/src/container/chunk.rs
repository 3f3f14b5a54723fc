//! Chunked container writer.
//!
//! Layout:
//! ```text
//! magic\0 | i32 num_chunks | u32 offsets[num_chunks] | chunk bodies...
//! ```
//! Each body starts on a 4-byte boundary. Offsets are absolute; slots stay
//! `0xFFFFFFFF` until [`ChunkContainer::close`] patches them.

use crate::{BinaryWriter, ContainerError, Endian, Fixup};

use super::CHUNK_ALIGN;

/// Byte used to pad up to the next chunk boundary.
const FILL: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkState {
    NoActiveChunk { written: usize },
    ChunkActive { index: usize, name: String },
}

#[derive(Debug)]
pub struct ChunkContainer {
    writer: BinaryWriter,
    slots: Vec<Fixup>,
    names: Vec<String>,
    offsets: Vec<u32>,
    state: ChunkState,
}

impl ChunkContainer {
    /// Write the header and reserve `num_chunks` offset slots.
    pub fn new(magic: &str, num_chunks: usize, endian: Endian) -> Self {
        let mut writer = BinaryWriter::new(endian);
        writer.write_cstr(magic);
        writer.write_i32(num_chunks as i32);
        let slots = (0..num_chunks).map(|_| writer.reserve_u32()).collect();

        Self {
            writer,
            slots,
            names: Vec::with_capacity(num_chunks),
            offsets: Vec::with_capacity(num_chunks),
            state: ChunkState::NoActiveChunk { written: 0 },
        }
    }

    pub fn state(&self) -> &ChunkState {
        &self.state
    }

    pub fn num_chunks(&self) -> usize {
        self.slots.len()
    }

    /// Number of chunks that have been ended.
    pub fn written(&self) -> usize {
        match self.state {
            ChunkState::NoActiveChunk { written } => written,
            ChunkState::ChunkActive { index, .. } => index,
        }
    }

    /// Align the cursor and open the next chunk for writing.
    pub fn start_chunk(&mut self, name: &str) -> Result<&mut BinaryWriter, ContainerError> {
        let index = match &self.state {
            ChunkState::ChunkActive { name: active, .. } => {
                return Err(ContainerError::ChunkAlreadyActive {
                    active: active.clone(),
                    requested: name.to_owned(),
                });
            }
            ChunkState::NoActiveChunk { written } => *written,
        };
        if index >= self.slots.len() {
            return Err(ContainerError::AllChunksWritten {
                requested: name.to_owned(),
                declared: self.slots.len(),
            });
        }

        self.writer.pad_to(CHUNK_ALIGN, FILL);
        let offset = self.writer.position() as u32;
        tracing::debug!(chunk = name, index, offset, "start chunk");

        self.names.push(name.to_owned());
        self.offsets.push(offset);
        self.state = ChunkState::ChunkActive {
            index,
            name: name.to_owned(),
        };
        Ok(&mut self.writer)
    }

    /// Writer for the active chunk.
    pub fn writer(&mut self) -> Result<&mut BinaryWriter, ContainerError> {
        match self.state {
            ChunkState::ChunkActive { .. } => Ok(&mut self.writer),
            ChunkState::NoActiveChunk { .. } => Err(ContainerError::NoActiveChunk),
        }
    }

    pub fn end_chunk(&mut self) -> Result<(), ContainerError> {
        let ChunkState::ChunkActive { index, name } = &self.state else {
            return Err(ContainerError::NoActiveChunk);
        };
        tracing::debug!(chunk = %name, index, end = self.writer.position(), "end chunk");
        let written = index + 1;
        self.state = ChunkState::NoActiveChunk { written };
        Ok(())
    }

    /// Offset of an ended chunk, looked up by name.
    pub fn chunk_offset(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .take(self.written())
            .position(|n| n == name)
            .map(|i| self.offsets[i])
    }

    /// Patch the offset table and return the finished bytes.
    pub fn close(mut self) -> Result<Vec<u8>, ContainerError> {
        match &self.state {
            ChunkState::ChunkActive { name, .. } => {
                return Err(ContainerError::ChunkStillActive { name: name.clone() });
            }
            ChunkState::NoActiveChunk { written } if *written != self.slots.len() => {
                return Err(ContainerError::Incomplete {
                    written: *written,
                    declared: self.slots.len(),
                });
            }
            ChunkState::NoActiveChunk { .. } => {}
        }

        for (slot, offset) in self.slots.iter().zip(&self.offsets) {
            self.writer.patch_u32(*slot, *offset)?;
        }
        Ok(self.writer.into_bytes())
    }
}
