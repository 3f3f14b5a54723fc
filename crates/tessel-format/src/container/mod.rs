//! Chunked container format.
//!
//! See [`ChunkContainer`] for the layout. [`ContainerView`] reads it back.

mod chunk;
mod view;


pub use chunk::{ChunkContainer, ChunkState};
pub use view::ContainerView;

/// Alignment of every chunk body, in bytes.
pub const CHUNK_ALIGN: usize = 4;
