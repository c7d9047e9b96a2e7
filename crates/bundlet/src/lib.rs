mod chunk_assignment;

pub use crate::chunk_assignment::{assign_chunks, ChunkAssigner, ManualChunkAliasByEntry};
pub use bundlet_common::*;
