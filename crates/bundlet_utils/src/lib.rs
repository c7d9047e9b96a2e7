pub mod bitset;
pub mod indexmap;
pub mod pretty_bytes;
