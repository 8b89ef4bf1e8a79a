//! Key-value storage media.

mod atomic;
mod file;
mod memory;

pub(crate) use atomic::write_atomic;
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
