//! In-memory [`Store`](crate::Store) for tests.

pub mod memory;

pub use memory::MemoryStore;
