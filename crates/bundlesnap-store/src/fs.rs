//! Filesystem primitives

pub mod atomic;
pub mod digest;

pub use atomic::atomic_write;
pub use digest::{file_facts, FileFacts};
