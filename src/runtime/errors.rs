//! Runtime error types for the demonstration runtime
//!
//! This module defines [`RuntimeError`], which represents faults a demo can
//! hit while driving the [`Machine`](super::Machine): bad `printf` calls,
//! misuse of heap memory, invalid records.
//!
//! `malloc` never reports its own failure here: it returns `NULL` and the
//! demo handles it the way its snippet does. The allocation variants only
//! surface when a heap error is mapped directly.

use crate::memory::heap::HeapError;
use crate::record::RecordError;
use thiserror::Error;

/// Runtime errors that can occur during a demo run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Read from heap memory that was never written
    #[error("read from uninitialized memory at 0x{address:x}")]
    UninitializedRead { address: u64 },

    /// Dereference of a null pointer
    #[error("null pointer dereference")]
    NullDereference,

    /// Index out of bounds for a heap buffer
    #[error("buffer overrun: index {index} out of bounds for size {size}")]
    BufferOverrun { index: usize, size: usize },

    /// Access to a freed block
    #[error("use-after-free: address 0x{address:x}")]
    UseAfterFree { address: u64 },

    /// Double free
    #[error("double free at address 0x{address:x}")]
    DoubleFree { address: u64 },

    /// Freeing memory that was never allocated
    #[error("invalid free: address 0x{address:x}")]
    InvalidFree { address: u64 },

    /// Address outside every heap block
    #[error("invalid pointer 0x{address:x}: {message}")]
    InvalidPointer { message: String, address: u64 },

    /// Wrong operand type for a built-in
    #[error("type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    /// Invalid printf format or arguments
    #[error("invalid printf format: {message}")]
    InvalidPrintfFormat { message: String },

    /// Invalid malloc size
    #[error("invalid malloc size: {size} (must be positive)")]
    InvalidMallocSize { size: i32 },

    /// Element count whose byte size does not fit a malloc request
    #[error("cannot allocate {count} ints: size does not fit in an int")]
    AllocationTooLarge { count: usize },

    /// Heap limit reached
    #[error("out of memory: requested {requested} bytes, limit is {limit}")]
    OutOfMemory { requested: usize, limit: usize },

    /// Allocation refused by failure injection
    #[error("allocation #{ordinal} refused")]
    AllocationRefused { ordinal: usize },

    /// Record construction failed
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl RuntimeError {
    /// Translate a heap failure into the runtime error the demo sees
    pub(crate) fn from_heap(err: HeapError) -> Self {
        match err {
            HeapError::UseAfterFree(address) => RuntimeError::UseAfterFree { address },
            HeapError::DoubleFree(address) => RuntimeError::DoubleFree { address },
            HeapError::InvalidFree(address) => RuntimeError::InvalidFree { address },
            HeapError::Uninitialized(address) => RuntimeError::UninitializedRead { address },
            HeapError::Unmapped(address) => RuntimeError::InvalidPointer {
                message: "not in any allocated block".to_string(),
                address,
            },
            HeapError::ZeroSize => RuntimeError::InvalidMallocSize { size: 0 },
            HeapError::Exhausted {
                requested, limit, ..
            } => RuntimeError::OutOfMemory { requested, limit },
            HeapError::InjectedFailure { ordinal } => RuntimeError::AllocationRefused { ordinal },
        }
    }
}
