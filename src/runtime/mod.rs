//! Demonstration runtime
//!
//! This module provides the execution context every demo runs against:
//! - [`Machine`]: terminal capture plus a simulated heap
//! - [`builtins`]: `printf`, `malloc`, `free` and `int` element access
//! - [`errors`]: Runtime error types
//!
//! # Execution Model
//!
//! A demo is ordinary Rust code that calls the built-ins in the same order
//! the snippet calls their C counterparts. Each run gets a fresh `Machine`,
//! so nothing leaks between runs.

pub mod builtins;
pub mod constants;
pub mod errors;

use crate::config::GalleryConfig;
use crate::memory::heap::Heap;
use crate::memory::value::{Address, Value};
use crate::terminal::Terminal;
use errors::RuntimeError;
use log::debug;

/// Handle to a heap-allocated `int` array
///
/// The handle is a plain address and length. It stays usable as a value after
/// the block is freed, and every access through it then reports
/// [`RuntimeError::UseAfterFree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBuffer {
    addr: Address,
    len: usize,
}

impl IntBuffer {
    pub fn addr(&self) -> Address {
        self.addr
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Execution context for a single demo run
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) terminal: Terminal,
    pub(crate) heap: Heap,
}

impl Machine {
    pub fn new(config: &GalleryConfig) -> Self {
        let mut heap = Heap::new(config.heap_limit);
        if let Some(ordinal) = config.fail_allocation {
            heap.fail_allocation(ordinal);
        }
        Machine {
            terminal: Terminal::new(),
            heap,
        }
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Print text verbatim (stream-style output)
    pub fn print(&mut self, text: &str) {
        self.terminal.print(text);
    }

    /// Print text followed by a newline
    pub fn println(&mut self, text: &str) {
        self.terminal.println(text);
    }

    /// Allocate an `int` array of `count` elements
    ///
    /// Returns `Ok(None)` when `malloc` yields `NULL`.
    pub fn alloc_ints(&mut self, count: usize) -> Result<Option<IntBuffer>, RuntimeError> {
        let size = crate::memory::int_array_size(count)
            .and_then(|bytes| i32::try_from(bytes).ok())
            .ok_or(RuntimeError::AllocationTooLarge { count })?;
        match self.malloc(size)?.as_pointer() {
            Some(0) | None => Ok(None),
            Some(addr) => Ok(Some(IntBuffer { addr, len: count })),
        }
    }

    /// Release a buffer obtained from [`Machine::alloc_ints`]
    pub fn release(&mut self, buffer: IntBuffer) -> Result<(), RuntimeError> {
        self.free(Value::Pointer(buffer.addr))
    }

    /// Run `body` with a freshly allocated `int` array, then free it
    ///
    /// Returns `Ok(None)` without running `body` if the allocation fails.
    /// The buffer is freed on every path out of `body`, including errors.
    pub fn with_int_buffer<T, F>(
        &mut self,
        count: usize,
        body: F,
    ) -> Result<Option<T>, RuntimeError>
    where
        F: FnOnce(&mut Machine, IntBuffer) -> Result<T, RuntimeError>,
    {
        let Some(buffer) = self.alloc_ints(count)? else {
            return Ok(None);
        };

        let result = body(&mut *self, buffer);
        debug!("releasing scoped buffer at 0x{:x}", buffer.addr);
        let released = self.release(buffer);

        let value = result?;
        released?;
        Ok(Some(value))
    }

    /// Write `value` to element `index` of `buffer`
    pub fn store(
        &mut self,
        buffer: IntBuffer,
        index: usize,
        value: i32,
    ) -> Result<(), RuntimeError> {
        self.store_int(buffer.addr, index, value)
    }

    /// Read element `index` of `buffer`
    pub fn load(&self, buffer: IntBuffer, index: usize) -> Result<i32, RuntimeError> {
        self.load_int(buffer.addr, index)
    }
}
