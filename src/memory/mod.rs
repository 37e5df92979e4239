//! Memory model for the demonstration runtime
//!
//! This module provides the core memory abstractions:
//! - [`value`]: Runtime value representation (Int, Char, Str, Pointer, Null)
//! - [`heap`]: Heap allocation with malloc/free and tombstone tracking
//!
//! # Type Sizes
//!
//! Sizes are fixed and platform-independent:
//! - `int`: 4 bytes, stored little-endian
//! - `char`: 1 byte
//!
//! Element access is scaled by element size:
//! ```text
//! ptr[n]  →  ptr + (n * sizeof(int))
//! ```

pub mod heap;
pub mod value;

use value::Address;

/// Size of a C `int` in bytes
pub const SIZEOF_INT: usize = 4;

/// Address of element `index` in an `int` array starting at `base`
pub fn int_element(base: Address, index: usize) -> Address {
    base + (index * SIZEOF_INT) as u64
}

/// Byte size of an `int` array with `count` elements, `None` on overflow
pub fn int_array_size(count: usize) -> Option<usize> {
    count.checked_mul(SIZEOF_INT)
}
