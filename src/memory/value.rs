//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the tagged values a demo hands to
//! the runtime built-ins (`printf` arguments, `malloc` results, `free` inputs).
//!
//! # Value Types
//!
//! - [`Value::Int`]: 32-bit signed integer
//! - [`Value::Char`]: 8-bit signed character
//! - [`Value::Str`]: Owned string, used for `%s` arguments
//! - [`Value::Pointer`]: 64-bit heap address
//! - [`Value::Null`]: Null pointer (address 0)

use serde::Serialize;

/// Runtime values passed to and returned from built-ins
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Value {
    Int(i32),
    Char(i8),
    Str(String),
    Pointer(Address),
    Null,
}

/// Memory address type (64-bit)
pub type Address = u64;

impl Value {
    /// Get the pointer value, returns None if not a Pointer or Null
    pub fn as_pointer(&self) -> Option<Address> {
        match self {
            Value::Pointer(addr) => Some(*addr),
            Value::Null => Some(0),
            _ => None,
        }
    }

    /// Short type name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Pointer(_) => "pointer",
            Value::Null => "null",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
