//! Built-in function implementations
//!
//! This module provides the C library calls the demos make, implemented as
//! methods on [`Machine`].
//!
//! # Supported Built-ins
//!
//! - `printf(format, ...)`: Formatted output to the terminal
//! - `malloc(size)`: Dynamic memory allocation on the heap
//! - `free(ptr)`: Free dynamically allocated memory
//! - `ptr[i]` loads and stores for `int` arrays
//!
//! # Implementation Notes
//!
//! - `printf` supports format specifiers: `%d`, `%u`, `%x`, `%c`, `%s`, `%%`
//! - `malloc` returns heap pointers starting at `0x1000_0000`, or `NULL` when
//!   the heap refuses the request
//! - `free(NULL)` is a no-op, as in C

use super::errors::RuntimeError;
use super::Machine;
use crate::memory::value::{Address, Value};
use crate::memory::{int_element, SIZEOF_INT};
use log::warn;

impl Machine {
    pub fn printf(&mut self, format: &str, args: &[Value]) -> Result<i32, RuntimeError> {
        let output = format_printf(format, args)?;
        self.terminal.print(&output);
        Ok(output.len() as i32)
    }

    pub fn malloc(&mut self, size: i32) -> Result<Value, RuntimeError> {
        if size <= 0 {
            return Err(RuntimeError::InvalidMallocSize { size });
        }

        match self.heap.allocate(size as usize) {
            Ok(addr) => Ok(Value::Pointer(addr)),
            Err(e) => {
                warn!("malloc({}) returned NULL: {}", size, e);
                Ok(Value::Null)
            }
        }
    }

    pub fn free(&mut self, ptr: Value) -> Result<(), RuntimeError> {
        let addr = match ptr {
            Value::Pointer(a) => a,
            Value::Null => return Ok(()),
            other => {
                return Err(RuntimeError::TypeError {
                    expected: "pointer".to_string(),
                    got: other.kind().to_string(),
                });
            }
        };

        self.heap.free(addr).map_err(RuntimeError::from_heap)
    }

    /// `ptr[index] = value` for an `int *` into the heap
    pub fn store_int(
        &mut self,
        ptr: Address,
        index: usize,
        value: i32,
    ) -> Result<(), RuntimeError> {
        let addr = self.element_address(ptr, index)?;
        self.heap
            .write_bytes_at(addr, &value.to_le_bytes())
            .map_err(RuntimeError::from_heap)
    }

    /// `ptr[index]` for an `int *` into the heap
    pub fn load_int(&self, ptr: Address, index: usize) -> Result<i32, RuntimeError> {
        let addr = self.element_address(ptr, index)?;
        let bytes = self
            .heap
            .read_bytes_at(addr, SIZEOF_INT)
            .map_err(RuntimeError::from_heap)?;
        let mut raw = [0u8; SIZEOF_INT];
        raw.copy_from_slice(&bytes);
        Ok(i32::from_le_bytes(raw))
    }

    /// Bounds-checked address of `ptr[index]`
    fn element_address(&self, ptr: Address, index: usize) -> Result<Address, RuntimeError> {
        if ptr == 0 {
            return Err(RuntimeError::NullDereference);
        }

        let block_size = self.heap.block_size(ptr).map_err(RuntimeError::from_heap)?;
        let elements = block_size / SIZEOF_INT;
        if index >= elements {
            return Err(RuntimeError::BufferOverrun {
                index,
                size: elements,
            });
        }

        Ok(int_element(ptr, index))
    }
}

fn next_arg<'a>(args: &'a [Value], arg_index: &mut usize) -> Result<&'a Value, RuntimeError> {
    let arg = args
        .get(*arg_index)
        .ok_or_else(|| RuntimeError::InvalidPrintfFormat {
            message: "Not enough arguments for format string".to_string(),
        })?;
    *arg_index += 1;
    Ok(arg)
}

fn mismatch(spec: char, expected: &str, got: &Value) -> RuntimeError {
    RuntimeError::InvalidPrintfFormat {
        message: format!("%{} expects {}, got {}", spec, expected, got.kind()),
    }
}

/// Render a printf format string against its arguments
///
/// Escape sequences are interpreted too, so templates can be copied from the
/// C source unchanged.
pub fn format_printf(format: &str, args: &[Value]) -> Result<String, RuntimeError> {
    let mut output = String::new();
    let mut chars = format.chars().peekable();
    let mut arg_index = 0;

    while let Some(ch) = chars.next() {
        if ch == '%' {
            let Some(spec) = chars.next() else {
                output.push('%');
                continue;
            };

            match spec {
                '%' => output.push('%'),
                'd' => match next_arg(args, &mut arg_index)? {
                    Value::Int(n) => output.push_str(&n.to_string()),
                    Value::Char(c) => output.push_str(&c.to_string()),
                    other => return Err(mismatch(spec, "int", other)),
                },
                'u' => match next_arg(args, &mut arg_index)? {
                    Value::Int(n) => output.push_str(&(*n as u32).to_string()),
                    other => return Err(mismatch(spec, "int", other)),
                },
                'x' => match next_arg(args, &mut arg_index)? {
                    Value::Int(n) => output.push_str(&format!("{:x}", *n as u32)),
                    other => return Err(mismatch(spec, "int", other)),
                },
                'c' => match next_arg(args, &mut arg_index)? {
                    Value::Char(c) => output.push(*c as u8 as char),
                    Value::Int(n) => output.push((*n as u8) as char),
                    other => return Err(mismatch(spec, "char or int", other)),
                },
                's' => match next_arg(args, &mut arg_index)? {
                    Value::Str(s) => output.push_str(s),
                    Value::Null => output.push_str("(null)"),
                    other => return Err(mismatch(spec, "string", other)),
                },
                _ => {
                    return Err(RuntimeError::InvalidPrintfFormat {
                        message: format!("Unsupported format specifier: %{}", spec),
                    });
                }
            }
        } else if ch == '\\' {
            let Some(&next_ch) = chars.peek() else {
                output.push('\\');
                continue;
            };
            chars.next();
            match next_ch {
                'n' => output.push('\n'),
                't' => output.push('\t'),
                'r' => output.push('\r'),
                '\\' => output.push('\\'),
                '"' => output.push('"'),
                _ => {
                    output.push('\\');
                    output.push(next_ch);
                }
            }
        } else {
            output.push(ch);
        }
    }

    if arg_index < args.len() {
        warn!(
            "printf: {} argument(s) left unused by format {:?}",
            args.len() - arg_index,
            format
        );
    }

    Ok(output)
}
