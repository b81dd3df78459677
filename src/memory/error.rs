// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemoryError {
    #[error("Out of bounds: {len} bytes at offset {offset} exceed region of {size} bytes")]
    OutOfBounds { offset: usize, len: usize, size: usize },
    #[error("Memory is read-only: {0}")]
    ReadOnly(&'static str),
    #[error("Null pointer dereference")]
    NullPointer,
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },
    #[error("Value {value} out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
    #[error("Invalid string: {0}")]
    InvalidString(String),
    #[error("Not supported: {0}")]
    NotSupported(String),
}
