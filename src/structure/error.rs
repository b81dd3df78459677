// Tue Jan 13 2026 - Alex

use crate::memory::MemoryError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructError {
    #[error("Invalid field: '{0}' has no descriptor")]
    InvalidField(String),
    #[error("Duplicate field: '{0}'")]
    DuplicateField(String),
    #[error("Field '{0}' does not fit in the address space")]
    FieldOverflow(String),
    #[error("Unresolved type: {0}")]
    UnresolvedType(String),
    #[error("No such field '{0}'")]
    NoSuchField(String),
    #[error("Invalid pointer: {0} is not generic memory")]
    InvalidPointer(&'static str),
    #[error("Array length mismatch: expected {expected} elements, found {found}")]
    ArrayLength { expected: usize, found: usize },
    #[error("No Struct layout configured for {0}")]
    NoLayout(&'static str),
    #[error("No layout factory defined for {0}")]
    NoLayoutFactory(&'static str),
    #[error("No memory ops set for {0}")]
    NoMemoryOps(&'static str),
    #[error("get not supported for {0}")]
    GetNotSupported(String),
    #[error("put not supported for {0}")]
    PutNotSupported(String),
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),
}

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Argument,
    Runtime,
    UnsupportedOperation,
    Memory,
}

impl StructError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidField(_) | Self::DuplicateField(_) | Self::FieldOverflow(_) | Self::UnresolvedType(_) => {
                ErrorKind::Configuration
            }
            Self::NoSuchField(_) | Self::InvalidPointer(_) | Self::ArrayLength { .. } => ErrorKind::Argument,
            Self::NoLayout(_) | Self::NoLayoutFactory(_) | Self::NoMemoryOps(_) => ErrorKind::Runtime,
            Self::GetNotSupported(_) | Self::PutNotSupported(_) => ErrorKind::UnsupportedOperation,
            Self::Memory(MemoryError::TypeMismatch { .. }) | Self::Memory(MemoryError::OutOfRange { .. }) => {
                ErrorKind::Argument
            }
            Self::Memory(_) => ErrorKind::Memory,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "ConfigurationError",
            Self::Argument => "ArgumentError",
            Self::Runtime => "RuntimeError",
            Self::UnsupportedOperation => "UnsupportedOperationError",
            Self::Memory => "MemoryError",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(StructError::InvalidField("x".into()).kind(), ErrorKind::Configuration);
        assert_eq!(StructError::FieldOverflow("x".into()).kind(), ErrorKind::Configuration);
        assert_eq!(StructError::NoSuchField("x".into()).kind(), ErrorKind::Argument);
        assert_eq!(StructError::NoLayout("Point").kind(), ErrorKind::Runtime);
        assert_eq!(StructError::GetNotSupported("int32".into()).kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(StructError::from(MemoryError::NullPointer).kind(), ErrorKind::Memory);
        assert_eq!(
            StructError::from(MemoryError::OutOfRange { value: "300".into(), target: "uint8" }).kind(),
            ErrorKind::Argument
        );
    }

    #[test]
    fn test_no_such_field_names_field() {
        assert_eq!(StructError::NoSuchField("width".into()).to_string(), "No such field 'width'");
    }
}
