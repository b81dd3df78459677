// Tue Jan 13 2026 - Alex

pub mod address;
pub mod error;
pub mod kind;
pub mod memory_pointer;
pub mod ops;
pub mod pointer;
pub mod string_buffer;
pub mod strings;
pub mod traits;
pub mod value;

pub use address::Address;
pub use error::MemoryError;
pub use kind::MemoryKind;
pub use memory_pointer::MemoryPointer;
pub use ops::{MemoryOp, MemoryOps, DEFAULT_OPS, STRING_BUFFER_OPS};
pub use pointer::Pointer;
pub use string_buffer::StringBuffer;
pub use strings::StringSlots;
pub use traits::{AbstractMemory, MemoryHandle};
pub use value::Value;
