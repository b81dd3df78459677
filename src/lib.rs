// Tue Jan 15 2026 - Alex

pub mod config;
pub mod memory;
pub mod structure;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use memory::{AbstractMemory, MemoryError, MemoryHandle, MemoryPointer, Pointer, StringBuffer, Value};
pub use structure::{
    LayoutBuilder, LayoutRegistry, LayoutSpec, StructError, StructField, StructInstance, StructLayout, StructType,
    TypeRegistry,
};
