// Tue Jan 13 2026 - Alex

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod field;
pub mod handlers;
pub mod instance;
pub mod layout;
pub mod registry;
pub mod serializer;
pub mod type_info;

pub use builder::LayoutBuilder;
pub use dispatch::{lookup_op, memory_op};
pub use error::{ErrorKind, StructError};
pub use field::{DeferredField, FieldHandler, FieldKind, StructField};
pub use handlers::{ArrayField, BoolField, CharArrayField};
pub use instance::StructInstance;
pub use layout::StructLayout;
pub use registry::{LayoutRegistry, StructType};
pub use serializer::{FieldSpec, LayoutSpec};
pub use type_info::{NativeType, Type, TypeRegistry};
