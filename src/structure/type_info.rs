// Tue Jan 13 2026 - Alex

use crate::structure::StructError;
use ahash::RandomState;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::mem::size_of;
use std::sync::Arc;

/// Discriminant used to pick an op table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Pointer,
    String,
    Void,
    Bool,
    Struct,
    Array,
}

impl NativeType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Pointer => "pointer",
            Self::String => "string",
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Struct => "struct",
            Self::Array => "array",
        }
    }

    /// Size in bytes, or `None` when it depends on the concrete type.
    pub fn size(self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 | Self::Bool => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Int64 | Self::UInt64 | Self::Float64 => Some(8),
            Self::Pointer | Self::String => Some(size_of::<usize>()),
            Self::Void => Some(0),
            Self::Struct | Self::Array => None,
        }
    }

    pub fn alignment(self) -> Option<usize> {
        match self {
            Self::Void => Some(1),
            other => other.size(),
        }
    }

    /// True for the twelve types with a dedicated memory op.
    pub fn is_primitive(self) -> bool {
        !matches!(self, Self::Void | Self::Bool | Self::Struct | Self::Array)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::UInt8
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved type handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    name: String,
    native_type: NativeType,
}

impl Type {
    pub fn new(name: impl Into<String>, native_type: NativeType) -> Self {
        Self {
            name: name.into(),
            native_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn native_type(&self) -> NativeType {
        self.native_type
    }

    pub fn size(&self) -> Option<usize> {
        self.native_type.size()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

static GLOBAL_TYPES: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::new);

/// Name to type lookup, preloaded with the builtin C type names.
pub struct TypeRegistry {
    types: RwLock<HashMap<String, Arc<Type>, RandomState>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let registry = Self::empty();
        {
            let mut types = registry.types.write();
            for (name, native) in BUILTIN_TYPES {
                types.insert(name.to_string(), Arc::new(Type::new(*name, *native)));
            }
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            types: RwLock::new(HashMap::default()),
        }
    }

    pub fn global() -> &'static TypeRegistry {
        &GLOBAL_TYPES
    }

    pub fn find(&self, name: &str) -> Result<Arc<Type>, StructError> {
        self.types
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StructError::UnresolvedType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    pub fn register(&self, ty: Type) -> Arc<Type> {
        let ty = Arc::new(ty);
        if let Some(previous) = self.types.write().insert(ty.name().to_string(), ty.clone()) {
            log::warn!("type {} redefined (was {})", ty.name(), previous.native_type());
        }
        ty
    }

    /// Makes `alias` resolve to whatever `existing` resolves to.
    pub fn typedef(&self, existing: &str, alias: &str) -> Result<Arc<Type>, StructError> {
        let target = self.find(existing)?;
        log::debug!("typedef {} -> {}", alias, existing);
        self.types.write().insert(alias.to_string(), target.clone());
        Ok(target)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const LONG: NativeType = if size_of::<usize>() == 8 { NativeType::Int64 } else { NativeType::Int32 };
const ULONG: NativeType = if size_of::<usize>() == 8 { NativeType::UInt64 } else { NativeType::UInt32 };

static BUILTIN_TYPES: &[(&str, NativeType)] = &[
    ("int8", NativeType::Int8),
    ("char", NativeType::Int8),
    ("uint8", NativeType::UInt8),
    ("uchar", NativeType::UInt8),
    ("int16", NativeType::Int16),
    ("short", NativeType::Int16),
    ("uint16", NativeType::UInt16),
    ("ushort", NativeType::UInt16),
    ("int32", NativeType::Int32),
    ("int", NativeType::Int32),
    ("uint32", NativeType::UInt32),
    ("uint", NativeType::UInt32),
    ("int64", NativeType::Int64),
    ("long_long", NativeType::Int64),
    ("uint64", NativeType::UInt64),
    ("ulong_long", NativeType::UInt64),
    ("long", LONG),
    ("ulong", ULONG),
    ("float32", NativeType::Float32),
    ("float", NativeType::Float32),
    ("float64", NativeType::Float64),
    ("double", NativeType::Float64),
    ("pointer", NativeType::Pointer),
    ("string", NativeType::String),
    ("void", NativeType::Void),
    ("bool", NativeType::Bool),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.find("int").unwrap().native_type(), NativeType::Int32);
        assert_eq!(registry.find("double").unwrap().native_type(), NativeType::Float64);
        assert_eq!(registry.find("string").unwrap().native_type(), NativeType::String);
        assert!(matches!(registry.find("nope"), Err(StructError::UnresolvedType(_))));
    }

    #[test]
    fn test_typedef() {
        let registry = TypeRegistry::new();
        registry.typedef("uint32", "pid_t").unwrap();
        assert_eq!(registry.find("pid_t").unwrap().native_type(), NativeType::UInt32);
        assert!(registry.typedef("missing", "alias").is_err());
        assert!(!registry.contains("alias"));
    }

    #[test]
    fn test_primitive_tags() {
        assert!(NativeType::String.is_primitive());
        assert!(NativeType::Pointer.is_primitive());
        assert!(!NativeType::Bool.is_primitive());
        assert!(!NativeType::Struct.is_primitive());
        assert_eq!(NativeType::Float64.size(), Some(8));
        assert_eq!(NativeType::Array.size(), None);
    }
}
