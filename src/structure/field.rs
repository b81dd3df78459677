// Tue Jan 13 2026 - Alex

use crate::memory::{MemoryHandle, MemoryOp, AbstractMemory, Value};
use crate::structure::dispatch::lookup_op;
use crate::structure::{NativeType, StructError, Type, TypeRegistry};
use std::fmt;
use std::sync::Arc;

/// Marshalling for fields that have no primitive op.
pub trait FieldHandler: Send + Sync + fmt::Debug {
    /// Named in unsupported-operation errors.
    fn type_name(&self) -> &str;

    fn get(&self, offset: usize, memory: &MemoryHandle) -> Result<Value, StructError>;

    fn put(&self, offset: usize, memory: &MemoryHandle, value: &Value) -> Result<(), StructError>;

    fn size(&self) -> Option<usize> {
        None
    }

    fn count(&self) -> Option<usize> {
        None
    }
}

/// Handler for untyped fields that nobody supplied an override for.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeferredField;

impl FieldHandler for DeferredField {
    fn type_name(&self) -> &str {
        "Field"
    }

    fn get(&self, _offset: usize, _memory: &MemoryHandle) -> Result<Value, StructError> {
        Err(StructError::GetNotSupported(self.type_name().to_string()))
    }

    fn put(&self, _offset: usize, _memory: &MemoryHandle, _value: &Value) -> Result<(), StructError> {
        Err(StructError::PutNotSupported(self.type_name().to_string()))
    }
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    Primitive(Arc<Type>),
    Custom(Arc<dyn FieldHandler>),
}

impl PartialEq for FieldKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One field of a layout: where it lives and how it is marshalled.
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    offset: usize,
    kind: FieldKind,
}

impl StructField {
    /// Resolves `type_info` through the global type registry. Without type
    /// info the field defers to an override that must be supplied later.
    pub fn new(offset: usize, type_info: Option<&str>) -> Result<Self, StructError> {
        Self::with_registry(offset, type_info, TypeRegistry::global())
    }

    pub fn with_registry(offset: usize, type_info: Option<&str>, registry: &TypeRegistry) -> Result<Self, StructError> {
        match type_info {
            Some(name) => Ok(Self::primitive(offset, registry.find(name)?)),
            None => Ok(Self::custom(offset, Arc::new(DeferredField))),
        }
    }

    pub fn primitive(offset: usize, ty: Arc<Type>) -> Self {
        Self {
            offset,
            kind: FieldKind::Primitive(ty),
        }
    }

    pub fn custom(offset: usize, handler: Arc<dyn FieldHandler>) -> Self {
        Self {
            offset,
            kind: FieldKind::Custom(handler),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn native_type(&self) -> Option<NativeType> {
        match &self.kind {
            FieldKind::Primitive(ty) => Some(ty.native_type()),
            FieldKind::Custom(_) => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match &self.kind {
            FieldKind::Primitive(ty) => ty.name(),
            FieldKind::Custom(handler) => handler.type_name(),
        }
    }

    pub fn size(&self) -> Option<usize> {
        match &self.kind {
            FieldKind::Primitive(ty) => ty.size(),
            FieldKind::Custom(handler) => handler.size(),
        }
    }

    /// The primitive op for this field against `memory`, if one exists.
    pub fn op_for(&self, memory: &dyn AbstractMemory) -> Option<&'static MemoryOp> {
        match &self.kind {
            FieldKind::Primitive(ty) => lookup_op(memory, ty),
            FieldKind::Custom(_) => None,
        }
    }

    pub fn get(&self, memory: &MemoryHandle) -> Result<Value, StructError> {
        match &self.kind {
            FieldKind::Primitive(ty) => {
                let op = lookup_op(memory.as_ref(), ty)
                    .ok_or_else(|| StructError::GetNotSupported(ty.name().to_string()))?;
                Ok((op.get)(memory.as_ref(), self.offset)?)
            }
            FieldKind::Custom(handler) => handler.get(self.offset, memory),
        }
    }

    pub fn put(&self, memory: &MemoryHandle, value: &Value) -> Result<(), StructError> {
        match &self.kind {
            FieldKind::Primitive(ty) => {
                let op = lookup_op(memory.as_ref(), ty)
                    .ok_or_else(|| StructError::PutNotSupported(ty.name().to_string()))?;
                Ok((op.put)(memory.as_ref(), self.offset, value)?)
            }
            FieldKind::Custom(handler) => handler.put(self.offset, memory, value),
        }
    }
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}: {}", self.offset, self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Address, MemoryPointer, StringBuffer};

    fn memory(size: usize) -> MemoryHandle {
        Arc::new(MemoryPointer::new(size))
    }

    /// Floats compare by bit pattern so NaN and -0.0 count as round trips.
    fn same_value(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Float32(x), Value::Float32(y)) => x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan()),
            (Value::Float64(x), Value::Float64(y)) => x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan()),
            _ => a == b,
        }
    }

    fn round_trip(type_name: &str, values: &[Value]) {
        let field = StructField::new(8, Some(type_name)).unwrap();
        let mem = memory(24);
        for value in values {
            field.put(&mem, value).unwrap();
            let read = field.get(&mem).unwrap();
            assert!(same_value(&read, value), "{}: wrote {:?}, read {:?}", type_name, value, read);
        }
    }

    #[test]
    fn test_round_trip_every_primitive() {
        round_trip("int8", &[Value::Int8(i8::MIN), Value::Int8(0), Value::Int8(i8::MAX)]);
        round_trip("uint8", &[Value::UInt8(0), Value::UInt8(1), Value::UInt8(u8::MAX)]);
        round_trip("int16", &[Value::Int16(i16::MIN), Value::Int16(0), Value::Int16(-12345), Value::Int16(i16::MAX)]);
        round_trip("uint16", &[Value::UInt16(0), Value::UInt16(54321), Value::UInt16(u16::MAX)]);
        round_trip("int32", &[Value::Int32(i32::MIN), Value::Int32(0), Value::Int32(i32::MAX)]);
        round_trip("uint32", &[Value::UInt32(0), Value::UInt32(u32::MAX)]);
        round_trip("int64", &[Value::Int64(i64::MIN), Value::Int64(0), Value::Int64(i64::MAX)]);
        round_trip("uint64", &[Value::UInt64(0), Value::UInt64(u64::MAX)]);
        round_trip(
            "float32",
            &[
                Value::Float32(0.0),
                Value::Float32(-0.0),
                Value::Float32(-1.25),
                Value::Float32(f32::MIN),
                Value::Float32(f32::MAX),
                Value::Float32(f32::MIN_POSITIVE),
                Value::Float32(f32::INFINITY),
                Value::Float32(f32::NEG_INFINITY),
                Value::Float32(f32::NAN),
            ],
        );
        round_trip(
            "float64",
            &[
                Value::Float64(0.0),
                Value::Float64(-0.0),
                Value::Float64(6.02214076e23),
                Value::Float64(f64::MIN),
                Value::Float64(f64::MAX),
                Value::Float64(f64::MIN_POSITIVE),
                Value::Float64(f64::INFINITY),
                Value::Float64(f64::NEG_INFINITY),
                Value::Float64(f64::NAN),
            ],
        );
        round_trip(
            "pointer",
            &[
                Value::Pointer(Address::null()),
                Value::Pointer(Address::new(0xdead_beef)),
                Value::Pointer(Address::new(usize::MAX as u64)),
            ],
        );
        round_trip(
            "string",
            &[Value::string("hello, world"), Value::string(""), Value::string("h\u{e9}llo \u{2603}"), Value::Null],
        );
    }

    #[test]
    fn test_string_field_over_foreign_bytes() {
        let field = StructField::new(0, Some("string")).unwrap();
        let mem: MemoryHandle = Arc::new(MemoryPointer::from_bytes(vec![0x41; 8]));
        assert!(matches!(field.get(&mem).unwrap(), Value::Pointer(_)));
    }

    #[test]
    fn test_string_field_null() {
        let field = StructField::new(0, Some("string")).unwrap();
        let mem = memory(16);
        assert_eq!(field.get(&mem).unwrap(), Value::Null);
        field.put(&mem, &Value::string("x")).unwrap();
        field.put(&mem, &Value::Null).unwrap();
        assert_eq!(field.get(&mem).unwrap(), Value::Null);
    }

    #[test]
    fn test_unresolved_type_is_configuration_error() {
        let err = StructField::new(0, Some("quaternion")).unwrap_err();
        assert_eq!(err, StructError::UnresolvedType("quaternion".into()));
    }

    #[test]
    fn test_unsupported_for_buffer_kind() {
        let field = StructField::new(0, Some("int32")).unwrap();
        let mem: MemoryHandle = Arc::new(StringBuffer::new(8));
        assert!(field.op_for(mem.as_ref()).is_none());
        assert_eq!(field.get(&mem), Err(StructError::GetNotSupported("int32".into())));
        assert_eq!(
            field.put(&mem, &Value::Int32(1)),
            Err(StructError::PutNotSupported("int32".into()))
        );
        assert_eq!(mem.to_vec().unwrap(), vec![0u8; 8]);
    }

    #[test]
    fn test_untyped_field_defers() {
        let field = StructField::new(0, None).unwrap();
        let mem = memory(4);
        assert_eq!(field.native_type(), None);
        assert_eq!(field.get(&mem), Err(StructError::GetNotSupported("Field".into())));
    }

    #[test]
    fn test_put_range_checked_without_write() {
        let field = StructField::new(0, Some("uint8")).unwrap();
        let mem = memory(1);
        assert!(field.put(&mem, &Value::Int32(300)).is_err());
        assert!(field.put(&mem, &Value::string("1")).is_err());
        assert_eq!(mem.to_vec().unwrap(), vec![0]);
    }
}
