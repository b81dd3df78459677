// Wed Jan 15 2026 - Alex

use crate::memory::{MemoryError, MemoryHandle, Value};
use crate::structure::dispatch::lookup_op;
use crate::structure::{FieldHandler, StructError, Type};
use std::sync::Arc;

/// A one byte C bool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolField;

impl FieldHandler for BoolField {
    fn type_name(&self) -> &str {
        "bool"
    }

    fn get(&self, offset: usize, memory: &MemoryHandle) -> Result<Value, StructError> {
        let mut byte = [0u8; 1];
        memory.read_bytes(offset, &mut byte)?;
        Ok(Value::Bool(byte[0] != 0))
    }

    fn put(&self, offset: usize, memory: &MemoryHandle, value: &Value) -> Result<(), StructError> {
        let b = value.as_bool().ok_or(MemoryError::TypeMismatch {
            expected: "bool",
            found: value.type_name(),
        })?;
        memory.write_bytes(offset, &[b as u8])?;
        Ok(())
    }

    fn size(&self) -> Option<usize> {
        Some(1)
    }
}

/// An inline `char[length]` buffer, read up to the first NUL.
#[derive(Debug, Clone, Copy)]
pub struct CharArrayField {
    length: usize,
}

impl CharArrayField {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl FieldHandler for CharArrayField {
    fn type_name(&self) -> &str {
        "char_array"
    }

    fn get(&self, offset: usize, memory: &MemoryHandle) -> Result<Value, StructError> {
        let mut bytes = vec![0u8; self.length];
        memory.read_bytes(offset, &mut bytes)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(Value::String(String::from_utf8_lossy(&bytes[..end]).into_owned()))
    }

    fn put(&self, offset: usize, memory: &MemoryHandle, value: &Value) -> Result<(), StructError> {
        let src: &[u8] = match value {
            Value::String(s) => s.as_bytes(),
            Value::Bytes(b) => b,
            other => {
                return Err(MemoryError::TypeMismatch {
                    expected: "string",
                    found: other.type_name(),
                }
                .into())
            }
        };
        // A value filling the whole array is stored without a terminator.
        if src.len() > self.length {
            return Err(MemoryError::OutOfRange {
                value: format!("{} bytes", src.len()),
                target: "char_array",
            }
            .into());
        }
        let mut bytes = vec![0u8; self.length];
        bytes[..src.len()].copy_from_slice(src);
        memory.write_bytes(offset, &bytes)?;
        Ok(())
    }

    fn size(&self) -> Option<usize> {
        Some(self.length)
    }

    fn count(&self) -> Option<usize> {
        Some(self.length)
    }
}

/// A fixed-size array of a primitive element type.
#[derive(Debug, Clone)]
pub struct ArrayField {
    element: Arc<Type>,
    count: usize,
    type_name: String,
}

impl ArrayField {
    pub fn new(element: Arc<Type>, count: usize) -> Self {
        let type_name = format!("{}[{}]", element.name(), count);
        Self {
            element,
            count,
            type_name,
        }
    }

    /// Like [`ArrayField::new`], but rejects arrays whose byte length does
    /// not fit in `usize`.
    pub fn try_new(name: &str, element: Arc<Type>, count: usize) -> Result<Self, StructError> {
        let field = Self::new(element, count);
        if field.byte_len().is_none() {
            return Err(StructError::FieldOverflow(name.to_string()));
        }
        Ok(field)
    }

    pub fn element(&self) -> &Arc<Type> {
        &self.element
    }

    fn stride(&self) -> usize {
        self.element.size().unwrap_or(0)
    }

    fn byte_len(&self) -> Option<usize> {
        self.stride().checked_mul(self.count)
    }

    /// Checks that the whole array lies inside `memory`; element offsets
    /// below the returned length cannot overflow after that.
    fn span(&self, offset: usize, memory: &MemoryHandle) -> Result<usize, MemoryError> {
        let len = self.byte_len().ok_or(MemoryError::OutOfBounds {
            offset,
            len: usize::MAX,
            size: memory.size(),
        })?;
        memory.check_bounds(offset, len)?;
        Ok(len)
    }
}

impl FieldHandler for ArrayField {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn get(&self, offset: usize, memory: &MemoryHandle) -> Result<Value, StructError> {
        let op = lookup_op(memory.as_ref(), &self.element)
            .ok_or_else(|| StructError::GetNotSupported(self.type_name.clone()))?;
        self.span(offset, memory)?;
        let stride = self.stride();
        let items = (0..self.count)
            .map(|i| (op.get)(memory.as_ref(), offset + i * stride))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(items))
    }

    /// All or nothing: a failing element restores the previous bytes.
    fn put(&self, offset: usize, memory: &MemoryHandle, value: &Value) -> Result<(), StructError> {
        let op = lookup_op(memory.as_ref(), &self.element)
            .ok_or_else(|| StructError::PutNotSupported(self.type_name.clone()))?;
        let items = value.as_array().ok_or(MemoryError::TypeMismatch {
            expected: "array",
            found: value.type_name(),
        })?;
        if items.len() != self.count {
            return Err(StructError::ArrayLength {
                expected: self.count,
                found: items.len(),
            });
        }

        let len = self.span(offset, memory)?;
        let stride = self.stride();
        let mut saved = vec![0u8; len];
        memory.read_bytes(offset, &mut saved)?;

        for (i, item) in items.iter().enumerate() {
            if let Err(e) = (op.put)(memory.as_ref(), offset + i * stride, item) {
                memory.write_bytes(offset, &saved)?;
                return Err(e.into());
            }
        }
        Ok(())
    }

    fn size(&self) -> Option<usize> {
        self.byte_len()
    }

    fn count(&self) -> Option<usize> {
        Some(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryPointer, StringBuffer};
    use crate::structure::TypeRegistry;

    fn memory(size: usize) -> MemoryHandle {
        Arc::new(MemoryPointer::new(size))
    }

    #[test]
    fn test_bool_field() {
        let mem = memory(2);
        BoolField.put(1, &mem, &Value::Bool(true)).unwrap();
        assert_eq!(BoolField.get(1, &mem).unwrap(), Value::Bool(true));
        assert_eq!(mem.to_vec().unwrap(), vec![0, 1]);
        BoolField.put(1, &mem, &Value::Int32(0)).unwrap();
        assert_eq!(BoolField.get(1, &mem).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_bool_works_on_string_buffers() {
        let mem: MemoryHandle = Arc::new(StringBuffer::new(1));
        BoolField.put(0, &mem, &Value::Bool(true)).unwrap();
        assert_eq!(BoolField.get(0, &mem).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_char_array() {
        let field = CharArrayField::new(6);
        let mem = memory(8);
        field.put(1, &mem, &Value::string("abc")).unwrap();
        assert_eq!(field.get(1, &mem).unwrap(), Value::string("abc"));
        assert_eq!(mem.to_vec().unwrap(), b"\0abc\0\0\0\0".to_vec());

        field.put(1, &mem, &Value::string("abcdef")).unwrap();
        assert_eq!(field.get(1, &mem).unwrap(), Value::string("abcdef"));

        let err = field.put(1, &mem, &Value::string("abcdefg")).unwrap_err();
        assert!(matches!(err, StructError::Memory(MemoryError::OutOfRange { .. })));
    }

    #[test]
    fn test_array_field() {
        let int16 = TypeRegistry::global().find("int16").unwrap();
        let field = ArrayField::new(int16, 3);
        assert_eq!(field.type_name(), "int16[3]");
        assert_eq!(field.size(), Some(6));

        let mem = memory(6);
        let values = Value::Array(vec![Value::Int16(1), Value::Int16(-2), Value::Int16(3)]);
        field.put(0, &mem, &values).unwrap();
        assert_eq!(field.get(0, &mem).unwrap(), values);
    }

    #[test]
    fn test_array_put_is_all_or_nothing() {
        let uint8 = TypeRegistry::global().find("uint8").unwrap();
        let field = ArrayField::new(uint8, 3);
        let mem = memory(3);
        mem.write_bytes(0, &[9, 9, 9]).unwrap();

        let bad = Value::Array(vec![Value::Int32(1), Value::Int32(2), Value::Int32(256)]);
        assert!(field.put(0, &mem, &bad).is_err());
        assert_eq!(mem.to_vec().unwrap(), vec![9, 9, 9]);

        let short = Value::Array(vec![Value::Int32(1)]);
        assert_eq!(
            field.put(0, &mem, &short),
            Err(StructError::ArrayLength { expected: 3, found: 1 })
        );
    }

    #[test]
    fn test_array_offsets_never_overflow() {
        let int32 = TypeRegistry::global().find("int32").unwrap();
        let field = ArrayField::new(int32.clone(), 2);
        let mem = memory(8);
        assert!(matches!(
            field.get(usize::MAX - 3, &mem),
            Err(StructError::Memory(MemoryError::OutOfBounds { .. }))
        ));
        let values = Value::Array(vec![Value::Int32(1), Value::Int32(2)]);
        assert!(matches!(
            field.put(usize::MAX, &mem, &values),
            Err(StructError::Memory(MemoryError::OutOfBounds { .. }))
        ));

        let huge = ArrayField::new(int32.clone(), usize::MAX);
        assert_eq!(huge.size(), None);
        assert!(matches!(huge.get(0, &mem), Err(StructError::Memory(MemoryError::OutOfBounds { .. }))));
        assert_eq!(
            ArrayField::try_new("huge", int32, usize::MAX).unwrap_err(),
            StructError::FieldOverflow("huge".into())
        );
    }
}
