// Tue Jan 13 2026 - Alex

use crate::memory::{AbstractMemory, Address, MemoryError, Value};
use std::ffi::CString;
use std::fmt;
use std::mem::size_of;

pub type GetFn = fn(&dyn AbstractMemory, usize) -> Result<Value, MemoryError>;
pub type PutFn = fn(&dyn AbstractMemory, usize, &Value) -> Result<(), MemoryError>;

/// A get/put pair for one primitive type.
#[derive(Clone, Copy)]
pub struct MemoryOp {
    pub get: GetFn,
    pub put: PutFn,
}

impl fmt::Debug for MemoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryOp").finish_non_exhaustive()
    }
}

/// One slot per primitive type. A memory kind leaves a slot empty when it
/// cannot marshal that type.
#[derive(Debug, Clone, Copy)]
pub struct MemoryOps {
    pub int8: Option<&'static MemoryOp>,
    pub uint8: Option<&'static MemoryOp>,
    pub int16: Option<&'static MemoryOp>,
    pub uint16: Option<&'static MemoryOp>,
    pub int32: Option<&'static MemoryOp>,
    pub uint32: Option<&'static MemoryOp>,
    pub int64: Option<&'static MemoryOp>,
    pub uint64: Option<&'static MemoryOp>,
    pub float32: Option<&'static MemoryOp>,
    pub float64: Option<&'static MemoryOp>,
    pub pointer: Option<&'static MemoryOp>,
    pub strptr: Option<&'static MemoryOp>,
}

trait NativeScalar: Copy + Into<Value> {
    const NAME: &'static str;
    const SIZE: usize;
    fn decode(bytes: &[u8]) -> Self;
    fn encode(self, out: &mut [u8]);
    fn from_value(value: &Value) -> Result<Self, MemoryError>;
}

macro_rules! native_int {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl NativeScalar for $ty {
                const NAME: &'static str = $name;
                const SIZE: usize = size_of::<$ty>();

                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }

                fn encode(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                fn from_value(value: &Value) -> Result<Self, MemoryError> {
                    let n = value.as_integer().ok_or(MemoryError::TypeMismatch {
                        expected: $name,
                        found: value.type_name(),
                    })?;
                    <$ty>::try_from(n).map_err(|_| MemoryError::OutOfRange {
                        value: n.to_string(),
                        target: $name,
                    })
                }
            }
        )*
    };
}

macro_rules! native_float {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl NativeScalar for $ty {
                const NAME: &'static str = $name;
                const SIZE: usize = size_of::<$ty>();

                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }

                fn encode(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                fn from_value(value: &Value) -> Result<Self, MemoryError> {
                    value.as_float().map(|n| n as $ty).ok_or(MemoryError::TypeMismatch {
                        expected: $name,
                        found: value.type_name(),
                    })
                }
            }
        )*
    };
}

native_int! {
    i8 => "int8",
    u8 => "uint8",
    i16 => "int16",
    u16 => "uint16",
    i32 => "int32",
    u32 => "uint32",
    i64 => "int64",
    u64 => "uint64",
}

native_float! {
    f32 => "float32",
    f64 => "float64",
}

fn scalar_get<T: NativeScalar>(memory: &dyn AbstractMemory, offset: usize) -> Result<Value, MemoryError> {
    let mut buf = [0u8; 8];
    let bytes = &mut buf[..T::SIZE];
    memory.read_bytes(offset, bytes)?;
    Ok(T::decode(bytes).into())
}

fn scalar_put<T: NativeScalar>(memory: &dyn AbstractMemory, offset: usize, value: &Value) -> Result<(), MemoryError> {
    let v = T::from_value(value)?;
    let mut buf = [0u8; 8];
    let bytes = &mut buf[..T::SIZE];
    v.encode(bytes);
    log::trace!("put {} {} at +{}", T::NAME, value, offset);
    memory.write_bytes(offset, bytes)
}

pub(crate) fn read_address(memory: &dyn AbstractMemory, offset: usize) -> Result<Address, MemoryError> {
    let mut raw = [0u8; size_of::<usize>()];
    memory.read_bytes(offset, &mut raw)?;
    Ok(Address::new(usize::from_ne_bytes(raw) as u64))
}

pub(crate) fn write_address(memory: &dyn AbstractMemory, offset: usize, addr: Address) -> Result<(), MemoryError> {
    memory.write_bytes(offset, &addr.as_usize().to_ne_bytes())
}

fn pointer_get(memory: &dyn AbstractMemory, offset: usize) -> Result<Value, MemoryError> {
    read_address(memory, offset).map(Value::Pointer)
}

fn pointer_put(memory: &dyn AbstractMemory, offset: usize, value: &Value) -> Result<(), MemoryError> {
    let addr = value.as_address().ok_or(MemoryError::TypeMismatch {
        expected: "pointer",
        found: value.type_name(),
    })?;
    write_address(memory, offset, addr)
}

fn string_get(memory: &dyn AbstractMemory, offset: usize) -> Result<Value, MemoryError> {
    let addr = read_address(memory, offset)?;
    if addr.is_null() {
        return Ok(Value::Null);
    }
    // Only copies the region retained itself are read back as text.
    match memory.retained_string(offset, addr) {
        Some(text) => Ok(Value::String(text)),
        None => Ok(Value::Pointer(addr)),
    }
}

fn string_put(memory: &dyn AbstractMemory, offset: usize, value: &Value) -> Result<(), MemoryError> {
    match value {
        Value::Null => {
            write_address(memory, offset, Address::null())?;
            memory.release(offset);
            Ok(())
        }
        Value::String(s) => {
            let data = CString::new(s.as_str()).map_err(|e| MemoryError::InvalidString(e.to_string()))?;
            memory.check_bounds(offset, size_of::<usize>())?;
            let addr = memory.retain(offset, data)?;
            write_address(memory, offset, addr)
        }
        other => Err(MemoryError::TypeMismatch {
            expected: "string",
            found: other.type_name(),
        }),
    }
}

pub static INT8_OP: MemoryOp = MemoryOp { get: scalar_get::<i8>, put: scalar_put::<i8> };
pub static UINT8_OP: MemoryOp = MemoryOp { get: scalar_get::<u8>, put: scalar_put::<u8> };
pub static INT16_OP: MemoryOp = MemoryOp { get: scalar_get::<i16>, put: scalar_put::<i16> };
pub static UINT16_OP: MemoryOp = MemoryOp { get: scalar_get::<u16>, put: scalar_put::<u16> };
pub static INT32_OP: MemoryOp = MemoryOp { get: scalar_get::<i32>, put: scalar_put::<i32> };
pub static UINT32_OP: MemoryOp = MemoryOp { get: scalar_get::<u32>, put: scalar_put::<u32> };
pub static INT64_OP: MemoryOp = MemoryOp { get: scalar_get::<i64>, put: scalar_put::<i64> };
pub static UINT64_OP: MemoryOp = MemoryOp { get: scalar_get::<u64>, put: scalar_put::<u64> };
pub static FLOAT32_OP: MemoryOp = MemoryOp { get: scalar_get::<f32>, put: scalar_put::<f32> };
pub static FLOAT64_OP: MemoryOp = MemoryOp { get: scalar_get::<f64>, put: scalar_put::<f64> };
pub static POINTER_OP: MemoryOp = MemoryOp { get: pointer_get, put: pointer_put };
pub static STRING_OP: MemoryOp = MemoryOp { get: string_get, put: string_put };

/// Full table used by plain addressable memory.
pub static DEFAULT_OPS: MemoryOps = MemoryOps {
    int8: Some(&INT8_OP),
    uint8: Some(&UINT8_OP),
    int16: Some(&INT16_OP),
    uint16: Some(&UINT16_OP),
    int32: Some(&INT32_OP),
    uint32: Some(&UINT32_OP),
    int64: Some(&INT64_OP),
    uint64: Some(&UINT64_OP),
    float32: Some(&FLOAT32_OP),
    float64: Some(&FLOAT64_OP),
    pointer: Some(&POINTER_OP),
    strptr: Some(&STRING_OP),
};

/// Managed string buffers only hand out their bytes.
pub static STRING_BUFFER_OPS: MemoryOps = MemoryOps {
    int8: Some(&INT8_OP),
    uint8: Some(&UINT8_OP),
    int16: None,
    uint16: None,
    int32: None,
    uint32: None,
    int64: None,
    uint64: None,
    float32: None,
    float64: None,
    pointer: None,
    strptr: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryPointer, Pointer};

    #[test]
    fn test_string_get_ignores_unretained_address() {
        let mem = MemoryPointer::from_bytes(vec![0x41; 8]);
        let addr = Address::new(u64::from_ne_bytes([0x41; 8]));
        assert_eq!(string_get(&mem, 0).unwrap(), Value::Pointer(addr));
    }

    #[test]
    fn test_string_get_after_copying_bytes_from_dropped_region() {
        let bytes = {
            let source = MemoryPointer::new(8);
            string_put(&source, 0, &Value::string("gone")).unwrap();
            source.to_vec().unwrap()
        };
        let copy = MemoryPointer::from_bytes(bytes);
        assert!(matches!(string_get(&copy, 0).unwrap(), Value::Pointer(_)));
    }

    #[test]
    fn test_pointer_write_over_string_slot() {
        let mem = MemoryPointer::new(8);
        string_put(&mem, 0, &Value::string("abc")).unwrap();
        assert_eq!(string_get(&mem, 0).unwrap(), Value::string("abc"));

        let forged = Address::new(0x4141_4141_4141_4141);
        pointer_put(&mem, 0, &Value::Pointer(forged)).unwrap();
        assert_eq!(string_get(&mem, 0).unwrap(), Value::Pointer(forged));
    }

    #[test]
    fn test_string_put_reuses_slot() {
        let mem = MemoryPointer::new(16);
        for i in 0..1000 {
            string_put(&mem, 8, &Value::string(format!("v{}", i))).unwrap();
        }
        assert_eq!(mem.retained_count(), 1);
        assert_eq!(string_get(&mem, 8).unwrap(), Value::string("v999"));

        string_put(&mem, 8, &Value::Null).unwrap();
        assert_eq!(mem.retained_count(), 0);
        assert_eq!(string_get(&mem, 8).unwrap(), Value::Null);
    }

    #[test]
    fn test_string_round_trip_through_borrowed_memory() {
        let mut backing = [0u8; 8];
        let ptr = unsafe { Pointer::from_raw(backing.as_mut_ptr(), backing.len()) };
        string_put(&ptr, 0, &Value::string("borrowed")).unwrap();
        assert_eq!(string_get(&ptr, 0).unwrap(), Value::string("borrowed"));
    }

    #[test]
    fn test_scalar_put_out_of_range_leaves_bytes() {
        let mem = MemoryPointer::from_bytes(vec![7, 7]);
        assert!(matches!(
            scalar_put::<i16>(&mem, 0, &Value::UInt32(40_000)),
            Err(MemoryError::OutOfRange { .. })
        ));
        assert_eq!(mem.to_vec().unwrap(), vec![7, 7]);
    }
}
