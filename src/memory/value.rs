// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError};
use crate::structure::NativeType;
use std::fmt;

/// Values exchanged between callers and field marshalling.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Pointer(Address),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::UInt8(_) => "uint8",
            Value::Int16(_) => "int16",
            Value::UInt16(_) => "uint16",
            Value::Int32(_) => "int32",
            Value::UInt32(_) => "uint32",
            Value::Int64(_) => "int64",
            Value::UInt64(_) => "uint64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Pointer(_) => "pointer",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Any integer variant widened to `i128`. Floats are not truncated.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Value::Int8(n) => Some(n as i128),
            Value::UInt8(n) => Some(n as i128),
            Value::Int16(n) => Some(n as i128),
            Value::UInt16(n) => Some(n as i128),
            Value::Int32(n) => Some(n as i128),
            Value::UInt32(n) => Some(n as i128),
            Value::Int64(n) => Some(n as i128),
            Value::UInt64(n) => Some(n as i128),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float32(n) => Some(n as f64),
            Value::Float64(n) => Some(n),
            _ => self.as_integer().map(|n| n as f64),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => self.as_integer().map(|n| n != 0),
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Null => Some(Address::null()),
            Value::Pointer(addr) => Some(*addr),
            _ => self
                .as_integer()
                .and_then(|n| u64::try_from(n).ok())
                .map(Address::new),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Parses command-line text into a value suited for a field of `native` type.
    /// Untyped fields accept booleans, integers, floats and fall back to strings.
    pub fn parse(native: Option<NativeType>, text: &str) -> Result<Value, MemoryError> {
        let invalid = |target: &'static str| MemoryError::OutOfRange {
            value: text.to_string(),
            target,
        };

        match native {
            Some(NativeType::String) => Ok(Value::string(text)),
            Some(NativeType::Pointer) => parse_address(text).map(Value::Pointer).ok_or_else(|| invalid("pointer")),
            Some(NativeType::Float32) | Some(NativeType::Float64) => text
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|_| invalid("float")),
            Some(NativeType::Bool) => parse_bool(text).map(Value::Bool).ok_or_else(|| invalid("bool")),
            Some(ty) if ty.is_integer() => parse_integer(text).ok_or_else(|| invalid(ty.name())),
            _ => {
                if let Some(b) = parse_bool(text) {
                    Ok(Value::Bool(b))
                } else if let Some(n) = parse_integer(text) {
                    Ok(n)
                } else if let Ok(f) = text.parse::<f64>() {
                    Ok(Value::Float64(f))
                } else {
                    Ok(Value::string(text))
                }
            }
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_integer(text: &str) -> Option<Value> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(Value::UInt64);
    }
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::Int64(n));
    }
    text.parse::<u64>().ok().map(Value::UInt64)
}

fn parse_address(text: &str) -> Option<Address> {
    if text == "null" {
        return Some(Address::null());
    }
    match parse_integer(text)? {
        Value::Int64(n) => u64::try_from(n).ok().map(Address::new),
        Value::UInt64(n) => Some(Address::new(n)),
        _ => None,
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    Address => Pointer,
    String => String,
    Vec<u8> => Bytes,
    Vec<Value> => Array,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int8(n) => write!(f, "{}", n),
            Value::UInt8(n) => write!(f, "{}", n),
            Value::Int16(n) => write!(f, "{}", n),
            Value::UInt16(n) => write!(f, "{}", n),
            Value::Int32(n) => write!(f, "{}", n),
            Value::UInt32(n) => write!(f, "{}", n),
            Value::Int64(n) => write!(f, "{}", n),
            Value::UInt64(n) => write!(f, "{}", n),
            Value::Float32(n) => write!(f, "{}", n),
            Value::Float64(n) => write!(f, "{}", n),
            Value::Pointer(addr) => write!(f, "{}", addr),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(data) => {
                let hex: Vec<String> = data.iter().map(|b| format!("{:02x}", b)).collect();
                write!(f, "<{}>", hex.join(" "))
            }
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
