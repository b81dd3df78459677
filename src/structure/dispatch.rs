// Wed Jan 15 2026 - Alex

use crate::memory::{AbstractMemory, MemoryOp, MemoryOps};
use crate::structure::{NativeType, Type};

/// Picks the op table slot for `native`. Non-primitive tags and regions
/// without a table have no op.
pub fn memory_op(ops: Option<&MemoryOps>, native: NativeType) -> Option<&'static MemoryOp> {
    let ops = ops?;
    match native {
        NativeType::Int8 => ops.int8,
        NativeType::UInt8 => ops.uint8,
        NativeType::Int16 => ops.int16,
        NativeType::UInt16 => ops.uint16,
        NativeType::Int32 => ops.int32,
        NativeType::UInt32 => ops.uint32,
        NativeType::Int64 => ops.int64,
        NativeType::UInt64 => ops.uint64,
        NativeType::Float32 => ops.float32,
        NativeType::Float64 => ops.float64,
        NativeType::Pointer => ops.pointer,
        NativeType::String => ops.strptr,
        NativeType::Void | NativeType::Bool | NativeType::Struct | NativeType::Array => None,
    }
}

pub fn lookup_op(memory: &dyn AbstractMemory, ty: &Type) -> Option<&'static MemoryOp> {
    memory_op(memory.ops(), ty.native_type())
}
