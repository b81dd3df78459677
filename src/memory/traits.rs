// Wed Jan 15 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryKind, MemoryOps};
use std::ffi::CString;
use std::fmt;
use std::sync::Arc;

/// A raw memory region that struct fields can be marshalled against.
///
/// Offsets are relative to [`AbstractMemory::address`]. Implementations
/// bounds check every access and guard their own bytes, so all methods take
/// `&self` and a region can be shared between instances.
pub trait AbstractMemory: Send + Sync + fmt::Debug {
    fn type_name(&self) -> &'static str;

    fn address(&self) -> Address;

    fn size(&self) -> usize;

    fn kind(&self) -> MemoryKind;

    /// The op table for this kind of memory, if any was set.
    fn ops(&self) -> Option<&'static MemoryOps>;

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), MemoryError>;

    fn write_bytes(&self, offset: usize, data: &[u8]) -> Result<(), MemoryError>;

    /// Keeps `data` alive for the string slot at `offset` and returns its
    /// address. A later retain for the same slot drops the previous copy.
    fn retain(&self, _offset: usize, _data: CString) -> Result<Address, MemoryError> {
        Err(MemoryError::NotSupported(format!(
            "{} cannot hold string data",
            self.type_name()
        )))
    }

    /// Drops the string copy held for the slot at `offset`, if any.
    fn release(&self, _offset: usize) {}

    /// The text this region retained for `offset` at `addr`. Addresses the
    /// region did not hand out yield `None`.
    fn retained_string(&self, _offset: usize, _addr: Address) -> Option<String> {
        None
    }

    fn check_bounds(&self, offset: usize, len: usize) -> Result<(), MemoryError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.size() => Ok(()),
            _ => Err(MemoryError::OutOfBounds {
                offset,
                len,
                size: self.size(),
            }),
        }
    }

    fn clear(&self) -> Result<(), MemoryError> {
        self.write_bytes(0, &vec![0u8; self.size()])
    }

    fn to_vec(&self) -> Result<Vec<u8>, MemoryError> {
        let mut bytes = vec![0u8; self.size()];
        self.read_bytes(0, &mut bytes)?;
        Ok(bytes)
    }

    fn is_null(&self) -> bool {
        self.address().is_null()
    }

    /// Whether this region can back a struct instance.
    fn is_kind_of_memory(&self) -> bool {
        self.kind().is_generic()
    }
}

pub type MemoryHandle = Arc<dyn AbstractMemory>;
