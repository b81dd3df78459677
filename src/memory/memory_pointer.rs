// Tue Jan 13 2026 - Alex

use crate::memory::strings::StringSlots;
use crate::memory::{AbstractMemory, Address, MemoryError, MemoryKind, MemoryOps, DEFAULT_OPS};
use parking_lot::RwLock;
use std::ffi::CString;
use std::fmt;

/// Heap memory owned by whoever holds the last handle to it.
pub struct MemoryPointer {
    data: RwLock<Box<[u8]>>,
    strings: StringSlots,
}

impl MemoryPointer {
    /// Allocates `size` zero-filled bytes with alignment 1.
    pub fn new(size: usize) -> Self {
        Self::from_bytes(vec![0u8; size])
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            data: RwLock::new(bytes.into_boxed_slice()),
            strings: StringSlots::new(),
        }
    }

    pub fn retained_count(&self) -> usize {
        self.strings.len()
    }
}

impl AbstractMemory for MemoryPointer {
    fn type_name(&self) -> &'static str {
        "MemoryPointer"
    }

    fn address(&self) -> Address {
        Address::from_ptr(self.data.read().as_ptr())
    }

    fn size(&self) -> usize {
        self.data.read().len()
    }

    fn kind(&self) -> MemoryKind {
        MemoryKind::GENERIC | MemoryKind::OWNED
    }

    fn ops(&self) -> Option<&'static MemoryOps> {
        Some(&DEFAULT_OPS)
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), MemoryError> {
        self.check_bounds(offset, buf.len())?;
        let data = self.data.read();
        buf.copy_from_slice(&data[offset..offset + buf.len()]);
        Ok(())
    }

    fn write_bytes(&self, offset: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        self.check_bounds(offset, bytes.len())?;
        let mut data = self.data.write();
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn retain(&self, offset: usize, data: CString) -> Result<Address, MemoryError> {
        Ok(self.strings.insert(offset, data))
    }

    fn release(&self, offset: usize) {
        self.strings.remove(offset);
    }

    fn retained_string(&self, offset: usize, addr: Address) -> Option<String> {
        self.strings.lookup(offset, addr)
    }

    fn clear(&self) -> Result<(), MemoryError> {
        self.write_bytes(0, &vec![0u8; self.size()])?;
        self.strings.clear();
        Ok(())
    }
}

impl fmt::Debug for MemoryPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPointer")
            .field("address", &self.address())
            .field("size", &self.size())
            .finish()
    }
}
