// Wed Jan 15 2026 - Alex

use crate::memory::strings::StringSlots;
use crate::memory::{AbstractMemory, Address, MemoryError, MemoryKind, MemoryOps, DEFAULT_OPS};
use std::ffi::CString;
use std::ptr;

/// A borrowed view over memory owned by someone else. Never frees.
#[derive(Debug)]
pub struct Pointer {
    address: Address,
    size: usize,
    writable: bool,
    strings: StringSlots,
}

impl Pointer {
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `size` bytes for as long as
    /// this pointer, or any struct attached to it, is alive.
    pub unsafe fn from_raw(ptr: *mut u8, size: usize) -> Self {
        Self::with_access(Address::from_ptr(ptr), size, true)
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reads of `size` bytes for as long as this
    /// pointer is alive.
    pub unsafe fn from_raw_read_only(ptr: *const u8, size: usize) -> Self {
        Self::with_access(Address::from_ptr(ptr), size, false)
    }

    pub fn null() -> Self {
        Self::with_access(Address::null(), 0, false)
    }

    fn with_access(address: Address, size: usize, writable: bool) -> Self {
        Self {
            address,
            size,
            writable,
            strings: StringSlots::new(),
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }
}

impl AbstractMemory for Pointer {
    fn type_name(&self) -> &'static str {
        "Pointer"
    }

    fn address(&self) -> Address {
        self.address
    }

    fn size(&self) -> usize {
        self.size
    }

    fn kind(&self) -> MemoryKind {
        if self.writable {
            MemoryKind::GENERIC
        } else {
            MemoryKind::READ | MemoryKind::ADDRESS
        }
    }

    fn ops(&self) -> Option<&'static MemoryOps> {
        Some(&DEFAULT_OPS)
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), MemoryError> {
        self.check_bounds(offset, buf.len())?;
        if buf.is_empty() {
            return Ok(());
        }
        if self.address.is_null() {
            return Err(MemoryError::NullPointer);
        }
        // In bounds of the region the constructor's caller vouched for.
        unsafe {
            ptr::copy_nonoverlapping(self.address.as_ptr().add(offset), buf.as_mut_ptr(), buf.len());
        }
        Ok(())
    }

    fn write_bytes(&self, offset: usize, data: &[u8]) -> Result<(), MemoryError> {
        if !self.writable {
            return Err(MemoryError::ReadOnly(self.type_name()));
        }
        self.check_bounds(offset, data.len())?;
        if data.is_empty() {
            return Ok(());
        }
        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr(), self.address.as_mut_ptr().add(offset), data.len());
        }
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
