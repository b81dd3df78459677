// Wed Jan 15 2026 - Alex

use crate::memory::{AbstractMemory, Address, MemoryError, MemoryKind, MemoryOps, STRING_BUFFER_OPS};
use parking_lot::RwLock;

/// Managed byte storage behind a host string. Only byte-sized fields can be
/// marshalled against it.
#[derive(Debug)]
pub struct StringBuffer {
    data: RwLock<Box<[u8]>>,
}

impl StringBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: RwLock::new(vec![0u8; capacity].into_boxed_slice()),
        }
    }

    /// Copies `text` plus a trailing NUL.
    pub fn from_text(text: &str) -> Self {
        let mut bytes = Vec::with_capacity(text.len() + 1);
        bytes.extend_from_slice(text.as_bytes());
        bytes.push(0);
        Self {
            data: RwLock::new(bytes.into_boxed_slice()),
        }
    }

    /// Contents up to the first NUL.
    pub fn to_string_lossy(&self) -> String {
        let data = self.data.read();
        let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        String::from_utf8_lossy(&data[..end]).into_owned()
    }
}

impl AbstractMemory for StringBuffer {
    fn type_name(&self) -> &'static str {
        "StringBuffer"
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
        Some(&STRING_BUFFER_OPS)
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
}
