// Wed Jan 15 2026 - Alex

use crate::memory::Address;
use ahash::RandomState;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::CString;
use std::fmt;

/// String copies written through `:string` slots, one per slot offset.
///
/// A slot only ever dereferences the copy it holds itself, so a string read
/// never follows an address the region did not hand out.
#[derive(Default)]
pub struct StringSlots {
    slots: Mutex<HashMap<usize, CString, RandomState>>,
}

impl StringSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` for the slot at `offset`, dropping the previous copy.
    pub fn insert(&self, offset: usize, data: CString) -> Address {
        let addr = Address::from_ptr(data.as_ptr() as *const u8);
        self.slots.lock().insert(offset, data);
        addr
    }

    pub fn remove(&self, offset: usize) {
        self.slots.lock().remove(&offset);
    }

    /// The text held for `offset`, provided `addr` is still the copy's address.
    pub fn lookup(&self, offset: usize, addr: Address) -> Option<String> {
        let slots = self.slots.lock();
        let data = slots.get(&offset)?;
        if Address::from_ptr(data.as_ptr() as *const u8) != addr {
            return None;
        }
        Some(data.to_string_lossy().into_owned())
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl fmt::Debug for StringSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringSlots").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_drops_previous_copy() {
        let slots = StringSlots::new();
        let first = slots.insert(0, CString::new("a").unwrap());
        let second = slots.insert(0, CString::new("b").unwrap());
        assert_eq!(slots.len(), 1);
        assert_eq!(slots.lookup(0, second).as_deref(), Some("b"));
        if first != second {
            assert_eq!(slots.lookup(0, first), None);
        }
    }

    #[test]
    fn test_lookup_requires_matching_address() {
        let slots = StringSlots::new();
        let addr = slots.insert(8, CString::new("abc").unwrap());
        assert_eq!(slots.lookup(0, addr), None);
        assert_eq!(slots.lookup(8, Address::new(0x4141_4141)), None);
        assert_eq!(slots.lookup(8, addr).as_deref(), Some("abc"));

        slots.remove(8);
        assert!(slots.is_empty());
        assert_eq!(slots.lookup(8, addr), None);
    }
}
