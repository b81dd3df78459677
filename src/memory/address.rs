// Tue Jan 13 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address {
    value: u64,
}

impl Address {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self { value: 0 }
    }

    pub fn from_ptr(ptr: *const u8) -> Self {
        Self { value: ptr as usize as u64 }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn as_usize(&self) -> usize {
        self.value as usize
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.value as usize as *const u8
    }

    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.value as usize as *mut u8
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }

    /// `None` when the result would leave the address space.
    pub fn checked_add(self, offset: usize) -> Option<Self> {
        let offset = u64::try_from(offset).ok()?;
        self.value.checked_add(offset).map(Self::new)
    }

    pub fn is_aligned(&self, alignment: usize) -> bool {
        alignment == 0 || self.value % alignment as u64 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}


impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add() {
        assert_eq!(Address::new(0x1000).checked_add(0x10), Some(Address::new(0x1010)));
        assert_eq!(Address::new(u64::MAX).checked_add(1), None);
        assert_eq!(Address::new(1).checked_add(usize::MAX).map(|a| a.as_u64()), (usize::MAX as u64).checked_add(1));
    }

    #[test]
    fn test_display_and_alignment() {
        assert_eq!(Address::new(0xff).to_string(), "0x00000000000000ff");
        assert!(Address::new(0x1000).is_aligned(16));
        assert!(!Address::new(0x1001).is_aligned(2));
        assert!(Address::null().is_null());
    }
}
