// Tue Jan 13 2026 - Alex

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Capabilities a memory region advertises.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemoryKind: u32 {
        const READ = 1;
        const WRITE = 1 << 1;
        /// The region has a stable base address for its whole lifetime.
        const ADDRESS = 1 << 2;
        const OWNED = 1 << 3;
        /// What a struct instance needs from its backing memory.
        const GENERIC = Self::READ.bits() | Self::WRITE.bits() | Self::ADDRESS.bits();
    }
}

impl MemoryKind {
    pub fn is_generic(self) -> bool {
        self.contains(Self::GENERIC)
    }

    pub fn can_read(self) -> bool {
        self.contains(Self::READ)
    }

    pub fn can_write(self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn is_owned(self) -> bool {
        self.contains(Self::OWNED)
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.can_read() { 'r' } else { '-' },
            if self.can_write() { 'w' } else { '-' },
            if self.contains(Self::ADDRESS) { 'a' } else { '-' },
            if self.is_owned() { 'o' } else { '-' },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_requires_read_write_address() {
        assert!(MemoryKind::GENERIC.is_generic());
        assert!((MemoryKind::GENERIC | MemoryKind::OWNED).is_generic());
        assert!(!(MemoryKind::READ | MemoryKind::ADDRESS).is_generic());
        assert!(!MemoryKind::empty().is_generic());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!((MemoryKind::GENERIC | MemoryKind::OWNED).to_string(), "rwao");
        assert_eq!((MemoryKind::READ | MemoryKind::ADDRESS).to_string(), "r-a-");
    }
}
