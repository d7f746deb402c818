//! Basic types and utilities for dealing with memory.

use core::fmt::{self, Display, Formatter};
use core::ops::{Add, Sub};

/// Convenience constants for dealing with memory sizes.
pub mod size {
    /// The number of bytes in 1 KiB.
    pub const KB: usize = 1024;
}

/// A raw physical address.
pub type RawPhysicalAddress = usize;

/// The previous number with the given alignment.
#[inline]
pub const fn align_down(n: usize, align: usize) -> usize {
    n & !(align - 1)
}

/// The next number with the given alignment.
#[inline]
pub const fn align_up(n: usize, align: usize) -> usize {
    align_down(n + align - 1, align)
}

/// A physical address.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct PhysicalAddress(RawPhysicalAddress);

impl PhysicalAddress {
    /// Create a new physical address.
    pub const fn new(address: RawPhysicalAddress) -> PhysicalAddress {
        PhysicalAddress(address)
    }

    /// The underlying address.
    pub const fn raw(&self) -> RawPhysicalAddress {
        self.0
    }

    /// Check whether the address has the given alignment.
    pub const fn is_aligned(&self, align: usize) -> bool {
        self.0 % align == 0
    }

    /// Get the next address of the given alignment.
    pub const fn next_aligned(&self, align: usize) -> PhysicalAddress {
        PhysicalAddress(align_up(self.0, align))
    }

    /// Get the previous address of the given alignment.
    pub const fn prev_aligned(&self, align: usize) -> PhysicalAddress {
        PhysicalAddress(align_down(self.0, align))
    }
}

impl Add<usize> for PhysicalAddress {
    type Output = PhysicalAddress;

    fn add(self, rhs: usize) -> PhysicalAddress {
        PhysicalAddress(
            self.0
                .checked_add(rhs)
                .expect("Physical address addition overflowed."),
        )
    }
}

impl Sub<PhysicalAddress> for PhysicalAddress {
    type Output = RawPhysicalAddress;

    fn sub(self, rhs: PhysicalAddress) -> RawPhysicalAddress {
        match self.0.overflowing_sub(rhs.0) {
            (v, false) => v,
            (_, true) => panic!("Physical address subtraction overflowed."),
        }
    }
}

impl Display for PhysicalAddress {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "PhysicalAddress(0x{:x})", self.raw())
    }
}
