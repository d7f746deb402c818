mod alloc;

use core::fmt;

use crate::mem::{size, PhysicalAddress};

pub use self::alloc::{FrameAllocator, ALLOC_FILL, FREE_FILL};

/// One reference to a frame of physical memory.
///
/// Minted by [alloc](FrameAllocator::alloc) when a frame is handed out and
/// consumed by [free](FrameAllocator::free), so a reference cannot be
/// released twice. A reference recorded outside the type system (a
/// page-table entry) is re-minted with [adopt](Frame::adopt).
#[derive(Debug, PartialEq)]
pub struct Frame(PhysicalAddress);

impl Frame {
    pub const SIZE: usize = 4 * size::KB;

    pub fn address(&self) -> PhysicalAddress {
        self.0
    }

    pub fn end_address(&self) -> PhysicalAddress {
        self.0 + Self::SIZE
    }

    /// Take over one reference which is not represented as a `Frame`.
    ///
    /// # Safety
    /// `address` must be a frame-aligned address inside the managed range,
    /// and the caller must genuinely hold one reference to it which is not
    /// otherwise represented.
    pub unsafe fn adopt(address: PhysicalAddress) -> Frame {
        Frame(address)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}

/// Initialize the global frame allocator over the given physical range.
///
/// # Safety
/// See [FrameAllocator::new](FrameAllocator::new).
pub unsafe fn init(range_start: PhysicalAddress, range_end: PhysicalAddress) {
    alloc::init(range_start, range_end)
}
