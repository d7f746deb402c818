#![cfg_attr(not(test), no_std)]
#![cfg_attr(test, allow(unused_imports))]
#![cfg_attr(test, allow(dead_code))]

//! Physical frame management with per-frame reference counting. Hands out
//! 4096-byte frames from a contiguous physical range and returns a frame to
//! the free pool only once its last owner releases it.

extern crate alloc;

#[macro_use]
mod util;

mod err;
mod mem;

pub use err::Violation;
pub use mem::phys::{init, Frame, FrameAllocator, ALLOC_FILL, FREE_FILL};
pub use mem::{align_down, align_up, size, PhysicalAddress, RawPhysicalAddress};
