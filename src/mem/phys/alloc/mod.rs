//! Physical frame allocation.

mod free_list;


use alloc::vec;
use alloc::vec::Vec;
use core::ptr;

use log::debug;

use self::free_list::FreeList;
use super::Frame;
use crate::err::{self, Violation};
use crate::mem::PhysicalAddress;
use crate::util::sync::Spinlock;

/// Byte written across a frame's storage when it is handed out.
pub const ALLOC_FILL: u8 = 5;
/// Byte written across a frame's storage when its last reference is
/// released. Live data matching it means someone kept using a freed frame.
pub const FREE_FILL: u8 = 1;

/// The shared bookkeeping: the free list and the reference counts. Releasing
/// the last reference relinks the frame, so the two move together under one
/// lock.
struct Registry {
    free: FreeList,
    counts: Vec<isize>,
}

/// A reference-counting frame allocator over a contiguous physical range.
pub struct FrameAllocator {
    start: PhysicalAddress,
    end: PhysicalAddress,
    registry: Spinlock<Registry>,
}

singleton!(FRAME_ALLOCATOR, FrameAllocator);

impl FrameAllocator {
    /// Construct an allocator managing `[range_start, range_end)`, rounded
    /// inward to frame boundaries. Every managed frame starts out free.
    ///
    /// # Safety
    /// The managed range must be backed by real, writable memory reachable
    /// at its own address in the current address space, and nothing else may
    /// read or write that storage for the allocator's lifetime.
    pub unsafe fn new(range_start: PhysicalAddress, range_end: PhysicalAddress) -> FrameAllocator {
        let start = range_start.next_aligned(Frame::SIZE);
        let frames = if start < range_end {
            (range_end - start) / Frame::SIZE
        } else {
            0
        };
        let end = start + frames * Frame::SIZE;

        debug!(
            "INITIALIZING FrameAllocator over {} - {} ({} frames).",
            start, end, frames
        );

        let allocator = FrameAllocator {
            start,
            end,
            registry: Spinlock::new(Registry {
                free: FreeList::new(),
                counts: vec![1; frames],
            }),
        };

        // Seed every frame with one reference and release it through the
        // normal path.
        for index in 0..frames {
            allocator.free(Frame(allocator.address(index)));
        }

        allocator
    }

    /// Hand out a free frame with its reference count set to one, or `None`
    /// when every frame is taken. The frame's previous contents are
    /// overwritten with [ALLOC_FILL](ALLOC_FILL).
    pub fn alloc(&self) -> Option<Frame> {
        let index = {
            let mut registry = self.registry.lock();
            let index = unsafe { registry.free.pop(self.arena()) }?;
            unsafe { registry.free.validate(self.arena(), self.total_frames()) };
            registry.counts[index] = 1;
            index
        };

        let address = self.address(index);
        // The frame is not yet visible to anyone else, so the fill happens
        // outside the lock.
        unsafe { fill(address, ALLOC_FILL) };

        Some(Frame(address))
    }

    /// Release one reference to a frame. When the last reference goes, the
    /// frame's storage is overwritten with [FREE_FILL](FREE_FILL) and the
    /// frame is relinked for reuse.
    pub fn free(&self, frame: Frame) {
        let index = self.index(frame.address());

        let remaining = {
            let mut registry = self.registry.lock();
            if registry.counts[index] <= 0 {
                err::fatal(Violation::RefCountUnderflow(frame.address()));
            }
            registry.counts[index] -= 1;
            registry.counts[index]
        };

        if remaining > 0 {
            return;
        }

        // Scrub before relinking: a frame must never be reachable through
        // the free list with its old contents intact.
        unsafe { fill(frame.address(), FREE_FILL) };

        let mut registry = self.registry.lock();
        unsafe {
            registry
                .free
                .push(self.arena().add(index * Frame::SIZE), index);
            registry.free.validate(self.arena(), self.total_frames());
        }
    }

    /// Add one reference to the frame at `address` and return the new count.
    pub fn incref(&self, address: PhysicalAddress) -> isize {
        let index = self.index(address);

        let mut registry = self.registry.lock();
        registry.counts[index] += 1;
        registry.counts[index]
    }

    /// Drop one reference to the frame at `address` and return the new
    /// count. Never relinks the frame; reclaiming the last reference is
    /// [free](FrameAllocator::free)'s transition.
    pub fn decref(&self, address: PhysicalAddress) -> isize {
        let index = self.index(address);

        let mut registry = self.registry.lock();
        if registry.counts[index] <= 0 {
            err::fatal(Violation::RefCountUnderflow(address));
        }
        registry.counts[index] -= 1;
        registry.counts[index]
    }

    /// The current reference count of the frame at `address`.
    pub fn refcount(&self, address: PhysicalAddress) -> isize {
        let index = self.index(address);
        self.registry.lock().counts[index]
    }

    /// The number of frames currently free.
    pub fn free_frames(&self) -> usize {
        self.registry.lock().free.len()
    }

    /// The number of frames currently handed out.
    pub fn used_frames(&self) -> usize {
        self.total_frames() - self.free_frames()
    }

    /// The number of frames managed in total.
    pub fn total_frames(&self) -> usize {
        (self.end - self.start) / Frame::SIZE
    }

    /// Map a frame address to its index in the count table. Escalates if the
    /// address is unaligned or unmanaged.
    fn index(&self, address: PhysicalAddress) -> usize {
        if !address.is_aligned(Frame::SIZE) {
            err::fatal(Violation::Unaligned(address));
        }
        if address < self.start || address >= self.end {
            err::fatal(Violation::OutOfRange {
                address,
                start: self.start,
                end: self.end,
            });
        }

        (address - self.start) / Frame::SIZE
    }

    /// The address of the frame at `index`.
    fn address(&self, index: usize) -> PhysicalAddress {
        self.start + index * Frame::SIZE
    }

    /// The arena's base pointer. Dereferenceable per the contract of
    /// [new](FrameAllocator::new).
    fn arena(&self) -> *mut u8 {
        self.start.raw() as *mut u8
    }
}

/// Overwrite a frame's storage with `byte`.
///
/// # Safety
/// `address` must be a managed, frame-aligned address with no other reader
/// or writer.
unsafe fn fill(address: PhysicalAddress, byte: u8) {
    ptr::write_bytes(address.raw() as *mut u8, byte, Frame::SIZE);
}

/// Initialize the global frame allocator.
///
/// # Safety
/// See [new](FrameAllocator::new).
pub unsafe fn init(range_start: PhysicalAddress, range_end: PhysicalAddress) {
    FRAME_ALLOCATOR.init(FrameAllocator::new(range_start, range_end));
    debug!("INITIALIZED FrameAllocator.");
}
