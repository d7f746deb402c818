//! An intrusive free list over the managed arena.
//!
//! Free frames are chained by index, not by pointer: the first
//! `size_of::<usize>()` bytes of each free frame's own storage are reused to
//! hold the index of the next free frame. Nothing else may touch a frame's
//! storage while it is linked here.

use crate::mem::phys::Frame;

/// The list terminator.
const NIL: usize = usize::MAX;

/// A LIFO list of free frame indices, linked through the frames themselves.
pub struct FreeList {
    head: usize,
    len: usize,
}

impl FreeList {
    pub const fn new() -> FreeList {
        FreeList { head: NIL, len: 0 }
    }

    /// The number of linked frames.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Link the frame at `index` as the new head.
    ///
    /// # Safety
    /// `frame` must point to the start of that frame's storage, be writable
    /// and aligned for `usize`, and the frame must not already be linked.
    pub unsafe fn push(&mut self, frame: *mut u8, index: usize) {
        frame.cast::<usize>().write(self.head);
        self.head = index;
        self.len += 1;
    }

    /// Unlink the head frame and return its index, if any.
    ///
    /// # Safety
    /// `base` must point to the start of the arena the linked indices were
    /// pushed against, and the linked storage must be unchanged since.
    pub unsafe fn pop(&mut self, base: *mut u8) -> Option<usize> {
        if self.head == NIL {
            return None;
        }

        let index = self.head;
        self.head = base.add(index * Frame::SIZE).cast::<usize>().read();
        self.len -= 1;

        Some(index)
    }

    /// Walk the list and assert that every link is in bounds, no index is
    /// linked twice, and the walked length matches the tracked length.
    /// Compiled out unless validation is enabled.
    ///
    /// # Safety
    /// Same contract as [pop](FreeList::pop).
    #[inline]
    pub unsafe fn validate(&self, base: *mut u8, frames: usize) {
        #[cfg(not(any(test, feature = "freelist_validation")))]
        let _ = (base, frames);

        #[cfg(any(test, feature = "freelist_validation"))]
        {
            use hashbrown::HashSet;

            let mut seen = HashSet::new();
            let mut cursor = self.head;

            while cursor != NIL {
                assert!(cursor < frames, "Link {} is out of bounds.", cursor);
                assert!(seen.insert(cursor), "Frame {} is linked twice.", cursor);
                cursor = base.add(cursor * Frame::SIZE).cast::<usize>().read();
            }

            assert_eq!(seen.len(), self.len, "Tracked length does not match the links.");
        }
    }
}

#[cfg(test)]
mod test {
    use core::mem::size_of;

    use super::FreeList;
    use crate::mem::phys::Frame;

    const FRAMES: usize = 4;

    fn arena() -> Vec<usize> {
        vec![0; FRAMES * Frame::SIZE / size_of::<usize>()]
    }

    #[test]
    fn push_and_pop() {
        let mut arena = arena();
        let base = arena.as_mut_ptr() as *mut u8;
        let mut list = FreeList::new();

        assert_eq!(unsafe { list.pop(base) }, None);

        for index in 0..FRAMES {
            unsafe {
                list.push(base.add(index * Frame::SIZE), index);
                list.validate(base, FRAMES);
            }
        }
        assert_eq!(list.len(), FRAMES);

        for index in (0..FRAMES).rev() {
            assert_eq!(unsafe { list.pop(base) }, Some(index));
            unsafe { list.validate(base, FRAMES) };
        }
        assert_eq!(list.len(), 0);
        assert_eq!(unsafe { list.pop(base) }, None);
    }

    #[test]
    fn relink() {
        let mut arena = arena();
        let base = arena.as_mut_ptr() as *mut u8;
        let mut list = FreeList::new();

        unsafe {
            list.push(base, 0);
            list.push(base.add(Frame::SIZE), 1);

            assert_eq!(list.pop(base), Some(1));
            list.push(base.add(3 * Frame::SIZE), 3);
            list.validate(base, FRAMES);

            assert_eq!(list.pop(base), Some(3));
            assert_eq!(list.pop(base), Some(0));
            assert_eq!(list.pop(base), None);
        }
    }
}
