//! Single-initialization storage.

use core::cell::UnsafeCell;
use core::mem::transmute;
use core::ops::Deref;
use core::sync::atomic::{AtomicU8, Ordering};

#[repr(u8)]
enum OnceCellState {
    Empty = 0,
    Initializing = 1,
    Initialized = 2,
}

impl From<u8> for OnceCellState {
    fn from(value: u8) -> OnceCellState {
        if value > 2 {
            panic!("Invalid OnceCellState.");
        }

        unsafe { transmute(value) }
    }
}

/// A storage location which can be initialized once at runtime.
pub struct OnceCell<T> {
    inner: UnsafeCell<Option<T>>,
    state: AtomicU8,
}

unsafe impl<T: Send> Send for OnceCell<T> {}
unsafe impl<T: Send + Sync> Sync for OnceCell<T> {}

impl<T> OnceCell<T> {
    pub const fn new() -> OnceCell<T> {
        OnceCell {
            inner: UnsafeCell::new(None),
            state: AtomicU8::new(OnceCellState::Empty as u8),
        }
    }

    // Initialize the cell. Panics if double-initialized.
    pub fn init(&self, data: T) {
        if self
            .state
            .compare_exchange(
                OnceCellState::Empty as u8,
                OnceCellState::Initializing as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            panic!("Tried to initialize OnceCell twice.");
        }

        unsafe { *self.inner.get() = Some(data) };

        self.state
            .store(OnceCellState::Initialized as u8, Ordering::Release);
    }

    pub fn borrow(&self) -> Option<&T> {
        match self.state.load(Ordering::Acquire).into() {
            OnceCellState::Initialized => unsafe { &*self.inner.get() }.as_ref(),
            _ => None,
        }
    }
}

impl<T> Deref for OnceCell<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.borrow()
            .expect("Tried to dereference an uninitialized OnceCell.")
    }
}

#[cfg(test)]
mod test {
    use super::OnceCell;

    #[test]
    fn init_and_borrow() {
        let cell = OnceCell::<i32>::new();

        assert!(cell.borrow().is_none());

        cell.init(123);

        assert_eq!(*cell.borrow().unwrap(), 123);
        assert_eq!(*cell, 123);
    }

    #[test]
    #[should_panic(expected = "Tried to initialize OnceCell twice.")]
    fn double_init() {
        let cell = OnceCell::<bool>::new();
        cell.init(true);
        cell.init(true);
    }

    #[test]
    #[should_panic(expected = "Tried to dereference an uninitialized OnceCell.")]
    fn uninitialized() {
        let cell = OnceCell::<bool>::new();
        let out = *cell;
    }
}
