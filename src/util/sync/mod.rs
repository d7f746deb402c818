//! Synchronization utilities.

pub mod spin;

pub use spin::{OnceCell, Spinlock};
