pub mod phys;
mod types;

pub use types::{align_down, align_up, size, PhysicalAddress, RawPhysicalAddress};
