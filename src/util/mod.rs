#[macro_use]
mod singleton;

pub mod sync;
