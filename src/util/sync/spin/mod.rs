mod arch;
mod once_cell;
mod spinlock;

#[cfg(test)]
mod test;

pub use once_cell::OnceCell;
pub use spinlock::Spinlock;
