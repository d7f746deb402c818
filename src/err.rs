//! Protocol violations and their escalation.

use core::fmt::{self, Display, Formatter};

use log::error;

use crate::mem::PhysicalAddress;

/// A caller protocol violation. Unlike exhaustion, these are never
/// recoverable: continuing would corrupt the frame pool.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Violation {
    /// The address is not aligned to the frame size.
    Unaligned(PhysicalAddress),
    /// The address falls outside the managed range.
    OutOfRange {
        address: PhysicalAddress,
        start: PhysicalAddress,
        end: PhysicalAddress,
    },
    /// A reference count was decremented below zero.
    RefCountUnderflow(PhysicalAddress),
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Violation::Unaligned(address) => write!(f, "Unaligned frame address {}.", address),
            Violation::OutOfRange {
                address,
                start,
                end,
            } => write!(
                f,
                "Address {} is outside the managed range {} - {}.",
                address, start, end
            ),
            Violation::RefCountUnderflow(address) => {
                write!(f, "Reference count underflow at {}.", address)
            }
        }
    }
}

/// Escalate a violation. Logs and never returns.
pub(crate) fn fatal(violation: Violation) -> ! {
    error!("{}", violation);
    panic!("{}", violation);
}
