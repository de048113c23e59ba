//! Clock gate control

use crate::clock::ClockDomain;

/// Opens and closes clock gates
///
/// The clock-domain table guarantees each call changes the gate state, so
/// implementations do not need to track it themselves.
pub trait ClockGate {
    /// Open the gate of a domain
    fn enable(&mut self, domain: ClockDomain);

    /// Close the gate of a domain
    fn disable(&mut self, domain: ClockDomain);
}
