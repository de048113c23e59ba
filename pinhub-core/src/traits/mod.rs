//! Hardware collaborator traits
//!
//! These traits define the interface between the registry and the
//! chip-specific board implementation. The core never touches registers
//! itself; it asks the board to configure pins, open clock gates and bring
//! up peripheral instances.

pub mod clock;
pub mod gpio;
pub mod peripheral;

pub use clock::ClockGate;
pub use gpio::PinHardware;
pub use peripheral::PeripheralHardware;

/// Errors reported by board hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    /// The board cannot provide the requested pin or peripheral setup
    Unsupported,
    /// The resource is already in use
    Busy,
    /// The device did not respond in time
    Timeout,
    /// The device reported a fault
    Fault,
}

/// A complete board: pins, clock gates and peripherals
///
/// Implemented automatically for any type providing all three.
pub trait Board: PinHardware + ClockGate + PeripheralHardware {}

impl<T: PinHardware + ClockGate + PeripheralHardware> Board for T {}
