//! Configuration types
//!
//! The managed pin set is compile-time configuration: a slice of
//! [`PinDeclaration`]s, each naming a pin, its electrical setup and the
//! on-chip peripheral it is wired to (if any).

pub mod peripherals;
pub mod pins;

pub use peripherals::*;
pub use pins::*;

/// Maximum number of managed pins
pub const MAX_PINS: usize = 64;

/// Maximum number of distinct peripheral instances
pub const MAX_PERIPHERALS: usize = 16;

/// Maximum number of event listeners per manager
pub const MAX_LISTENERS: usize = 8;
