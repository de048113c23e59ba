//! Board-agnostic core of the pin and peripheral registry firmware
//!
//! This crate contains all logic that does not depend on a specific chip:
//!
//! - Pin identity and key utilities
//! - Pin and peripheral configuration types
//! - Reference-counted clock-domain table
//! - Pin registry with lazy activation and a separate peripheral table
//! - Generic synchronous event dispatcher
//! - Poll-loop manager that republishes pin levels as events
//! - Collaborator traits implemented by board crates

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod clock;
pub mod config;
pub mod event;
pub mod identity;
pub mod manager;
pub mod registry;
pub mod traits;

#[cfg(test)]
mod testing;

pub use clock::{ClockDomain, ClockDomainTable, ClockError};
pub use config::{PeripheralConfig, PinConfig, PinDeclaration, MAX_LISTENERS, MAX_PERIPHERALS, MAX_PINS};
pub use event::{DispatchError, Dispatcher, EventKind, Handler, PinEvent, PinEvents};
pub use identity::{PinId, Port};
pub use manager::{InitReport, Manager, ManagerError, Phase};
pub use registry::{
    ActivationReport, PeripheralError, PeripheralHandle, PinRecord, PinStatus, Registry,
    RegistryError,
};
pub use traits::{Board, ClockGate, HardwareError, PeripheralHardware, PinHardware};
