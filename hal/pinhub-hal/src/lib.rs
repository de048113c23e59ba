//! Pinhub Hardware Abstraction Layer
//!
//! This crate defines the chip-independent vocabulary shared by the pin
//! registry and the board implementations: electrical pin settings,
//! per-peripheral configuration blocks and the watchdog contract.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pinhub-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinhub-core (registry, dispatch, loop) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinhub-hal (this crate - types/traits) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Contents
//!
//! - [`gpio`] - Logic levels, pull resistors, output speed, pin modes
//! - [`pwm`] - Pulse-width channel configuration (per-mille duty)
//! - [`uart`], [`spi`], [`i2c`] - Serial bus configuration
//! - [`dma`] - Bulk-transfer channel configuration
//! - [`adc`] - Analog input configuration
//! - [`watchdog::Watchdog`] - Liveness refresh contract

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod dma;
pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod spi;
pub mod uart;
pub mod watchdog;

// Re-export key types at crate root for convenience
pub use adc::AdcConfig;
pub use dma::DmaConfig;
pub use gpio::{Level, PinMode, Pull, Speed};
pub use i2c::I2cConfig;
pub use pwm::{PwmConfig, DUTY_MAX};
pub use spi::SpiConfig;
pub use uart::UartConfig;
pub use watchdog::{Watchdog, WatchdogConfig};
