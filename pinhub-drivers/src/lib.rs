//! Driver helpers and listeners
//!
//! This crate builds on the traits and types of pinhub-core:
//!
//! - Per-mille duty scaling onto any `embedded-hal` PWM output
//! - Duty sweep listener (breathing output on a pulse-width pin)

#![no_std]
#![deny(unsafe_code)]

pub mod pwm;
pub mod sweep;

pub use pwm::{apply_duty, output_duty, scale_duty};
pub use sweep::DutySweep;
