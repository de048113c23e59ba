//! Pulse-width channel configuration
//!
//! Duty cycles are expressed in per-mille (0-1000) so that the value is
//! independent of the timer's auto-reload setting. Boards scale it onto the
//! compare register when the duty is applied.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Full-scale duty cycle (100.0%)
pub const DUTY_MAX: u16 = 1000;

/// PWM channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PwmConfig {
    /// Output frequency in Hz
    pub frequency_hz: u32,
    /// Duty applied when the channel starts (per-mille)
    pub initial_duty: u16,
    /// Output is active-low
    pub inverted: bool,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl PwmConfig {
    /// Active-high channel at the given frequency, starting at 0% duty
    pub const fn new(frequency_hz: u32) -> Self {
        Self {
            frequency_hz,
            initial_duty: 0,
            inverted: false,
        }
    }

    /// Set the starting duty (clamped to [`DUTY_MAX`])
    pub const fn with_initial_duty(mut self, duty: u16) -> Self {
        self.initial_duty = clamp_duty(duty);
        self
    }
}

/// Clamp a per-mille duty value to the valid range
pub const fn clamp_duty(duty: u16) -> u16 {
    if duty > DUTY_MAX {
        DUTY_MAX
    } else {
        duty
    }
}
