//! Peripheral bring-up and live control

use super::HardwareError;
use crate::config::{PeripheralConfig, Timer, TimerChannel};

/// On-chip peripheral control
pub trait PeripheralHardware {
    /// Initialize a peripheral instance
    ///
    /// Called at most once per activation for each distinct instance.
    fn init_peripheral(&mut self, config: &PeripheralConfig) -> Result<(), HardwareError>;

    /// Release a peripheral instance before its clock is gated off
    fn deinit_peripheral(&mut self, config: &PeripheralConfig) {
        let _ = config;
    }

    /// Write a pulse-width duty cycle in per-mille (0-1000)
    fn set_duty(
        &mut self,
        timer: Timer,
        channel: TimerChannel,
        duty_permille: u16,
    ) -> Result<(), HardwareError>;
}
