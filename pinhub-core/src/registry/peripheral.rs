//! Peripheral table entries and live handles

use pinhub_hal::pwm::clamp_duty;

use crate::config::PeripheralConfig;
use crate::traits::{HardwareError, PeripheralHardware};

/// Index of a peripheral in the registry's peripheral table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeripheralId(pub(crate) u8);

impl PeripheralId {
    /// Table index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Initialization state of a peripheral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralStatus {
    #[default]
    Pending,
    Active,
    /// Initialization failed; the error is reported for every bound pin
    Failed(HardwareError),
}

/// Errors from live peripheral control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralError {
    /// The operation needs a pulse-width binding
    NotPulseWidth,
    /// The board rejected the write
    Hardware(HardwareError),
}

impl From<HardwareError> for PeripheralError {
    fn from(error: HardwareError) -> Self {
        PeripheralError::Hardware(error)
    }
}

/// One peripheral instance shared by the pins bound to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Peripheral {
    pub(crate) config: PeripheralConfig,
    pub(crate) status: PeripheralStatus,
    pub(crate) duty: Option<u16>,
}

impl Peripheral {
    pub(crate) fn new(config: PeripheralConfig) -> Self {
        Self {
            config,
            status: PeripheralStatus::Pending,
            duty: config.initial_duty(),
        }
    }

    /// Instance configuration
    pub fn config(&self) -> &PeripheralConfig {
        &self.config
    }

    /// Initialization state
    pub fn status(&self) -> PeripheralStatus {
        self.status
    }

    /// Check whether the instance is initialized
    pub fn is_active(&self) -> bool {
        self.status == PeripheralStatus::Active
    }

    /// Live duty cycle in per-mille (pulse-width bindings only)
    pub fn duty(&self) -> Option<u16> {
        self.duty
    }

    pub(crate) fn reset(&mut self) {
        self.status = PeripheralStatus::Pending;
        self.duty = self.config.initial_duty();
    }
}

/// Mutable access to an active peripheral during event dispatch
pub struct PeripheralHandle<'a> {
    slot: &'a mut Peripheral,
    hardware: &'a mut dyn PeripheralHardware,
}

impl<'a> PeripheralHandle<'a> {
    pub(crate) fn new(slot: &'a mut Peripheral, hardware: &'a mut dyn PeripheralHardware) -> Self {
        Self { slot, hardware }
    }

    /// Instance configuration
    pub fn config(&self) -> &PeripheralConfig {
        &self.slot.config
    }

    /// Live duty cycle in per-mille
    pub fn duty(&self) -> Option<u16> {
        self.slot.duty
    }

    /// Set the duty cycle in per-mille, clamped to 1000
    ///
    /// The live value only changes once the board accepted the write.
    /// Returns the duty actually applied.
    pub fn set_duty(&mut self, duty: u16) -> Result<u16, PeripheralError> {
        let PeripheralConfig::PulseWidth { timer, channel, .. } = self.slot.config else {
            return Err(PeripheralError::NotPulseWidth);
        };
        let duty = clamp_duty(duty);
        self.hardware.set_duty(timer, channel, duty)?;
        self.slot.duty = Some(duty);
        Ok(duty)
    }
}

impl core::fmt::Debug for PeripheralHandle<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PeripheralHandle")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
