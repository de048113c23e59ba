//! Pin configuration and declarations

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pinhub_hal::gpio::{PinMode, Pull, Speed};

use super::peripherals::PeripheralConfig;
use crate::identity::PinId;

/// Electrical configuration of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Pin function
    pub mode: PinMode,
    /// Internal bias resistor
    pub pull: Pull,
    /// Output slew rate (ignored for inputs)
    pub speed: Speed,
}

impl PinConfig {
    /// Digital input with the given bias
    pub const fn input(pull: Pull) -> Self {
        Self {
            mode: PinMode::Input,
            pull,
            speed: Speed::Low,
        }
    }

    /// Push-pull digital output
    pub const fn output(speed: Speed) -> Self {
        Self {
            mode: PinMode::OutputPushPull,
            pull: Pull::None,
            speed,
        }
    }

    /// Push-pull alternate function, driven by a peripheral
    pub const fn alternate(speed: Speed) -> Self {
        Self {
            mode: PinMode::AlternatePushPull,
            pull: Pull::None,
            speed,
        }
    }

    /// Analog input
    pub const fn analog() -> Self {
        Self {
            mode: PinMode::Analog,
            pull: Pull::None,
            speed: Speed::Low,
        }
    }
}

/// One entry of the compiled-in pin set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinDeclaration {
    /// Pin identity
    pub id: PinId,
    /// Electrical configuration
    pub config: PinConfig,
    /// Peripheral the pin is wired to
    pub peripheral: Option<PeripheralConfig>,
}

impl PinDeclaration {
    /// Plain GPIO pin with no peripheral binding
    pub const fn new(id: PinId, config: PinConfig) -> Self {
        Self {
            id,
            config,
            peripheral: None,
        }
    }

    /// Bind the pin to a peripheral instance
    pub const fn bound_to(mut self, peripheral: PeripheralConfig) -> Self {
        self.peripheral = Some(peripheral);
        self
    }
}
