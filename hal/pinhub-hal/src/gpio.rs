//! GPIO electrical settings
//!
//! Describes how a pin is driven or sampled. Board crates translate these
//! into register writes for the specific chip.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Digital logic level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Logic 0 (reset state)
    #[default]
    Low,
    /// Logic 1 (set state)
    High,
}

impl Level {
    /// Check if this is logic 1
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// The opposite level
    pub fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Pin operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinMode {
    /// Digital input (also used for alternate-function inputs)
    #[default]
    Input,
    /// General-purpose output, push-pull
    OutputPushPull,
    /// General-purpose output, open-drain
    OutputOpenDrain,
    /// Peripheral-driven output, push-pull
    AlternatePushPull,
    /// Peripheral-driven output, open-drain (I2C lines)
    AlternateOpenDrain,
    /// Analog input, digital path disconnected
    Analog,
}

impl PinMode {
    /// Check if the pin is driven by software
    pub fn is_output(self) -> bool {
        matches!(self, PinMode::OutputPushPull | PinMode::OutputOpenDrain)
    }

    /// Check if the pin is handed over to a peripheral
    pub fn is_alternate(self) -> bool {
        matches!(
            self,
            PinMode::AlternatePushPull | PinMode::AlternateOpenDrain
        )
    }
}

/// Internal pull resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pull {
    /// Floating
    #[default]
    None,
    /// Pull-up to VDD
    Up,
    /// Pull-down to VSS
    Down,
}

/// Output slew rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Speed {
    /// 2 MHz
    #[default]
    Low,
    /// 10 MHz
    Medium,
    /// 50 MHz
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversions() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(bool::from(Level::High));
        assert_eq!(Level::High.toggled(), Level::Low);
        assert_eq!(Level::default(), Level::Low);
    }

    #[test]
    fn test_mode_classes() {
        assert!(PinMode::OutputPushPull.is_output());
        assert!(!PinMode::AlternatePushPull.is_output());
        assert!(PinMode::AlternateOpenDrain.is_alternate());
        assert!(!PinMode::Input.is_alternate());
    }
}
