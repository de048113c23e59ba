//! I2C channel configuration
//!
//! Bus speed and register addressing for an addressed-bus controller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Width of device register addresses
    pub register_width: RegisterWidth,
    /// Per-transfer timeout in milliseconds
    pub timeout_ms: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self::with_frequency(100_000);

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self::with_frequency(400_000);

    const fn with_frequency(frequency: u32) -> Self {
        Self {
            frequency,
            register_width: RegisterWidth::Bits8,
            timeout_ms: 100,
        }
    }
}

/// Device register address width used by memory-style transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegisterWidth {
    Bits8,
    Bits16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(I2cConfig::default(), I2cConfig::STANDARD);
        assert_eq!(I2cConfig::FAST.frequency, 400_000);
        assert_eq!(I2cConfig::FAST.register_width, RegisterWidth::Bits8);
    }
}
