//! Analog input configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ADC channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdcConfig {
    /// Sample-and-hold time
    pub sample_time: SampleTime,
    /// Run the self-calibration once before the first conversion
    pub calibrate: bool,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            sample_time: SampleTime::Cycles55_5,
            calibrate: true,
        }
    }
}

/// Sample time in ADC clock cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleTime {
    Cycles1_5,
    Cycles7_5,
    Cycles13_5,
    Cycles28_5,
    Cycles41_5,
    Cycles55_5,
    Cycles71_5,
    Cycles239_5,
}
