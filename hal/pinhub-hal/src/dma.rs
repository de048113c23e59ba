//! Bulk-transfer (DMA) channel configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// DMA channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DmaConfig {
    /// Transfer direction
    pub direction: TransferDirection,
    /// Arbitration priority
    pub priority: Priority,
    /// Width of each transferred item
    pub width: Width,
    /// Restart automatically after the last item
    pub circular: bool,
}

impl Default for DmaConfig {
    fn default() -> Self {
        Self {
            direction: TransferDirection::PeripheralToMemory,
            priority: Priority::Low,
            width: Width::Byte,
            circular: false,
        }
    }
}

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransferDirection {
    PeripheralToMemory,
    MemoryToPeripheral,
    MemoryToMemory,
}

/// Channel arbitration priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Priority {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Item width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Width {
    Byte,
    HalfWord,
    Word,
}

