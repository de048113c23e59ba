//! Pin records

use crate::config::PinConfig;
use crate::identity::PinId;
use crate::traits::HardwareError;

use super::peripheral::PeripheralId;

/// Activation state of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinStatus {
    /// Declared, not yet activated
    #[default]
    Pending,
    /// Clocks claimed and hardware configured
    Active,
    /// Activation failed; never retried or polled
    Failed(HardwareError),
}

/// One managed pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinRecord {
    pub(crate) id: PinId,
    pub(crate) config: PinConfig,
    pub(crate) peripheral: Option<PeripheralId>,
    pub(crate) status: PinStatus,
}

impl PinRecord {
    pub(crate) fn new(id: PinId, config: PinConfig, peripheral: Option<PeripheralId>) -> Self {
        Self {
            id,
            config,
            peripheral,
            status: PinStatus::Pending,
        }
    }

    /// Pin identity
    pub fn id(&self) -> PinId {
        self.id
    }

    /// Electrical configuration
    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    /// Index of the bound peripheral in the registry's peripheral table
    pub fn peripheral(&self) -> Option<PeripheralId> {
        self.peripheral
    }

    /// Activation state
    pub fn status(&self) -> PinStatus {
        self.status
    }

    /// Check whether the pin is active and polled
    pub fn is_initialized(&self) -> bool {
        self.status == PinStatus::Active
    }
}
