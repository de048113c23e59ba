//! Pin-level hardware access

use pinhub_hal::Level;

use super::HardwareError;
use crate::config::PinConfig;
use crate::identity::PinId;

/// Direct pin register access
///
/// Reads take `&mut self` because some boards latch the input register
/// through a shared peripheral handle.
pub trait PinHardware {
    /// Apply the electrical configuration of a pin
    fn configure(&mut self, id: PinId, config: &PinConfig) -> Result<(), HardwareError>;

    /// Read the current input level
    fn read_level(&mut self, id: PinId) -> Level;

    /// Drive an output level
    fn write_level(&mut self, id: PinId, level: Level);

    /// Invert the current output level
    fn toggle(&mut self, id: PinId) {
        let level = self.read_level(id);
        self.write_level(id, level.toggled());
    }
}
