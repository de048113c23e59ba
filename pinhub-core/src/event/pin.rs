//! Pin level events published by the poll loop

use pinhub_hal::Level;

use super::EventKind;
use crate::identity::PinId;
use crate::registry::{PeripheralHandle, PinRecord};

/// Event kind for per-pin poll events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinEvents;

impl EventKind for PinEvents {
    type Event<'a> = PinEvent<'a>;
}

/// Level of one active pin, sampled during a poll sweep
///
/// Borrows the pin's record and, if it has one, its active peripheral for
/// the duration of dispatch only.
#[derive(Debug)]
pub struct PinEvent<'a> {
    id: PinId,
    level: Level,
    record: &'a PinRecord,
    peripheral: Option<PeripheralHandle<'a>>,
}

impl<'a> PinEvent<'a> {
    pub(crate) fn new(
        record: &'a PinRecord,
        level: Level,
        peripheral: Option<PeripheralHandle<'a>>,
    ) -> Self {
        Self {
            id: record.id(),
            level,
            record,
            peripheral,
        }
    }

    /// Pin identity
    pub fn id(&self) -> PinId {
        self.id
    }

    /// Sampled level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Registry record of the pin
    pub fn record(&self) -> &PinRecord {
        self.record
    }

    /// Check whether the pin has an active peripheral
    pub fn has_peripheral(&self) -> bool {
        self.peripheral.is_some()
    }

    /// Active peripheral bound to the pin
    pub fn peripheral(&self) -> Option<&PeripheralHandle<'a>> {
        self.peripheral.as_ref()
    }

    /// Active peripheral bound to the pin, for live changes such as duty
    pub fn peripheral_mut(&mut self) -> Option<&mut PeripheralHandle<'a>> {
        self.peripheral.as_mut()
    }
}
