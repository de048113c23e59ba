//! Pin and peripheral registry
//!
//! The registry owns a bounded, registration-ordered array of pin records
//! and a separate table of the peripheral instances those pins are wired
//! to. Lookup is a linear scan; with at most [`MAX_PINS`] entries this keeps
//! memory use fixed and iteration order deterministic.
//!
//! Activation is lazy and one-shot per record: [`Registry::activate_all`]
//! claims the clock domains a pending record needs, configures the pin,
//! brings up its peripheral on first use and marks the record active.
//! Records that are already active or failed are skipped.

mod peripheral;
mod record;

pub use peripheral::{
    Peripheral, PeripheralError, PeripheralHandle, PeripheralId, PeripheralStatus,
};
pub use record::{PinRecord, PinStatus};

use heapless::Vec;
use pinhub_hal::Level;

use crate::clock::{ClockDomain, ClockDomainTable};
use crate::config::{
    PeripheralConfig, PinConfig, PinDeclaration, MAX_PERIPHERALS, MAX_PINS,
};
use crate::event::PinEvent;
use crate::identity::{PinId, Port};
use crate::traits::{Board, HardwareError, PinHardware};

/// Errors adding a pin to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Pin number outside 0-15
    InvalidIdentity,
    /// A record with the same identity already exists
    DuplicateIdentity,
    /// The pin table is full
    CapacityExceeded,
    /// The peripheral table is full
    PeripheralCapacityExceeded,
    /// The peripheral instance is already bound with a different configuration
    PeripheralConflict,
}

/// Outcome of one activation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivationReport {
    /// Records that became active in this pass
    pub activated: usize,
    /// Records that failed in this pass
    pub failed: usize,
}

/// Bounded pin registry
#[derive(Debug)]
pub struct Registry {
    pins: Vec<PinRecord, MAX_PINS>,
    peripherals: Vec<Peripheral, MAX_PERIPHERALS>,
    clocks: ClockDomainTable,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            pins: Vec::new(),
            peripherals: Vec::new(),
            clocks: ClockDomainTable::new(),
        }
    }

    /// Declare a pin
    ///
    /// Identities must be unique: a second declaration of the same pin is
    /// rejected and leaves the original record untouched. Pins naming the
    /// same peripheral instance share its table entry if their
    /// configurations match.
    pub fn add(
        &mut self,
        id: PinId,
        config: PinConfig,
        peripheral: Option<PeripheralConfig>,
    ) -> Result<(), RegistryError> {
        if !id.is_valid() {
            return Err(RegistryError::InvalidIdentity);
        }
        if self.contains(id) {
            return Err(RegistryError::DuplicateIdentity);
        }
        if self.pins.is_full() {
            return Err(RegistryError::CapacityExceeded);
        }

        let binding = match peripheral {
            Some(config) => Some(self.bind_peripheral(config)?),
            None => None,
        };

        self.pins
            .push(PinRecord::new(id, config, binding))
            .map_err(|_| RegistryError::CapacityExceeded)
    }

    /// Declare a pin from a compiled-in declaration
    pub fn add_declaration(&mut self, declaration: &PinDeclaration) -> Result<(), RegistryError> {
        self.add(declaration.id, declaration.config, declaration.peripheral)
    }

    fn bind_peripheral(&mut self, config: PeripheralConfig) -> Result<PeripheralId, RegistryError> {
        if self
            .peripherals
            .iter()
            .any(|slot| slot.config.conflicts_with(&config))
        {
            return Err(RegistryError::PeripheralConflict);
        }
        if let Some(index) = self
            .peripherals
            .iter()
            .position(|slot| slot.config.same_instance(&config))
        {
            return Ok(PeripheralId(index as u8));
        }

        let index = self.peripherals.len();
        self.peripherals
            .push(Peripheral::new(config))
            .map_err(|_| RegistryError::PeripheralCapacityExceeded)?;
        Ok(PeripheralId(index as u8))
    }

    /// Look up a record
    pub fn get(&self, id: PinId) -> Option<&PinRecord> {
        self.pins.iter().find(|record| record.id == id)
    }

    /// Check whether a pin is declared
    pub fn contains(&self, id: PinId) -> bool {
        self.get(id).is_some()
    }

    /// Number of declared pins
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Check whether no pins are declared
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Number of active pins
    pub fn active_count(&self) -> usize {
        self.pins.iter().filter(|r| r.is_initialized()).count()
    }

    /// Records in registration order
    pub fn iter(&self) -> impl Iterator<Item = &PinRecord> {
        self.pins.iter()
    }

    /// Visit every record in registration order
    pub fn for_each<F: FnMut(&PinRecord)>(&self, visitor: F) {
        self.pins.iter().for_each(visitor);
    }

    /// Visit the records of one port in registration order
    pub fn for_each_in_port<F: FnMut(&PinRecord)>(&self, port: Port, visitor: F) {
        self.pins
            .iter()
            .filter(|record| record.id.port() == port)
            .for_each(visitor);
    }

    /// First record matching a predicate, in registration order
    pub fn find_first<P: FnMut(&PinRecord) -> bool>(&self, mut predicate: P) -> Option<&PinRecord> {
        self.pins.iter().find(|record| predicate(*record))
    }

    /// Peripheral table entry
    pub fn peripheral(&self, id: PeripheralId) -> Option<&Peripheral> {
        self.peripherals.get(id.index())
    }

    /// Peripheral bound to a pin
    pub fn peripheral_of(&self, pin: PinId) -> Option<&Peripheral> {
        self.get(pin)?.peripheral.and_then(|id| self.peripheral(id))
    }

    /// Number of distinct peripheral instances
    pub fn peripheral_count(&self) -> usize {
        self.peripherals.len()
    }

    /// Clock-domain state
    pub fn clocks(&self) -> &ClockDomainTable {
        &self.clocks
    }

    /// Read the level of an active pin
    ///
    /// Unknown, pending and failed pins read as [`Level::Low`].
    pub fn read<P: PinHardware + ?Sized>(&self, id: PinId, pins: &mut P) -> Level {
        match self.get(id) {
            Some(record) if record.is_initialized() => pins.read_level(id),
            _ => Level::Low,
        }
    }

    /// Activate every pending record in registration order
    pub fn activate_all<B: Board + ?Sized>(&mut self, board: &mut B) -> ActivationReport {
        let mut report = ActivationReport::default();

        for index in 0..self.pins.len() {
            if self.pins[index].status != PinStatus::Pending {
                continue;
            }

            let id = self.pins[index].id;
            match self.activate(index, board) {
                Ok(()) => {
                    self.pins[index].status = PinStatus::Active;
                    report.activated += 1;
                }
                Err(error) => {
                    self.pins[index].status = PinStatus::Failed(error);
                    report.failed += 1;
                    log_error!("pin {} failed to activate: {:?}", id, error);
                }
            }
        }

        report
    }

    fn activate<B: Board + ?Sized>(&mut self, index: usize, board: &mut B) -> Result<(), HardwareError> {
        let record = self.pins[index];

        let peripheral_domain = match record.peripheral {
            Some(pid) => {
                let slot = &self.peripherals[pid.index()];
                if let PeripheralStatus::Failed(error) = slot.status {
                    return Err(error);
                }
                Some(slot.config.clock_domain())
            }
            None => None,
        };

        let port_domain = record.id.port().clock_domain();
        self.clocks.claim(port_domain, board);
        if let Some(domain) = peripheral_domain {
            self.clocks.claim(domain, board);
        }

        let result = board
            .configure(record.id, &record.config)
            .and_then(|()| match record.peripheral {
                Some(pid) => Self::init_peripheral(&mut self.peripherals[pid.index()], board),
                None => Ok(()),
            });

        if result.is_err() {
            self.drop_claims(port_domain, peripheral_domain, board);
        }
        result
    }

    fn init_peripheral<B: Board + ?Sized>(
        slot: &mut Peripheral,
        board: &mut B,
    ) -> Result<(), HardwareError> {
        match slot.status {
            PeripheralStatus::Active => Ok(()),
            PeripheralStatus::Failed(error) => Err(error),
            PeripheralStatus::Pending => match board.init_peripheral(&slot.config) {
                Ok(()) => {
                    slot.status = PeripheralStatus::Active;
                    Ok(())
                }
                Err(error) => {
                    slot.status = PeripheralStatus::Failed(error);
                    Err(error)
                }
            },
        }
    }

    fn drop_claims<B: Board + ?Sized>(
        &mut self,
        port_domain: ClockDomain,
        peripheral_domain: Option<ClockDomain>,
        board: &mut B,
    ) {
        if let Some(domain) = peripheral_domain {
            if self.clocks.release(domain, board).is_err() {
                log_warn!("clock domain {:?} released without a claim", domain);
            }
        }
        if self.clocks.release(port_domain, board).is_err() {
            log_warn!("clock domain {:?} released without a claim", port_domain);
        }
    }

    /// Release every active record in reverse registration order
    ///
    /// Peripherals are shut down once their last active pin is released and
    /// clock gates close as their claims drop to zero. Released records
    /// return to pending so a later [`Registry::activate_all`] restores the
    /// same pin set. Failed records are left as they are.
    pub fn release_all<B: Board + ?Sized>(&mut self, board: &mut B) -> usize {
        let mut released = 0;

        for index in (0..self.pins.len()).rev() {
            if !self.pins[index].is_initialized() {
                continue;
            }
            self.pins[index].status = PinStatus::Pending;
            released += 1;

            let record = self.pins[index];
            let peripheral_domain = match record.peripheral {
                Some(pid) => {
                    let still_used = self
                        .pins
                        .iter()
                        .any(|other| other.peripheral == Some(pid) && other.is_initialized());
                    let slot = &mut self.peripherals[pid.index()];
                    if !still_used && slot.is_active() {
                        board.deinit_peripheral(&slot.config);
                        slot.reset();
                    }
                    Some(slot.config.clock_domain())
                }
                None => None,
            };

            self.drop_claims(record.id.port().clock_domain(), peripheral_domain, board);
        }

        released
    }

    /// Read every active pin and hand one event per pin to `visitor`
    ///
    /// Records are visited in registration order. Returns the number of
    /// events produced.
    pub fn sweep<B, F>(&mut self, board: &mut B, mut visitor: F) -> usize
    where
        B: Board,
        F: FnMut(&mut PinEvent<'_>),
    {
        let Self {
            pins, peripherals, ..
        } = self;
        let mut published = 0;

        for record in pins.iter() {
            if !record.is_initialized() {
                continue;
            }

            let level = board.read_level(record.id);
            let peripheral = match record.peripheral {
                Some(pid) => match peripherals.get_mut(pid.index()) {
                    Some(slot) if slot.is_active() => Some(PeripheralHandle::new(slot, &mut *board)),
                    _ => None,
                },
                None => None,
            };

            let mut event = PinEvent::new(record, level, peripheral);
            visitor(&mut event);
            published += 1;
        }

        published
    }
}
