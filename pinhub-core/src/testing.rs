//! Host-side test doubles

use std::collections::HashMap;
use std::vec::Vec;

use pinhub_hal::{Level, Watchdog};

use crate::clock::ClockDomain;
use crate::config::{PeripheralConfig, PinConfig, Timer, TimerChannel};
use crate::identity::PinId;
use crate::traits::{ClockGate, HardwareError, PeripheralHardware, PinHardware};

/// Recording board with scripted levels and failures
#[derive(Debug, Default)]
pub struct MockBoard {
    pub enables: Vec<ClockDomain>,
    pub disables: Vec<ClockDomain>,
    pub configured: Vec<(PinId, PinConfig)>,
    pub peripheral_inits: Vec<PeripheralConfig>,
    pub peripheral_deinits: Vec<PeripheralConfig>,
    pub duty_writes: Vec<(Timer, TimerChannel, u16)>,
    pub reads: usize,
    levels: HashMap<PinId, Level>,
    failing_pins: Vec<PinId>,
    failing_peripherals: Vec<(ClockDomain, HardwareError)>,
    duty_error: Option<HardwareError>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&mut self, id: PinId, level: Level) {
        self.levels.insert(id, level);
    }

    /// Make `configure` fail with [`HardwareError::Fault`] for a pin
    pub fn fail_configure(&mut self, id: PinId) {
        self.failing_pins.push(id);
    }

    /// Make `init_peripheral` fail for any instance in a clock domain
    pub fn fail_peripheral(&mut self, domain: ClockDomain, error: HardwareError) {
        self.failing_peripherals.push((domain, error));
    }

    pub fn fail_duty_writes(&mut self, error: HardwareError) {
        self.duty_error = Some(error);
    }

    pub fn enables_of(&self, domain: ClockDomain) -> usize {
        self.enables.iter().filter(|d| **d == domain).count()
    }

    pub fn disables_of(&self, domain: ClockDomain) -> usize {
        self.disables.iter().filter(|d| **d == domain).count()
    }

    /// Activation-side hardware calls made so far
    pub fn hardware_calls(&self) -> usize {
        self.enables.len()
            + self.disables.len()
            + self.configured.len()
            + self.peripheral_inits.len()
            + self.peripheral_deinits.len()
    }
}

impl PinHardware for MockBoard {
    fn configure(&mut self, id: PinId, config: &PinConfig) -> Result<(), HardwareError> {
        self.configured.push((id, *config));
        if self.failing_pins.contains(&id) {
            return Err(HardwareError::Fault);
        }
        Ok(())
    }

    fn read_level(&mut self, id: PinId) -> Level {
        self.reads += 1;
        self.levels.get(&id).copied().unwrap_or_default()
    }

    fn write_level(&mut self, id: PinId, level: Level) {
        self.levels.insert(id, level);
    }
}

impl ClockGate for MockBoard {
    fn enable(&mut self, domain: ClockDomain) {
        self.enables.push(domain);
    }

    fn disable(&mut self, domain: ClockDomain) {
        self.disables.push(domain);
    }
}

impl PeripheralHardware for MockBoard {
    fn init_peripheral(&mut self, config: &PeripheralConfig) -> Result<(), HardwareError> {
        self.peripheral_inits.push(*config);
        match self
            .failing_peripherals
            .iter()
            .find(|(domain, _)| *domain == config.clock_domain())
        {
            Some((_, error)) => Err(*error),
            None => Ok(()),
        }
    }

    fn deinit_peripheral(&mut self, config: &PeripheralConfig) {
        self.peripheral_deinits.push(*config);
    }

    fn set_duty(
        &mut self,
        timer: Timer,
        channel: TimerChannel,
        duty_permille: u16,
    ) -> Result<(), HardwareError> {
        if let Some(error) = self.duty_error {
            return Err(error);
        }
        self.duty_writes.push((timer, channel, duty_permille));
        Ok(())
    }
}

/// Watchdog that counts refreshes
#[derive(Debug, Default)]
pub struct MockWatchdog {
    pub refreshes: u32,
}

impl Watchdog for MockWatchdog {
    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Port;

    #[test]
    fn test_toggle_uses_default_method() {
        let mut board = MockBoard::new();
        let id = PinId::new(Port::C, 13);

        board.toggle(id);
        assert_eq!(board.read_level(id), Level::High);
        board.toggle(id);
        assert_eq!(board.read_level(id), Level::Low);
    }
}
