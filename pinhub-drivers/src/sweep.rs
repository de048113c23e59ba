//! Duty sweep listener
//!
//! Ramps the duty of one pulse-width pin up and down by a fixed step each
//! time that pin's poll event is published, giving a breathing output.
//! The duty reverses direction when it reaches the upper bound and again
//! when it falls back to zero.

use pinhub_core::event::{Handler, PinEvent, PinEvents};
use pinhub_core::identity::PinId;
use pinhub_core::registry::PeripheralError;
use pinhub_hal::pwm::{clamp_duty, DUTY_MAX};

/// Breathing-duty listener for one pin
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutySweep {
    pin: PinId,
    /// Current duty (per-mille)
    duty: u16,
    /// Signed change applied on each event
    step: i16,
    /// Turn-around point (per-mille)
    upper: u16,
    /// Last write the peripheral rejected
    last_error: Option<PeripheralError>,
}

impl DutySweep {
    /// Sweep `pin` between 0 and `upper` per-mille in steps of `step`
    pub fn new(pin: PinId, step: u16, upper: u16) -> Self {
        let upper = clamp_duty(upper);
        let step = step.min(DUTY_MAX) as i16;
        Self {
            pin,
            duty: 0,
            step,
            upper,
            last_error: None,
        }
    }

    /// Pin this listener drives
    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// Duty written on the last event
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Check whether the duty is currently increasing
    pub fn is_rising(&self) -> bool {
        self.step > 0
    }

    /// Last rejected write, if any
    pub fn last_error(&self) -> Option<PeripheralError> {
        self.last_error
    }

    /// Move one step and return the new duty
    fn advance(&mut self) -> u16 {
        let next = (self.duty as i16 + self.step).clamp(0, self.upper as i16);
        self.duty = next as u16;

        if self.duty >= self.upper {
            self.step = -self.step.abs();
        } else if self.duty == 0 {
            self.step = self.step.abs();
        }
        self.duty
    }
}

impl Handler<PinEvents> for DutySweep {
    fn handle(&mut self, event: &mut PinEvent<'_>) {
        if event.id() != self.pin {
            return;
        }
        let Some(peripheral) = event.peripheral_mut() else {
            return;
        };

        let duty = self.advance();
        self.last_error = peripheral.set_duty(duty).err();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use pinhub_core::clock::ClockDomain;
    use pinhub_core::config::{PeripheralConfig, PinConfig, Timer, TimerChannel};
    use pinhub_core::identity::Port;
    use pinhub_core::traits::{ClockGate, HardwareError, PeripheralHardware, PinHardware};
    use pinhub_core::Registry;
    use pinhub_hal::{Level, PwmConfig, Speed};
    use std::vec::Vec;

    const PWM_PIN: PinId = PinId::new(Port::A, 0);
    const OTHER_PIN: PinId = PinId::new(Port::A, 1);

    /// Mock board recording duty writes
    #[derive(Default)]
    struct MockBoard {
        duties: Vec<u16>,
        reject: bool,
    }

    impl PinHardware for MockBoard {
        fn configure(&mut self, _id: PinId, _config: &PinConfig) -> Result<(), HardwareError> {
            Ok(())
        }

        fn read_level(&mut self, _id: PinId) -> Level {
            Level::Low
        }

        fn write_level(&mut self, _id: PinId, _level: Level) {}
    }

    impl ClockGate for MockBoard {
        fn enable(&mut self, _domain: ClockDomain) {}

        fn disable(&mut self, _domain: ClockDomain) {}
    }

    impl PeripheralHardware for MockBoard {
        fn init_peripheral(&mut self, _config: &PeripheralConfig) -> Result<(), HardwareError> {
            Ok(())
        }

        fn set_duty(
            &mut self,
            _timer: Timer,
            _channel: TimerChannel,
            duty_permille: u16,
        ) -> Result<(), HardwareError> {
            if self.reject {
                return Err(HardwareError::Busy);
            }
            self.duties.push(duty_permille);
            Ok(())
        }
    }

    fn registry(board: &mut MockBoard) -> Registry {
        let mut registry = Registry::new();
        registry
            .add(
                PWM_PIN,
                PinConfig::alternate(Speed::High),
                Some(PeripheralConfig::PulseWidth {
                    timer: Timer::Tim2,
                    channel: TimerChannel::Ch1,
                    config: PwmConfig::new(1_000),
                }),
            )
            .unwrap();
        registry.add(OTHER_PIN, PinConfig::default(), None).unwrap();
        registry.activate_all(board);
        registry
    }

    fn sweep(registry: &mut Registry, board: &mut MockBoard, listener: &mut DutySweep, times: usize) {
        for _ in 0..times {
            registry.sweep(board, |event| listener.handle(event));
        }
    }

    #[test]
    fn test_bounces_between_bounds() {
        let mut board = MockBoard::default();
        let mut registry = registry(&mut board);
        let mut listener = DutySweep::new(PWM_PIN, 10, 30);

        sweep(&mut registry, &mut board, &mut listener, 7);

        assert_eq!(board.duties, [10, 20, 30, 20, 10, 0, 10]);
        assert!(listener.is_rising());
        assert_eq!(
            registry.peripheral_of(PWM_PIN).and_then(|p| p.duty()),
            Some(10)
        );
    }

    #[test]
    fn test_uneven_step_clamps_at_upper() {
        let mut board = MockBoard::default();
        let mut registry = registry(&mut board);
        let mut listener = DutySweep::new(PWM_PIN, 40, 100);

        sweep(&mut registry, &mut board, &mut listener, 4);

        assert_eq!(board.duties, [40, 80, 100, 60]);
        assert!(!listener.is_rising());
    }

    #[test]
    fn test_ignores_other_pins() {
        let mut board = MockBoard::default();
        let mut registry = registry(&mut board);
        let mut listener = DutySweep::new(OTHER_PIN, 10, 100);

        // The pin has no peripheral to drive
        sweep(&mut registry, &mut board, &mut listener, 3);

        assert!(board.duties.is_empty());
        assert_eq!(listener.duty(), 0);
    }

    #[test]
    fn test_rejected_write_recorded() {
        let mut board = MockBoard {
            reject: true,
            ..Default::default()
        };
        let mut registry = registry(&mut board);
        let mut listener = DutySweep::new(PWM_PIN, 10, 100);

        sweep(&mut registry, &mut board, &mut listener, 1);

        assert_eq!(
            listener.last_error(),
            Some(PeripheralError::Hardware(HardwareError::Busy))
        );
        assert_eq!(
            registry.peripheral_of(PWM_PIN).and_then(|p| p.duty()),
            Some(0)
        );
    }
}
