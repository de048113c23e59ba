//! Compiled-in pin set
//!
//! Blue Pill wiring: TIM2 CH1 drives the PWM output on PA0, USART1 sits on
//! PA9/PA10 and the on-board LED is PC13.

use pinhub_core::config::{PeripheralConfig, PinConfig, PinDeclaration, Timer, TimerChannel, Usart};
use pinhub_core::identity::{PinId, Port};
use pinhub_hal::{Pull, PwmConfig, Speed, UartConfig};

/// Pulse-width output
pub const PWM_OUT: PinId = PinId::new(Port::A, 0);
/// USART1 transmit
pub const SERIAL_TX: PinId = PinId::new(Port::A, 9);
/// USART1 receive
pub const SERIAL_RX: PinId = PinId::new(Port::A, 10);
/// On-board LED (active-low)
pub const LED: PinId = PinId::new(Port::C, 13);

const PWM: PeripheralConfig = PeripheralConfig::PulseWidth {
    timer: Timer::Tim2,
    channel: TimerChannel::Ch1,
    config: PwmConfig::new(1_000),
};

const SERIAL: PeripheralConfig = PeripheralConfig::Serial {
    usart: Usart::Usart1,
    config: UartConfig::new(9_600),
};

/// Pins declared at start-up
pub const PINS: [PinDeclaration; 4] = [
    PinDeclaration::new(PWM_OUT, PinConfig::alternate(Speed::High)).bound_to(PWM),
    PinDeclaration::new(SERIAL_TX, PinConfig::alternate(Speed::High)).bound_to(SERIAL),
    PinDeclaration::new(SERIAL_RX, PinConfig::input(Pull::None)).bound_to(SERIAL),
    PinDeclaration::new(LED, PinConfig::output(Speed::Low)),
];
