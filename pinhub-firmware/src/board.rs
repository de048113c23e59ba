//! STM32F103 board
//!
//! Plain GPIO pins live in a bank of [`Flex`] drivers. Pins wired to a
//! peripheral are handed to that peripheral's driver when it is first
//! initialized, so they are configured by the driver rather than the bank
//! and read back as low.
//!
//! Embassy opens the GPIO and peripheral clock gates when the drivers are
//! constructed, so the clock-gate calls only trace the registry's
//! bookkeeping.

use defmt::{debug, warn};
use embassy_stm32::gpio::{self, Flex, OutputType};
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::{PA0, PA10, PA9, TIM2, USART1};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::{self, Uart};
use embassy_stm32::Peri;
use heapless::Vec;

use pinhub_core::clock::ClockDomain;
use pinhub_core::config::{PeripheralConfig, PinConfig, Timer, TimerChannel, Usart};
use pinhub_core::identity::PinId;
use pinhub_core::traits::{ClockGate, HardwareError, PeripheralHardware, PinHardware};
use pinhub_drivers::pwm::{apply_duty, output_duty};
use pinhub_hal::gpio::{Level, PinMode, Pull, Speed};
use pinhub_hal::uart::{DataBits, Direction, Parity, StopBits};
use pinhub_hal::{PwmConfig, UartConfig};

use crate::pins::{PWM_OUT, SERIAL_RX, SERIAL_TX};

/// Plain GPIO pins managed by the board
pub const MAX_GPIO: usize = 8;

/// TIM2 with its CH1 output pin
pub struct PwmResources {
    pub timer: Peri<'static, TIM2>,
    pub pin: Peri<'static, PA0>,
}

/// USART1 with its pins
pub struct SerialResources {
    pub usart: Peri<'static, USART1>,
    pub tx: Peri<'static, PA9>,
    pub rx: Peri<'static, PA10>,
}

/// Live TIM2 channel 1 output
struct PwmOutput {
    pwm: SimplePwm<'static, TIM2>,
    config: PwmConfig,
}

/// Board implementation of the registry's hardware traits
pub struct Stm32Board {
    gpio: Vec<(PinId, Flex<'static>), MAX_GPIO>,
    pwm_resources: Option<PwmResources>,
    pwm: Option<PwmOutput>,
    serial_resources: Option<SerialResources>,
    serial: Option<Uart<'static, Blocking>>,
}

impl Stm32Board {
    /// Create a board owning the given peripheral resources
    pub fn new(pwm: PwmResources, serial: SerialResources) -> Self {
        Self {
            gpio: Vec::new(),
            pwm_resources: Some(pwm),
            pwm: None,
            serial_resources: Some(serial),
            serial: None,
        }
    }

    /// Add a plain GPIO pin to the bank
    pub fn with_gpio(mut self, id: PinId, pin: Flex<'static>) -> Self {
        if self.gpio.push((id, pin)).is_err() {
            warn!("gpio bank full, {} not added", id);
        }
        self
    }

    fn flex(&mut self, id: PinId) -> Option<&mut Flex<'static>> {
        self.gpio
            .iter_mut()
            .find(|(pin, _)| *pin == id)
            .map(|(_, flex)| flex)
    }

    fn init_pwm(&mut self, config: &PwmConfig) -> Result<(), HardwareError> {
        if let Some(output) = &mut self.pwm {
            if output.config != *config {
                return Err(HardwareError::Busy);
            }
            output.pwm.ch1().enable();
            return Ok(());
        }

        let resources = self.pwm_resources.take().ok_or(HardwareError::Busy)?;
        let ch1 = PwmPin::new(resources.pin, OutputType::PushPull);
        let mut pwm = SimplePwm::new(
            resources.timer,
            Some(ch1),
            None,
            None,
            None,
            Hertz(config.frequency_hz),
            CountingMode::EdgeAlignedUp,
        );

        let mut channel = pwm.ch1();
        if apply_duty(&mut channel, output_duty(config, config.initial_duty)).is_err() {
            warn!("pwm initial duty rejected");
            return Err(HardwareError::Fault);
        }
        channel.enable();

        self.pwm = Some(PwmOutput {
            pwm,
            config: *config,
        });
        Ok(())
    }

    fn init_serial(&mut self, config: &UartConfig) -> Result<(), HardwareError> {
        if self.serial.is_some() {
            return Ok(());
        }

        // The blocking driver owns both lines
        if config.direction != Direction::TxRx {
            return Err(HardwareError::Unsupported);
        }

        let resources = self.serial_resources.take().ok_or(HardwareError::Busy)?;
        let uart = Uart::new_blocking(
            resources.usart,
            resources.rx,
            resources.tx,
            uart_config(config),
        )
        .map_err(|_| HardwareError::Unsupported)?;

        self.serial = Some(uart);
        Ok(())
    }
}

fn uart_config(config: &UartConfig) -> usart::Config {
    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Eight => usart::DataBits::DataBits8,
        DataBits::Nine => usart::DataBits::DataBits9,
    };
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}

fn pull(pull: Pull) -> gpio::Pull {
    match pull {
        Pull::None => gpio::Pull::None,
        Pull::Up => gpio::Pull::Up,
        Pull::Down => gpio::Pull::Down,
    }
}

fn speed(speed: Speed) -> gpio::Speed {
    match speed {
        Speed::Low => gpio::Speed::Low,
        Speed::Medium => gpio::Speed::Medium,
        Speed::High => gpio::Speed::VeryHigh,
    }
}

/// Pins that belong to a peripheral driver rather than the bank
fn is_peripheral_pin(id: PinId) -> bool {
    id == PWM_OUT || id == SERIAL_TX || id == SERIAL_RX
}

impl PinHardware for Stm32Board {
    fn configure(&mut self, id: PinId, config: &PinConfig) -> Result<(), HardwareError> {
        if is_peripheral_pin(id) {
            return match config.mode {
                PinMode::Input | PinMode::AlternatePushPull | PinMode::AlternateOpenDrain => Ok(()),
                _ => Err(HardwareError::Unsupported),
            };
        }

        let flex = self.flex(id).ok_or(HardwareError::Unsupported)?;
        match config.mode {
            PinMode::Input => flex.set_as_input(pull(config.pull)),
            PinMode::OutputPushPull => flex.set_as_output(speed(config.speed)),
            PinMode::Analog => flex.set_as_analog(),
            PinMode::OutputOpenDrain | PinMode::AlternatePushPull | PinMode::AlternateOpenDrain => {
                return Err(HardwareError::Unsupported)
            }
        }
        Ok(())
    }

    fn read_level(&mut self, id: PinId) -> Level {
        match self.flex(id) {
            Some(flex) => Level::from(flex.is_high()),
            None => Level::Low,
        }
    }

    fn write_level(&mut self, id: PinId, level: Level) {
        if let Some(flex) = self.flex(id) {
            if level.is_high() {
                flex.set_high();
            } else {
                flex.set_low();
            }
        }
    }

    fn toggle(&mut self, id: PinId) {
        if let Some(flex) = self.flex(id) {
            flex.toggle();
        }
    }
}

impl ClockGate for Stm32Board {
    fn enable(&mut self, domain: ClockDomain) {
        debug!("clock {} on", domain);
    }

    fn disable(&mut self, domain: ClockDomain) {
        debug!("clock {} off", domain);
    }
}

impl PeripheralHardware for Stm32Board {
    fn init_peripheral(&mut self, config: &PeripheralConfig) -> Result<(), HardwareError> {
        match config {
            PeripheralConfig::PulseWidth {
                timer: Timer::Tim2,
                channel: TimerChannel::Ch1,
                config,
            } => self.init_pwm(config),
            PeripheralConfig::Serial {
                usart: Usart::Usart1,
                config,
            } => self.init_serial(config),
            _ => Err(HardwareError::Unsupported),
        }
    }

    fn deinit_peripheral(&mut self, config: &PeripheralConfig) {
        // Drivers are kept so the instance can be brought back later
        if let PeripheralConfig::PulseWidth { .. } = config {
            if let Some(output) = &mut self.pwm {
                output.pwm.ch1().disable();
            }
        }
    }

    fn set_duty(
        &mut self,
        timer: Timer,
        channel: TimerChannel,
        duty_permille: u16,
    ) -> Result<(), HardwareError> {
        if (timer, channel) != (Timer::Tim2, TimerChannel::Ch1) {
            return Err(HardwareError::Unsupported);
        }
        let output = self.pwm.as_mut().ok_or(HardwareError::Unsupported)?;
        let duty = output_duty(&output.config, duty_permille);
        let mut ch1 = output.pwm.ch1();
        apply_duty(&mut ch1, duty).map_err(|_| HardwareError::Fault)?;
        Ok(())
    }
}
