//! Peripheral bindings
//!
//! A pin is wired to at most one on-chip functional unit. The binding names
//! the concrete instance (which timer, which USART) together with the
//! configuration that instance is initialized with.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pinhub_hal::{AdcConfig, DmaConfig, I2cConfig, PwmConfig, SpiConfig, UartConfig};

use crate::clock::ClockDomain;

/// General-purpose / advanced timer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Timer {
    Tim1,
    Tim2,
    Tim3,
    Tim4,
}

/// Timer capture/compare channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimerChannel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
}

/// USART instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Usart {
    Usart1,
    Usart2,
    Usart3,
}

/// SPI controller instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpiInstance {
    Spi1,
    Spi2,
}

/// I2C controller instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum I2cInstance {
    I2c1,
    I2c2,
}

/// DMA controller instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DmaController {
    Dma1,
    Dma2,
}

/// ADC instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AdcInstance {
    Adc1,
    Adc2,
}

/// Peripheral a pin is bound to, with the configuration of that instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PeripheralConfig {
    /// Timer output compare channel
    PulseWidth {
        timer: Timer,
        channel: TimerChannel,
        config: PwmConfig,
    },
    /// Asynchronous serial
    Serial { usart: Usart, config: UartConfig },
    /// Synchronous serial
    Spi { spi: SpiInstance, config: SpiConfig },
    /// Addressed bus
    Bus { i2c: I2cInstance, config: I2cConfig },
    /// Bulk-transfer channel (1-based channel number)
    BulkTransfer {
        dma: DmaController,
        channel: u8,
        config: DmaConfig,
    },
    /// Analog input channel
    Analog {
        adc: AdcInstance,
        channel: u8,
        config: AdcConfig,
    },
}

impl PeripheralConfig {
    /// Clock domain gating the peripheral instance
    pub fn clock_domain(&self) -> ClockDomain {
        match self {
            Self::PulseWidth { timer, .. } => match timer {
                Timer::Tim1 => ClockDomain::Tim1,
                Timer::Tim2 => ClockDomain::Tim2,
                Timer::Tim3 => ClockDomain::Tim3,
                Timer::Tim4 => ClockDomain::Tim4,
            },
            Self::Serial { usart, .. } => match usart {
                Usart::Usart1 => ClockDomain::Usart1,
                Usart::Usart2 => ClockDomain::Usart2,
                Usart::Usart3 => ClockDomain::Usart3,
            },
            Self::Spi { spi, .. } => match spi {
                SpiInstance::Spi1 => ClockDomain::Spi1,
                SpiInstance::Spi2 => ClockDomain::Spi2,
            },
            Self::Bus { i2c, .. } => match i2c {
                I2cInstance::I2c1 => ClockDomain::I2c1,
                I2cInstance::I2c2 => ClockDomain::I2c2,
            },
            Self::BulkTransfer { dma, .. } => match dma {
                DmaController::Dma1 => ClockDomain::Dma1,
                DmaController::Dma2 => ClockDomain::Dma2,
            },
            Self::Analog { adc, .. } => match adc {
                AdcInstance::Adc1 => ClockDomain::Adc1,
                AdcInstance::Adc2 => ClockDomain::Adc2,
            },
        }
    }

    /// Check whether two bindings address the same hardware instance
    ///
    /// Serial, SPI and I2C bindings share the whole controller between their
    /// lines; timer, DMA and ADC bindings are per channel.
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::PulseWidth { timer: a, channel: ca, .. },
                Self::PulseWidth { timer: b, channel: cb, .. },
            ) => a == b && ca == cb,
            (Self::Serial { usart: a, .. }, Self::Serial { usart: b, .. }) => a == b,
            (Self::Spi { spi: a, .. }, Self::Spi { spi: b, .. }) => a == b,
            (Self::Bus { i2c: a, .. }, Self::Bus { i2c: b, .. }) => a == b,
            (
                Self::BulkTransfer { dma: a, channel: ca, .. },
                Self::BulkTransfer { dma: b, channel: cb, .. },
            ) => a == b && ca == cb,
            (
                Self::Analog { adc: a, channel: ca, .. },
                Self::Analog { adc: b, channel: cb, .. },
            ) => a == b && ca == cb,
            _ => false,
        }
    }

    /// Check whether two bindings cannot be brought up together
    ///
    /// The same instance with a different configuration conflicts. So do two
    /// channels of one timer at different frequencies, since the period
    /// belongs to the whole timer.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::PulseWidth { timer: a, config: fa, .. },
                Self::PulseWidth { timer: b, config: fb, .. },
            ) if a == b && fa.frequency_hz != fb.frequency_hz => true,
            _ => self.same_instance(other) && self != other,
        }
    }

    /// Check whether this is a pulse-width binding
    pub fn is_pulse_width(&self) -> bool {
        matches!(self, Self::PulseWidth { .. })
    }

    /// Duty a pulse-width binding starts at
    pub fn initial_duty(&self) -> Option<u16> {
        match self {
            Self::PulseWidth { config, .. } => Some(config.initial_duty),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uart(baudrate: u32) -> PeripheralConfig {
        PeripheralConfig::Serial {
            usart: Usart::Usart1,
            config: UartConfig::new(baudrate),
        }
    }

    fn pwm(channel: TimerChannel) -> PeripheralConfig {
        PeripheralConfig::PulseWidth {
            timer: Timer::Tim2,
            channel,
            config: PwmConfig::new(1_000).with_initial_duty(250),
        }
    }

    #[test]
    fn test_clock_domains() {
        assert_eq!(uart(9600).clock_domain(), ClockDomain::Usart1);
        assert_eq!(pwm(TimerChannel::Ch1).clock_domain(), ClockDomain::Tim2);
        let adc = PeripheralConfig::Analog {
            adc: AdcInstance::Adc2,
            channel: 3,
            config: AdcConfig::default(),
        };
        assert_eq!(adc.clock_domain(), ClockDomain::Adc2);
    }

    #[test]
    fn test_same_instance() {
        // Both lines of one USART share the controller
        assert!(uart(9600).same_instance(&uart(115_200)));
        // Timer channels are distinct instances
        assert!(!pwm(TimerChannel::Ch1).same_instance(&pwm(TimerChannel::Ch2)));
        assert!(pwm(TimerChannel::Ch3).same_instance(&pwm(TimerChannel::Ch3)));
        assert!(!uart(9600).same_instance(&pwm(TimerChannel::Ch1)));
    }

    #[test]
    fn test_conflicts_with() {
        assert!(uart(9600).conflicts_with(&uart(115_200)));
        assert!(!uart(9600).conflicts_with(&uart(9600)));
        // Channels of one timer may differ in duty but not in frequency
        let fast = PeripheralConfig::PulseWidth {
            timer: Timer::Tim2,
            channel: TimerChannel::Ch2,
            config: PwmConfig::new(20_000),
        };
        assert!(pwm(TimerChannel::Ch1).conflicts_with(&fast));
        let slow = PeripheralConfig::PulseWidth {
            timer: Timer::Tim2,
            channel: TimerChannel::Ch2,
            config: PwmConfig::new(1_000),
        };
        assert!(!pwm(TimerChannel::Ch1).conflicts_with(&slow));
        let other_timer = PeripheralConfig::PulseWidth {
            timer: Timer::Tim3,
            channel: TimerChannel::Ch2,
            config: PwmConfig::new(20_000),
        };
        assert!(!pwm(TimerChannel::Ch1).conflicts_with(&other_timer));
    }

    #[test]
    fn test_initial_duty() {
        assert_eq!(pwm(TimerChannel::Ch1).initial_duty(), Some(250));
        assert_eq!(uart(9600).initial_duty(), None);
        assert!(pwm(TimerChannel::Ch1).is_pulse_width());
    }
}
