//! Per-mille duty on embedded-hal PWM outputs
//!
//! The registry stores duty as per-mille so it is independent of each
//! timer's reload value. These helpers map it onto the compare range an
//! output reports through [`SetDutyCycle::max_duty_cycle`].

use embedded_hal::pwm::SetDutyCycle;
use pinhub_hal::pwm::{clamp_duty, PwmConfig, DUTY_MAX};

/// Scale a per-mille duty onto `0..=max`
///
/// Values above 1000 are clamped to full scale.
pub fn scale_duty(per_mille: u16, max: u16) -> u16 {
    let scaled = u32::from(clamp_duty(per_mille)) * u32::from(max) / u32::from(DUTY_MAX);
    scaled as u16
}

/// Duty to put on the wire for a channel, honouring active-low outputs
pub fn output_duty(config: &PwmConfig, per_mille: u16) -> u16 {
    let duty = clamp_duty(per_mille);
    if config.inverted {
        DUTY_MAX - duty
    } else {
        duty
    }
}

/// Write a per-mille duty to a PWM output
///
/// Returns the compare value written.
pub fn apply_duty<P: SetDutyCycle + ?Sized>(output: &mut P, per_mille: u16) -> Result<u16, P::Error> {
    let compare = scale_duty(per_mille, output.max_duty_cycle());
    output.set_duty_cycle(compare)?;
    Ok(compare)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// Mock PWM channel for testing
    struct MockChannel {
        max: u16,
        compare: u16,
    }

    impl ErrorType for MockChannel {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockChannel {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.compare = duty;
            Ok(())
        }
    }

    #[test]
    fn test_scale_duty() {
        assert_eq!(scale_duty(0, 999), 0);
        assert_eq!(scale_duty(500, 1000), 500);
        assert_eq!(scale_duty(500, 7199), 3599);
        assert_eq!(scale_duty(1000, u16::MAX), u16::MAX);
        // Clamped to full scale
        assert_eq!(scale_duty(4000, 7199), 7199);
    }

    #[test]
    fn test_apply_duty() {
        let mut channel = MockChannel { max: 2000, compare: 0 };

        assert_eq!(apply_duty(&mut channel, 250), Ok(500));
        assert_eq!(channel.compare, 500);

        assert_eq!(apply_duty(&mut channel, 1200), Ok(2000));
        assert_eq!(channel.compare, 2000);
    }

    /// Channel that rejects every write
    struct StuckChannel;

    impl ErrorType for StuckChannel {
        type Error = embedded_hal::pwm::ErrorKind;
    }

    impl SetDutyCycle for StuckChannel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
            Err(embedded_hal::pwm::ErrorKind::Other)
        }
    }

    #[test]
    fn test_apply_duty_error() {
        assert_eq!(
            apply_duty(&mut StuckChannel, 500),
            Err(embedded_hal::pwm::ErrorKind::Other)
        );
    }

    #[test]
    fn test_output_duty_inverted() {
        let normal = PwmConfig::new(1_000);
        let inverted = PwmConfig {
            inverted: true,
            ..normal
        };

        assert_eq!(output_duty(&normal, 300), 300);
        assert_eq!(output_duty(&inverted, 300), 700);
        assert_eq!(output_duty(&inverted, 5000), 0);
    }
}
