//! Watchdog contract
//!
//! The poll loop's only liveness guarantee: [`Watchdog::refresh`] must be
//! called at least once per timeout window or the device is reset.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Low-speed internal oscillator feeding the independent watchdog
pub const LSI_HZ: u32 = 40_000;

/// Largest reload value (12-bit down-counter)
pub const MAX_RELOAD: u16 = 0x0FFF;

/// Hardware watchdog that must be refreshed periodically
pub trait Watchdog {
    /// Reload the watchdog counter
    fn refresh(&mut self);
}

/// Independent watchdog prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Prescaler {
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
    Div256,
}

impl Prescaler {
    /// Clock divider
    pub fn divider(self) -> u32 {
        match self {
            Prescaler::Div4 => 4,
            Prescaler::Div8 => 8,
            Prescaler::Div16 => 16,
            Prescaler::Div32 => 32,
            Prescaler::Div64 => 64,
            Prescaler::Div128 => 128,
            Prescaler::Div256 => 256,
        }
    }
}

/// Independent watchdog timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchdogConfig {
    /// Counter clock prescaler
    pub prescaler: Prescaler,
    /// Counter reload value (clamped to [`MAX_RELOAD`])
    pub reload: u16,
}

impl Default for WatchdogConfig {
    /// /256 with reload 312: just under two seconds
    fn default() -> Self {
        Self {
            prescaler: Prescaler::Div256,
            reload: 312,
        }
    }
}

impl WatchdogConfig {
    /// Time from the last refresh to reset, in microseconds
    pub fn timeout_us(&self) -> u32 {
        let reload = self.reload.min(MAX_RELOAD) as u64;
        let ticks = reload * self.prescaler.divider() as u64;
        (ticks * 1_000_000 / LSI_HZ as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        // 312 * 256 / 40 kHz = 1.9968 s
        assert_eq!(WatchdogConfig::default().timeout_us(), 1_996_800);
    }

    #[test]
    fn test_reload_clamped() {
        let config = WatchdogConfig {
            prescaler: Prescaler::Div4,
            reload: u16::MAX,
        };
        assert_eq!(config.timeout_us(), 409_500);
    }
}
