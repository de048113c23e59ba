//! Independent watchdog

use embassy_stm32::peripherals::IWDG;
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_stm32::Peri;
use pinhub_hal::{Watchdog, WatchdogConfig};

/// IWDG running from the LSI oscillator
pub struct Iwdg {
    inner: IndependentWatchdog<'static, IWDG>,
}

impl Iwdg {
    /// Configure and start the watchdog; it cannot be stopped again
    pub fn start(peri: Peri<'static, IWDG>, config: WatchdogConfig) -> Self {
        let mut inner = IndependentWatchdog::new(peri, config.timeout_us());
        inner.unleash();
        Self { inner }
    }
}

impl Watchdog for Iwdg {
    fn refresh(&mut self) {
        self.inner.pet();
    }
}
