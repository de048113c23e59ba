//! Pinhub - Pin and Peripheral Registry Firmware
//!
//! Firmware binary for STM32F103 ("Blue Pill") boards. Declares the
//! compiled-in pin set, activates it and then polls every active pin
//! forever, publishing one event per pin per sweep. The independent
//! watchdog is refreshed after each sweep.

#![no_std]
#![no_main]

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_stm32::gpio::Flex;
use {defmt_rtt as _, panic_probe as _};

use pinhub_core::Manager;
use pinhub_drivers::DutySweep;
use pinhub_hal::WatchdogConfig;

mod board;
mod listeners;
mod pins;
mod watchdog;

use board::{PwmResources, SerialResources, Stm32Board};
use listeners::DutyTrace;
use watchdog::Iwdg;

/// Duty change per sweep (per-mille)
const SWEEP_STEP: u16 = 10;

/// Duty at which the sweep turns around (per-mille)
const SWEEP_UPPER: u16 = 100;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Pinhub firmware starting...");

    let p = embassy_stm32::init(Default::default());

    let mut board = Stm32Board::new(
        PwmResources {
            timer: p.TIM2,
            pin: p.PA0,
        },
        SerialResources {
            usart: p.USART1,
            tx: p.PA9,
            rx: p.PA10,
        },
    )
    .with_gpio(pins::LED, Flex::new(p.PC13));

    // Listeners must outlive the manager
    let mut sweep = DutySweep::new(pins::PWM_OUT, SWEEP_STEP, SWEEP_UPPER);
    let mut trace = DutyTrace::default();

    let mut manager: Manager<'_> = Manager::new();
    if manager.subscribe(&mut sweep).is_err() || manager.subscribe(&mut trace).is_err() {
        error!("listener table full");
    }

    match manager.init(&pins::PINS, &mut board) {
        Ok(report) => info!(
            "Initialized: {} active, {} failed",
            report.activation.activated, report.activation.failed
        ),
        Err(e) => error!("init failed: {:?}", e),
    }

    let mut watchdog = Iwdg::start(p.IWDG, WatchdogConfig::default());

    // The poll loop is the only task; it never yields
    manager.run(&mut board, &mut watchdog)
}
