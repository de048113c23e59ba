//! Poll-loop manager
//!
//! Owns the registry and the pin-event dispatcher. `init` declares the
//! compiled-in pin set and activates it; from then on every `poll` reads
//! each active pin and publishes one [`PinEvent`](crate::event::PinEvent)
//! per pin, whether or not its level changed since the previous sweep.

use pinhub_hal::Watchdog;

use crate::config::{PinDeclaration, MAX_LISTENERS};
use crate::event::{DispatchError, Dispatcher, Handler, PinEvents};
use crate::registry::{ActivationReport, Registry};
use crate::traits::Board;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Pins not yet declared
    #[default]
    Unconfigured,
    /// Pin set activated; polling
    Running,
}

/// Errors from manager lifecycle calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ManagerError {
    /// `init` was already called
    AlreadyRunning,
}

/// Outcome of `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitReport {
    /// Declarations accepted by the registry
    pub declared: usize,
    /// Declarations the registry rejected
    pub rejected: usize,
    /// Result of the activation pass
    pub activation: ActivationReport,
}

/// Registry, dispatcher and poll loop
pub struct Manager<'h, const N: usize = MAX_LISTENERS> {
    registry: Registry,
    dispatcher: Dispatcher<'h, PinEvents, N>,
    phase: Phase,
    sweeps: u32,
}

impl<'h, const N: usize> Default for Manager<'h, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h, const N: usize> Manager<'h, N> {
    /// Create an unconfigured manager
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
            dispatcher: Dispatcher::new(),
            phase: Phase::Unconfigured,
            sweeps: 0,
        }
    }

    /// Declare the pin set and activate it
    ///
    /// Rejected declarations are logged and skipped. A second call returns
    /// [`ManagerError::AlreadyRunning`] without touching the registry.
    pub fn init<B: Board + ?Sized>(
        &mut self,
        declarations: &[PinDeclaration],
        board: &mut B,
    ) -> Result<InitReport, ManagerError> {
        if self.phase == Phase::Running {
            log_error!("init called while already running");
            return Err(ManagerError::AlreadyRunning);
        }

        let mut report = InitReport::default();
        for declaration in declarations {
            match self.registry.add_declaration(declaration) {
                Ok(()) => report.declared += 1,
                Err(error) => {
                    report.rejected += 1;
                    log_warn!("pin {} rejected: {:?}", declaration.id, error);
                }
            }
        }

        report.activation = self.registry.activate_all(board);
        self.phase = Phase::Running;

        log_info!(
            "{} pins declared, {} rejected, {} active, {} failed",
            report.declared,
            report.rejected,
            report.activation.activated,
            report.activation.failed
        );

        Ok(report)
    }

    /// Register a pin-event listener
    ///
    /// Listeners run in subscription order on every published event.
    pub fn subscribe(&mut self, handler: &'h mut dyn Handler<PinEvents>) -> Result<(), DispatchError> {
        self.dispatcher.subscribe(handler)
    }

    /// Run one poll sweep
    ///
    /// Publishes one event per active pin and returns the number published.
    /// Nothing is published before `init`.
    pub fn poll<B: Board>(&mut self, board: &mut B) -> usize {
        if self.phase != Phase::Running {
            return 0;
        }

        let dispatcher = &mut self.dispatcher;
        let published = self.registry.sweep(board, |event| {
            dispatcher.publish(event);
        });
        self.sweeps = self.sweeps.wrapping_add(1);
        published
    }

    /// Poll once, then refresh the watchdog
    pub fn tick<B: Board, W: Watchdog + ?Sized>(&mut self, board: &mut B, watchdog: &mut W) -> usize {
        let published = self.poll(board);
        watchdog.refresh();
        published
    }

    /// Poll forever
    pub fn run<B: Board, W: Watchdog + ?Sized>(&mut self, board: &mut B, watchdog: &mut W) -> ! {
        loop {
            self.tick(board, watchdog);
        }
    }

    /// Pin registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed poll sweeps (wrapping)
    pub fn sweep_count(&self) -> u32 {
        self.sweeps
    }

    /// Number of subscribed listeners
    pub fn listener_count(&self) -> usize {
        self.dispatcher.len()
    }
}
