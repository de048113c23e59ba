//! Firmware-only event listeners

use defmt::debug;
use heapless::Vec;
use pinhub_core::event::{Handler, PinEvent, PinEvents};
use pinhub_core::identity::PinId;

/// Pulse-width pins tracked by [`DutyTrace`]
const TRACKED: usize = 4;

/// Logs the live duty of pulse-width pins whenever it changes
#[derive(Default)]
pub struct DutyTrace {
    last: Vec<(PinId, u16), TRACKED>,
}

impl Handler<PinEvents> for DutyTrace {
    fn handle(&mut self, event: &mut PinEvent<'_>) {
        let Some(duty) = event.peripheral().and_then(|p| p.duty()) else {
            return;
        };
        let id = event.id();

        match self.last.iter_mut().find(|(pin, _)| *pin == id) {
            Some((_, last)) if *last == duty => return,
            Some((_, last)) => *last = duty,
            None => {
                // Untracked beyond capacity; still logged
                let _ = self.last.push((id, duty));
            }
        }
        debug!("{} duty {}", id, duty);
    }
}
