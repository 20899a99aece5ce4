// bridge.rs - Drains raw device events into toggle requests

use std::sync::Arc;
use std::time::Duration;

use tracing::{trace, warn};

use crate::automaton::Automaton;
use crate::device::{DeviceSink, DeviceSource, GridAction, RawEvent};
use crate::grid::Coordinate;
use crate::scheduler::TickScheduler;

/// Pulls raw events off the device on a short fixed period and forwards
/// button releases to the controller as toggle requests.
///
/// Polling rather than a blocking read keeps the device library's dispatch
/// model decoupled from the controller's lock. Each physical release yields
/// exactly one `request_toggle`; presses, arc, and tilt events are dropped
/// here at the boundary.
pub struct EventBridge<S: DeviceSink> {
    automaton: Arc<Automaton<S>>,
    scheduler: TickScheduler,
}

impl<S: DeviceSink> EventBridge<S> {
    /// Bridge with the reference 16 ms drain period.
    pub fn new(automaton: Arc<Automaton<S>>) -> Self {
        Self::with_period(automaton, crate::DRAIN_PERIOD)
    }

    pub fn with_period(automaton: Arc<Automaton<S>>, period: Duration) -> Self {
        EventBridge {
            automaton,
            scheduler: TickScheduler::new(period),
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Starts the drain loop, taking ownership of the source. Idempotent in
    /// the scheduler sense: a running loop is replaced, never duplicated.
    pub async fn start<E: DeviceSource>(&mut self, mut source: E) {
        let automaton = Arc::clone(&self.automaton);
        let geometry = automaton.geometry();

        self.scheduler
            .start(move || {
                while let Some(event) = source.poll_next_event() {
                    match event {
                        RawEvent::Grid {
                            action: GridAction::Release,
                            x,
                            y,
                        } => {
                            if !geometry.contains(x, y) {
                                // Stray data during connect/disconnect; drop it.
                                trace!(x, y, "out-of-bounds grid event dropped");
                                continue;
                            }
                            if let Err(err) = automaton.request_toggle(Coordinate::new(x, y)) {
                                warn!(x, y, %err, "LED write failed for toggle");
                            }
                        }
                        RawEvent::Grid { .. } => {} // presses don't toggle
                        RawEvent::Arc { .. } | RawEvent::Tilt { .. } => {
                            trace!(?event, "non-grid event ignored");
                        }
                    }
                }
            })
            .await;
    }

    /// Stops the drain loop; no event is forwarded after this returns.
    pub async fn stop(&mut self) {
        self.scheduler.stop().await;
    }
}
