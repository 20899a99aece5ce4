// device.rs - The device boundary: sink/source traits, raw events, and the
// in-memory simulated device used by tests and the demo binary.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::DeviceError;
use crate::grid::Coordinate;

/// Rows × columns reported by the connected device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
}

impl GridGeometry {
    /// Fallback edge length when the device reports zero in a dimension.
    pub const DEFAULT_EDGE: usize = 16;

    pub fn new(columns: usize, rows: usize) -> Self {
        GridGeometry { columns, rows }
    }

    /// Substitutes 16 for any dimension the device reported as zero.
    pub fn or_default(self) -> Self {
        let fix = |v: usize| if v == 0 { Self::DEFAULT_EDGE } else { v };
        GridGeometry {
            columns: fix(self.columns),
            rows: fix(self.rows),
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        GridGeometry::new(Self::DEFAULT_EDGE, Self::DEFAULT_EDGE)
    }
}

/// Edge direction of a grid button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    Press,
    Release,
}

/// Raw device event, already decoded from the wire.
///
/// The automaton acts only on `Grid` releases; arc and tilt events pass
/// through the bridge unconsumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Grid { action: GridAction, x: usize, y: usize },
    Arc { encoder: usize, delta: i32 },
    Tilt { sensor: usize, x: i32, y: i32, z: i32 },
}

/// Write side of the device: per-cell and whole-grid LED commands.
///
/// Contract: writes must not block. A transport that can stall belongs behind
/// its own queue, not under the automaton's lock.
pub trait DeviceSink: Send + 'static {
    fn set_cell(&mut self, coord: Coordinate, alive: bool) -> Result<(), DeviceError>;
    fn set_all(&mut self, alive: bool) -> Result<(), DeviceError>;
}

/// Read side of the device: non-blocking event poll.
pub trait DeviceSource: Send + 'static {
    /// Returns the next decoded event, or `None` when the queue is empty.
    fn poll_next_event(&mut self) -> Option<RawEvent>;
}

// ---------------------------------------------------------------------------
// Simulated device

#[derive(Debug, Default)]
struct SimulatedState {
    leds: Vec<bool>,
    events: VecDeque<RawEvent>,
    cell_writes: Vec<(Coordinate, bool)>,
    all_writes: Vec<bool>,
    fail_writes: bool,
}

/// In-memory stand-in for a physical grid controller.
///
/// Clones share one framebuffer and event queue, so a test (or the demo
/// binary) can hand one clone to the automaton as its sink, another to the
/// bridge as its source, and keep a third to inspect LEDs and inject button
/// events. Write failure is injectable for exercising the non-fatal error
/// path.
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    geometry: GridGeometry,
    state: Arc<Mutex<SimulatedState>>,
}

impl SimulatedDevice {
    pub fn new(geometry: GridGeometry) -> Self {
        let geometry = geometry.or_default();
        let state = SimulatedState {
            leds: vec![false; geometry.cell_count()],
            ..Default::default()
        };
        SimulatedDevice {
            geometry,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    fn state(&self) -> std::sync::MutexGuard<'_, SimulatedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a raw event for the next `poll_next_event` call.
    pub fn push_event(&self, event: RawEvent) {
        self.state().events.push_back(event);
    }

    /// Queues the press+release pair a physical button tap produces.
    pub fn tap(&self, x: usize, y: usize) {
        let mut state = self.state();
        state.events.push_back(RawEvent::Grid { action: GridAction::Press, x, y });
        state.events.push_back(RawEvent::Grid { action: GridAction::Release, x, y });
    }

    /// Current LED state at (x, y).
    pub fn led(&self, x: usize, y: usize) -> bool {
        assert!(self.geometry.contains(x, y));
        self.state().leds[y * self.geometry.columns + x]
    }

    pub fn lit_count(&self) -> usize {
        self.state().leds.iter().filter(|&&lit| lit).count()
    }

    /// Per-cell writes recorded since the last call, oldest first.
    pub fn take_cell_writes(&self) -> Vec<(Coordinate, bool)> {
        std::mem::take(&mut self.state().cell_writes)
    }

    /// Whole-grid writes recorded since the last call.
    pub fn take_all_writes(&self) -> Vec<bool> {
        std::mem::take(&mut self.state().all_writes)
    }

    /// When set, every subsequent write fails while still recording nothing.
    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }
}

impl DeviceSink for SimulatedDevice {
    fn set_cell(&mut self, coord: Coordinate, alive: bool) -> Result<(), DeviceError> {
        let mut state = self.state();
        if state.fail_writes {
            return Err(DeviceError::CellWrite { x: coord.x, y: coord.y });
        }
        let index = coord.y * self.geometry.columns + coord.x;
        state.leds[index] = alive;
        state.cell_writes.push((coord, alive));
        Ok(())
    }

    fn set_all(&mut self, alive: bool) -> Result<(), DeviceError> {
        let mut state = self.state();
        if state.fail_writes {
            return Err(DeviceError::GridWrite);
        }
        state.leds.fill(alive);
        state.all_writes.push(alive);
        Ok(())
    }
}

impl DeviceSource for SimulatedDevice {
    fn poll_next_event(&mut self) -> Option<RawEvent> {
        self.state().events.pop_front()
    }
}
