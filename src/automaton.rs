// automaton.rs - The controller that owns the grid, its lock, and the
// two-pass tick.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::device::{DeviceSink, GridGeometry};
use crate::error::DeviceError;
use crate::grid::{Coordinate, Grid};
use crate::rules;

struct Inner<S> {
    grid: Grid,
    running: bool,
    sink: S,
}

/// The only component permitted to mutate the grid.
///
/// One mutex guards the grid, the running flag, and the device sink together,
/// so every LED write happens inside the same critical section as the state
/// change it mirrors: observers of the device always see a fully committed
/// generation, never a torn one.
///
/// `tick()` comes from the tick scheduler, `request_toggle()` from the event
/// bridge; the mutex strictly serializes them. A toggle racing a tick lands
/// in the current or the next generation, and either is fine.
pub struct Automaton<S: DeviceSink> {
    inner: Mutex<Inner<S>>,
}

impl<S: DeviceSink> Automaton<S> {
    /// Creates an idle automaton with an all-dead grid sized to `geometry`
    /// (zero dimensions fall back to 16).
    pub fn new(geometry: GridGeometry, sink: S) -> Self {
        let geometry = geometry.or_default();
        Automaton {
            inner: Mutex::new(Inner {
                grid: Grid::new(geometry.columns, geometry.rows),
                running: false,
                sink,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn geometry(&self) -> GridGeometry {
        let inner = self.lock();
        GridGeometry::new(inner.grid.width(), inner.grid.height())
    }

    /// Idle → Running. Idempotent.
    pub fn start(&self) {
        let mut inner = self.lock();
        if !inner.running {
            inner.running = true;
            debug!("automaton running");
        }
    }

    /// Running → Idle. Idempotent. Pending toggles stay queued for the next
    /// run.
    pub fn stop(&self) {
        let mut inner = self.lock();
        if inner.running {
            inner.running = false;
            debug!("automaton idle");
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Resets every cell to dead and darkens the whole device.
    pub fn clear(&self) -> Result<(), DeviceError> {
        let mut inner = self.lock();
        let inner = &mut *inner;
        inner.grid.clear();
        inner.sink.set_all(false)
    }

    /// Asks for the cell at `coord` to flip.
    ///
    /// While running, the flip is queued for the next tick's mutation pass —
    /// it never lands mid-generation. While idle, the cell flips right here
    /// and one LED write goes out (manual edit mode, for sketching a seed
    /// before starting the simulation).
    ///
    /// Out-of-bounds coordinates are dropped: the device source is trusted
    /// but may emit stray data around connect/disconnect.
    pub fn request_toggle(&self, coord: Coordinate) -> Result<(), DeviceError> {
        let mut inner = self.lock();
        let inner = &mut *inner;
        if !inner.grid.contains(coord) {
            return Ok(());
        }

        if inner.running {
            inner.grid.cell_mut(coord).pending_toggle = true;
            Ok(())
        } else {
            inner.grid.flip(coord);
            let alive = inner.grid.cell(coord).alive;
            inner.sink.set_cell(coord, alive)
        }
    }

    /// Advances the simulation by one step. No-op while idle.
    ///
    /// Two strictly ordered passes under one lock acquisition:
    ///
    /// 1. Mutation: every cell with `pending_toggle` is flipped (which
    ///    adjusts its neighbors' counts), its LED write goes out, and the
    ///    flag clears.
    /// 2. Evaluation: every cell's next state is computed from the now
    ///    settled neighbor counts; cells that will change are marked
    ///    `pending_toggle` for the *next* tick, never applied in this one.
    ///
    /// A failed LED write is not rolled back; the first failure is returned
    /// after both passes complete so the caller can log it.
    pub fn tick(&self) -> Result<(), DeviceError> {
        let mut inner = self.lock();
        if !inner.running {
            return Ok(());
        }
        let inner = &mut *inner;
        let (width, height) = (inner.grid.width(), inner.grid.height());
        let mut first_failure: Option<DeviceError> = None;

        // Mutation pass: commit queued toggles and mirror them to the LEDs.
        for y in 0..height {
            for x in 0..width {
                let coord = Coordinate::new(x, y);
                if inner.grid.cell(coord).pending_toggle {
                    inner.grid.flip(coord);
                    let cell = inner.grid.cell_mut(coord);
                    cell.pending_toggle = false;
                    let alive = cell.alive;
                    if let Err(err) = inner.sink.set_cell(coord, alive) {
                        first_failure.get_or_insert(err);
                    }
                }
            }
        }

        // Evaluation pass: mark the next generation's changes.
        for y in 0..height {
            for x in 0..width {
                let coord = Coordinate::new(x, y);
                let cell = inner.grid.cell(coord);
                if rules::next_alive(cell.alive, cell.live_neighbors) != cell.alive {
                    inner.grid.cell_mut(coord).pending_toggle = true;
                }
            }
        }

        match first_failure {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Row-major alive flags of the current committed state.
    pub fn snapshot(&self) -> Vec<bool> {
        self.lock().grid.alive_cells()
    }

    /// Coordinates of all live cells, for assertions and rendering.
    pub fn live_cells(&self) -> Vec<Coordinate> {
        let inner = self.lock();
        inner
            .grid
            .coordinates()
            .filter(|&coord| inner.grid.cell(coord).alive)
            .collect()
    }
}
