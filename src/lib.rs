// lib.rs - Concurrent Game of Life engine for grid-addressable LED button
// controllers (monome-style devices).
//
// Two independently clocked activities share one grid: a fixed-interval
// simulation tick and an event-driven toggle stream from the device's
// buttons. The automaton controller's lock binds them together so the
// device's LEDs always show a fully committed generation.

pub mod automaton;
pub mod bridge;
pub mod device;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rules;
pub mod scheduler;

pub use automaton::Automaton;
pub use bridge::EventBridge;
pub use device::{DeviceSink, DeviceSource, GridAction, GridGeometry, RawEvent, SimulatedDevice};
pub use error::DeviceError;
pub use grid::{Cell, Coordinate, Grid};
pub use scheduler::TickScheduler;

use std::time::Duration;

/// Reference period between simulation generations.
pub const TICK_PERIOD: Duration = Duration::from_millis(75);

/// Reference period for draining the device's event queue.
pub const DRAIN_PERIOD: Duration = Duration::from_millis(16);
