// error.rs - Device boundary errors

use thiserror::Error;

/// Failures crossing the device boundary.
///
/// All of these are non-fatal to the automaton: logical state is never rolled
/// back on a failed write, the visual mirror just falls behind until the next
/// changed-cell write.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The transport rejected or dropped a single-cell LED write.
    #[error("device rejected LED write for cell ({x}, {y})")]
    CellWrite { x: usize, y: usize },

    /// The transport rejected a whole-grid LED write.
    #[error("device rejected whole-grid LED write")]
    GridWrite,

    /// The device connection is gone.
    #[error("device disconnected: {0}")]
    Disconnected(String),
}
