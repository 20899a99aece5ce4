// rules.rs - The Game of Life birth/survival/death rule

/// Next state for one cell, given its current state and live-neighbor count.
///
/// Birth on exactly 3, survival on 2 or 3, death otherwise. The count == 2
/// arm preserves the current state for live *and* dead cells; the default arm
/// kills live cells and leaves dead cells dead.
pub fn next_alive(alive: bool, live_neighbors: u8) -> bool {
    match live_neighbors {
        3 => true,  // Birth, or survival
        2 => alive, // State unchanged
        _ => false, // Under- or overpopulation
    }
}
