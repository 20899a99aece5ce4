// patterns.rs - Seed patterns for the demo and multi-generation tests

use crate::automaton::Automaton;
use crate::device::DeviceSink;
use crate::error::DeviceError;
use crate::grid::Coordinate;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)], // (x, y), sized for a 16x16 grid
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        // Travels one cell down-right every four generations.
        cells: &[(7, 6), (8, 7), (6, 8), (7, 8), (8, 8)],
    },
    Pattern {
        name: "blinker",
        cells: &[(6, 7), (7, 7), (8, 7)],
    },
    Pattern {
        name: "toad",
        cells: &[(7, 7), (8, 7), (9, 7), (6, 8), (7, 8), (8, 8)],
    },
    Pattern {
        name: "beacon",
        cells: &[(5, 5), (6, 5), (5, 6), (6, 6), (7, 7), (8, 7), (7, 8), (8, 8)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(7, 6), (8, 6), (6, 7), (7, 7), (7, 8)],
    },
];

/// Looks a pattern up by name, case-insensitively.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Clears the automaton and toggles in the pattern's cells. Meant for idle
/// mode, where each toggle commits (and lights up) immediately.
pub fn apply<S: DeviceSink>(
    automaton: &Automaton<S>,
    pattern: &Pattern,
) -> Result<(), DeviceError> {
    let mut first_failure = None;
    if let Err(err) = automaton.clear() {
        first_failure.get_or_insert(err);
    }
    for &(x, y) in pattern.cells {
        if let Err(err) = automaton.request_toggle(Coordinate::new(x, y)) {
            first_failure.get_or_insert(err);
        }
    }
    match first_failure {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{GridGeometry, SimulatedDevice};

    #[test]
    fn find_is_case_insensitive() {
        assert!(find("Glider").is_some());
        assert!(find("R-PENTOMINO").is_some());
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn all_patterns_fit_the_default_grid() {
        for pattern in PATTERNS {
            for &(x, y) in pattern.cells {
                assert!(x < 16 && y < 16, "{} cell ({x}, {y}) off-grid", pattern.name);
            }
        }
    }

    #[test]
    fn apply_seeds_and_lights_the_pattern() {
        let device = SimulatedDevice::new(GridGeometry::new(16, 16));
        let automaton = Automaton::new(device.geometry(), device.clone());
        let pattern = find("glider").unwrap();

        apply(&automaton, pattern).unwrap();

        assert_eq!(automaton.live_cells().len(), pattern.cells.len());
        for &(x, y) in pattern.cells {
            assert!(device.led(x, y), "LED ({x}, {y}) should be lit");
        }
    }
}
