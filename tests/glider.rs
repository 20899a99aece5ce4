// glider.rs - Multi-generation end-to-end checks on the default 16x16 grid

use std::sync::Arc;
use std::time::Duration;

use grid_life::{Automaton, GridGeometry, SimulatedDevice, TickScheduler, patterns};

fn seeded_glider() -> (Automaton<SimulatedDevice>, SimulatedDevice) {
    let device = SimulatedDevice::new(GridGeometry::new(16, 16));
    let automaton = Automaton::new(device.geometry(), device.clone());
    patterns::apply(&automaton, patterns::find("glider").unwrap()).unwrap();
    automaton.start();
    (automaton, device)
}

fn live_set(automaton: &Automaton<SimulatedDevice>) -> Vec<(usize, usize)> {
    let mut cells: Vec<_> = automaton.live_cells().iter().map(|c| (c.x, c.y)).collect();
    cells.sort();
    cells
}

fn sorted(mut cells: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    cells.sort();
    cells
}

// Seeding happens through idle-mode edits, which commit immediately; the
// first running tick therefore has an empty mutation pass and only marks
// generation 1. Generation N is visible after N + 1 ticks.
fn advance_generations(automaton: &Automaton<SimulatedDevice>, generations: usize) {
    for _ in 0..generations + 1 {
        automaton.tick().unwrap();
    }
}

#[test]
fn glider_translates_one_down_right_every_four_generations() {
    let (automaton, _device) = seeded_glider();
    let seed = live_set(&automaton);

    advance_generations(&automaton, 4);

    let expected = sorted(seed.iter().map(|&(x, y)| (x + 1, y + 1)).collect());
    assert_eq!(live_set(&automaton), expected);
}

#[test]
fn glider_leds_mirror_logical_state_every_generation() {
    let (automaton, device) = seeded_glider();

    for _ in 0..12 {
        automaton.tick().unwrap();
        for (index, alive) in automaton.snapshot().into_iter().enumerate() {
            let (x, y) = (index % 16, index / 16);
            assert_eq!(device.led(x, y), alive, "LED ({x}, {y}) out of sync");
        }
    }
}

#[test]
fn glider_wraps_around_the_torus_and_returns_home() {
    let (automaton, _device) = seeded_glider();
    let seed = live_set(&automaton);

    // One cell down-right per four generations: 16 * 4 generations brings it
    // across the full torus and back to the seed position.
    advance_generations(&automaton, 16 * 4);

    assert_eq!(live_set(&automaton), seed);
}

#[tokio::test(start_paused = true)]
async fn scheduled_ticks_advance_the_glider() {
    let device = SimulatedDevice::new(GridGeometry::new(16, 16));
    let automaton = Arc::new(Automaton::new(device.geometry(), device.clone()));
    patterns::apply(&automaton, patterns::find("glider").unwrap()).unwrap();
    let seed = live_set(&automaton);
    automaton.start();

    let mut ticker = TickScheduler::new(Duration::from_millis(75));
    let tick_target = Arc::clone(&automaton);
    ticker.start(move || drop(tick_target.tick())).await;

    // Five ticks: one at t=0, then at 75, 150, 225, 300.
    tokio::time::sleep(Duration::from_millis(310)).await;
    ticker.stop().await;

    let expected = sorted(seed.iter().map(|&(x, y)| (x + 1, y + 1)).collect());
    assert_eq!(live_set(&automaton), expected);
}
