// main.rs - Demo: run the automaton against the simulated device and render
// its LED framebuffer to the terminal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grid_life::{
    Automaton, EventBridge, GridGeometry, SimulatedDevice, TickScheduler, patterns,
};

#[derive(Parser)]
#[command(name = "grid-life", about = "Conway's Game of Life on a 16x16 grid controller")]
struct Args {
    /// Seed pattern: glider, blinker, toad, beacon, or r-pentomino
    #[arg(short, long, default_value = "glider")]
    pattern: String,

    /// Generations to run before stopping
    #[arg(short, long, default_value_t = 32)]
    generations: u32,

    /// Milliseconds between generations
    #[arg(short, long, default_value_t = 75)]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let pattern = patterns::find(&args.pattern)
        .ok_or_else(|| anyhow!("unknown pattern '{}'", args.pattern))?;

    // The simulated device plays both roles: LED sink for the automaton,
    // event source for the bridge.
    let device = SimulatedDevice::new(GridGeometry::new(16, 16));
    let automaton = Arc::new(Automaton::new(device.geometry(), device.clone()));

    patterns::apply(&automaton, pattern).context("seeding pattern")?;
    automaton.start();

    let mut bridge = EventBridge::new(Arc::clone(&automaton));
    bridge.start(device.clone()).await;

    let mut ticker = TickScheduler::new(Duration::from_millis(args.tick_ms));
    let tick_target = Arc::clone(&automaton);
    ticker
        .start(move || {
            if let Err(err) = tick_target.tick() {
                tracing::warn!(%err, "LED write failed during tick");
            }
        })
        .await;

    for generation in 0..args.generations {
        tokio::time::sleep(Duration::from_millis(args.tick_ms)).await;

        // Halfway through, poke a button so the live-edit path gets shown.
        if generation == args.generations / 2 {
            device.tap(3, 3);
        }

        println!("generation {generation}");
        println!("{}", render(&device));
    }

    ticker.stop().await;
    bridge.stop().await;
    automaton.stop();
    automaton.clear().context("clearing device")?;
    Ok(())
}

fn render(device: &SimulatedDevice) -> String {
    let geometry = device.geometry();
    let mut out = String::with_capacity((geometry.columns + 1) * geometry.rows);
    for y in 0..geometry.rows {
        for x in 0..geometry.columns {
            out.push(if device.led(x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
