//! highway — yielding vs aggressive drivers on a 20×20 grid.
//!
//! Runs the default scenario (10 yielding, 100 aggressive, 100 ticks) or
//! the JSON config given as the first argument, writes CSV output to
//! `output/highway/`, and prints the population series and final counts.
//!
//! ```text
//! cargo run --release -p highway -- scenario.json
//! RUST_LOG=tf_sim=debug cargo run -p highway
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tf_agent::{Population, PopulationCounts};
use tf_core::{SimConfig, Tick};
use tf_grid::MultiGrid;
use tf_output::{CsvWriter, SimOutputObserver};
use tf_sim::{CollisionEvent, PopulationHistory, SimBuilder, SimObserver, SpawnEvent, TickSummary};

const OUTPUT_DIR: &str = "output/highway";
const CHART_WIDTH: usize = 50;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Forwards to the CSV observer while keeping the population series and
/// event totals for the console report.
struct ReportObserver<O: SimObserver> {
    inner:      O,
    history:    PopulationHistory,
    collisions: usize,
    spawns:     usize,
}

impl<O: SimObserver> ReportObserver<O> {
    fn new(inner: O) -> Self {
        Self { inner, history: PopulationHistory::default(), collisions: 0, spawns: 0 }
    }
}

impl<O: SimObserver> SimObserver for ReportObserver<O> {
    fn on_tick_start(&mut self, tick: Tick, counts: PopulationCounts) {
        self.history.on_tick_start(tick, counts);
        self.inner.on_tick_start(tick, counts);
    }

    fn on_collision(&mut self, event: &CollisionEvent) {
        self.collisions += 1;
        self.inner.on_collision(event);
    }

    fn on_spawn(&mut self, event: &SpawnEvent) {
        self.spawns += 1;
        self.inner.on_spawn(event);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, grid: &MultiGrid, population: &Population) {
        self.inner.on_snapshot(tick, grid, population);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: SimConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!(path = %path, "loaded config");
    Ok(config)
}

// ── Report ────────────────────────────────────────────────────────────────────

fn bar(n: usize, scale: usize) -> String {
    let len = if scale == 0 { 0 } else { (n * CHART_WIDTH).div_ceil(scale) };
    "#".repeat(len)
}

/// Text rendition of the population-over-time chart.
fn print_series(series: &[(Tick, PopulationCounts)]) {
    let peak = series.iter().map(|(_, c)| c.yielding.max(c.aggressive)).max().unwrap_or(0);
    let step = series.len().div_ceil(20).max(1);

    println!("{:<6} {:>9} {:>10}", "Tick", "Yielding", "Aggressive");
    println!("{}", "-".repeat(27 + CHART_WIDTH));
    for (tick, counts) in series.iter().step_by(step) {
        println!(
            "{:<6} {:>9} {:>10}  Y {}",
            tick.0,
            counts.yielding,
            counts.aggressive,
            bar(counts.yielding, peak),
        );
        println!("{:<28}A {}", "", bar(counts.aggressive, peak));
    }
    println!();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    println!("=== highway — yielding vs aggressive drivers ===");
    println!(
        "Grid: {}×{}  |  Yielding: {}  |  Aggressive: {}  |  Speed: {}  |  Ticks: {}  |  Seed: {}",
        config.width,
        config.height,
        config.initial_yielding,
        config.initial_aggressive,
        config.sub_steps_per_tick,
        config.total_ticks,
        config.seed,
    );
    println!();

    // 1. Build sim.
    let mut sim = SimBuilder::new(config).build()?;

    // 2. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = ReportObserver::new(SimOutputObserver::new(writer));

    // 3. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output incomplete");
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  collisions : {}", obs.collisions);
    println!("  spawns     : {}", obs.spawns);
    println!("  output     : {OUTPUT_DIR}/{{population,collisions,agent_snapshots}}.csv");
    println!();

    print_series(obs.history.series());

    // 5. Final population table.
    let counts = sim.counts();
    println!("{:<12} {:>6}", "Kind", "Count");
    println!("{}", "-".repeat(19));
    println!("{:<12} {:>6}", "yielding", counts.yielding);
    println!("{:<12} {:>6}", "aggressive", counts.aggressive);
    println!("{:<12} {:>6}", "total", counts.total());
    println!("Collision-free streak: {}", sim.streak());

    Ok(())
}
