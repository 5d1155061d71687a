//! xsmall — smallest example for the rust_tp theme-park simulator.
//!
//! Builds the five-ride starter park, round-trips its layout through JSON,
//! lets a few dozen visitors loose for ten simulated minutes, and then shows
//! an undoable edit being made and taken back.
//!
//! Usage: `xsmall [config.json]`.  Any `SimConfig` field missing from the
//! file keeps its default.  Set `RUST_LOG=debug` to watch cycles start and
//! finish.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tp_core::{GridPos, SimConfig, Tick, format_hms};
use tp_facility::default_facilities;
use tp_output::{CsvWriter, OutputWriter, SimOutputObserver, load_layout, save_layout};
use tp_sim::{Park, SimBuilder, SimObserver, TickSummary};
use tp_visitor::VisitorStatus;

// ── Constants ─────────────────────────────────────────────────────────────────

const VISITOR_COUNT: usize = 40;
const OUTPUT_DIR:    &str  = "output/xsmall";
const LAYOUT_FILE:   &str  = "park.json";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    peak_queued:   usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, peak_queued: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summary_rows += 1;
        self.peak_queued = self.peak_queued.max(summary.queued);
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, park: &Park) {
        self.snapshot_rows += park.facility_count();
        self.inner.on_snapshot(tick, park);
    }

    fn on_sim_end(&mut self, final_tick: Tick, park: &Park) {
        self.snapshot_rows += park.facility_count();
        self.inner.on_sim_end(final_tick, park);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig { output_interval_ticks: 60, ..SimConfig::default() });
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(std::env::args().nth(1).as_deref())?;
    let (h, m, s) = format_hms(config.end_tick().0);

    println!("=== xsmall — rust_tp theme park ===");
    println!(
        "Visitors: {VISITOR_COUNT}  |  Duration: {h:02}:{m:02}:{s:02}  |  Seed: {}",
        config.seed
    );
    println!();

    // 1. Starter layout, persisted and read back.
    let out_dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(out_dir)?;
    let layout_path = out_dir.join(LAYOUT_FILE);
    let records: Vec<_> = default_facilities()?.iter().map(|f| f.to_record()).collect();
    save_layout(&layout_path, &records)?;
    let records = load_layout(&layout_path)?;
    println!("Layout: {} facilities ({})", records.len(), layout_path.display());

    // 2. Build sim.
    let mut sim = SimBuilder::new(config)
        .layout(&records)
        .visitors(VISITOR_COUNT)
        .build()?;

    // 3. Set up output.
    let writer = CsvWriter::new(out_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  facility_stats.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!("  peak queued        : {}", obs.peak_queued);
    println!();

    // 5. Facility report.
    println!(
        "{:<3} {:<16} {:<15} {:>6} {:>7} {:>6} {:>9}",
        "", "Facility", "Type", "Served", "Util%", "Queue", "Est.wait"
    );
    println!("{}", "-".repeat(68));
    for (_, f) in sim.park().facilities() {
        println!(
            "{:<3} {:<16} {:<15} {:>6} {:>7.1} {:>6} {:>9}",
            f.emoji(),
            f.name(),
            f.type_tag(),
            f.total_visitors_served(),
            f.utilization(),
            f.queue_len(),
            f.avg_waiting_time(),
        );
    }
    println!();

    // 6. Visitor report.
    let visitors = sim.park().visitors();
    let [free, waiting, riding, done] = sim.park().status_counts();
    let total_wait: u64 = visitors.iter().map(|v| v.total_waiting_time()).sum();
    let total_ride: u64 = visitors.iter().map(|v| v.total_ride_time()).sum();
    let n = visitors.len().max(1) as u64;
    println!("Visitors: {free} free, {waiting} waiting, {riding} riding, {done} done");
    println!("  mean time queuing : {} s", total_wait / n);
    println!("  mean time riding  : {} s", total_ride / n);
    if let Some(v) = visitors.iter().find(|v| v.status() != VisitorStatus::Done) {
        let (status, target) = v.status_line();
        let target = target
            .and_then(|id| sim.facility(id))
            .map_or("-", |f| f.name());
        println!("  e.g. {}: {status} @ {target}", v.id());
    }
    println!();

    // 7. An undoable edit.
    let id = sim.create_facility("Splash Galleon", "pirate_ship", None)?;
    sim.move_facility(id, GridPos::new(12, 12))?;
    println!("Added + moved: {:?}", sim.facility_names());
    sim.undo();
    sim.undo();
    println!("After 2× undo: {:?}  (redo available: {})", sim.facility_names(), sim.can_redo());

    info!(ticks = sim.clock.ticks_elapsed, "done");
    Ok(())
}
