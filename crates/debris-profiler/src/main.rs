//! Debris Retrieval Profiler CLI
//!
//! Profiles tracked objects and ranks them as retrieval targets.
//!
//! Usage:
//!   profile-debris --input data/tracking_sample.json \
//!                  --distance-km 500 \
//!                  --output data/retrieval_report.json

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use debris_profiler::catalog::HIGH_RISK_LIMIT;
use debris_profiler::engine::DEFAULT_SEED;
use debris_profiler::{
    loader, CatalogSummary, EngineConfig, MissionReport, RetrievalEngine, RiskTier,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "profile-debris",
    about = "Profile tracked space objects and score them for retrieval"
)]
struct Args {
    /// Path to tracking records JSON file
    #[arg(short, long, default_value = "data/tracking_sample.json")]
    input: PathBuf,

    /// Engine configuration JSON; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for estimation fallbacks
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Distance from the reference station to each target in km
    #[arg(short, long, default_value_t = 500.0)]
    distance_km: f64,

    /// Output JSON file
    #[arg(short, long, default_value = "data/retrieval_report.json")]
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct RetrievalReport {
    generated_at: DateTime<Utc>,
    seed: u64,
    distance_km: f64,
    summary: CatalogSummary,
    viable_count: usize,
    reports: Vec<MissionReport>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", "=".repeat(60));
    info!("Debris Retrieval Profiler");
    info!("{}", "=".repeat(60));

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = RetrievalEngine::new(config)?.with_seed(args.seed);

    let records = loader::load_tracking_records(&args.input)?;
    let catalog = engine.build_catalog(&records);

    let distance_m = args.distance_km * 1000.0;
    let mut reports: Vec<MissionReport> = catalog
        .profiles()
        .iter()
        .map(|p| engine.report(p, catalog.summary(), distance_m))
        .collect();
    reports.sort_by(|a, b| {
        b.economics
            .profitability
            .partial_cmp(&a.economics.profitability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let viable_count = reports.iter().filter(|r| r.economics.viable).count();

    info!("\nTop 10 viable targets by profitability:");
    for r in reports.iter().filter(|r| r.economics.viable).take(10) {
        info!(
            "  {:>12.0} | {:32} | {:>7.1} km | {:>8} kg | {} | {}",
            r.economics.profitability,
            r.name.chars().take(32).collect::<String>(),
            r.altitude_km.value(),
            r.mass_kg.value(),
            r.material.value(),
            r.risk.tier
        );
    }

    info!("\nHighest reentry risk:");
    for p in catalog.high_risk(HIGH_RISK_LIMIT) {
        info!(
            "  {:32} | decay {:.1} years | {}",
            p.name,
            p.decay_time(),
            engine.collision_risk(p).recommendation
        );
    }

    let summary = *catalog.summary();
    let output = RetrievalReport {
        generated_at: Utc::now(),
        seed: args.seed,
        distance_km: args.distance_km,
        summary,
        viable_count,
        reports,
    };

    info!("\nWriting output to {:?}", args.output);
    let file = File::create(&args.output)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &output)?;

    info!("\n{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!("Objects profiled: {}", summary.object_count);
    info!("Average mass: {:.1} kg", summary.average_mass_kg);
    for tier in [RiskTier::High, RiskTier::Medium, RiskTier::Low] {
        info!("  {}: {} objects", tier, catalog.count_in_tier(tier));
    }
    info!("Viable retrievals: {}", viable_count);

    Ok(())
}
