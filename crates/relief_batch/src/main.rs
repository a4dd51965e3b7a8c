use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use relief_batch::{
    export_commitments_to_json, export_plans_to_json, export_summary_to_csv, rank_by_urgency,
    run_batch, summarize, totals, BatchOptions, PlanSummary,
};
use relief_core::ScenarioFile;

#[derive(Parser)]
#[command(
    name = "relief_batch",
    about = "Plan relief for every active disaster in a scenario file"
)]
struct Args {
    /// Scenario JSON file
    #[arg(long, env = "RELIEF_SCENARIO", default_value = "scenarios/demo.json")]
    scenario: PathBuf,
    /// Override the scenario's engine seed
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads (rayon default when omitted)
    #[arg(long)]
    threads: Option<usize>,
    /// Reserve planned stock in priority order after planning
    #[arg(long)]
    commit: bool,
    /// Write full plans to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,
    /// Write one summary row per disaster to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write commitments to this JSON file (requires --commit)
    #[arg(long, requires = "commit")]
    commitments: Option<PathBuf>,
    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut scenario = ScenarioFile::load(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;
    if let Some(seed) = args.seed {
        let config = scenario.config.clone().with_seed(seed);
        scenario = scenario.with_config(config);
    }

    let engine = scenario.build_engine().context("building engine")?;
    let store = scenario.build_store();
    info!("engine seed {}", engine.config().seed);

    let options = BatchOptions {
        num_threads: args.threads,
        show_progress: !args.no_progress,
        commit: args.commit,
    };
    let outcome = run_batch(&engine, &store, &options)?;

    let summaries: Vec<PlanSummary> = outcome.plans.iter().map(summarize).collect();
    print_ranking(&summaries);

    if let Some(path) = &args.json {
        export_plans_to_json(&outcome.plans, path)
            .map_err(|e| anyhow!("writing {}: {e}", path.display()))?;
        info!("wrote plans to {}", path.display());
    }
    if let Some(path) = &args.csv {
        export_summary_to_csv(&summaries, path)
            .map_err(|e| anyhow!("writing {}: {e}", path.display()))?;
        info!("wrote summary to {}", path.display());
    }
    if let Some(path) = &args.commitments {
        let commitments: Vec<_> = outcome
            .commits
            .iter()
            .flat_map(|record| record.commitments.iter().cloned())
            .collect();
        export_commitments_to_json(&commitments, path)
            .map_err(|e| anyhow!("writing {}: {e}", path.display()))?;
        info!("wrote {} commitment(s) to {}", commitments.len(), path.display());
    }

    for record in &outcome.commits {
        println!(
            "commit disaster {}: {:?}, {} source(s)",
            record.disaster_id,
            record.status,
            record.commitments.len()
        );
    }

    Ok(())
}

fn print_ranking(summaries: &[PlanSummary]) {
    println!(
        "{:<4} {:<11} {:<12} {:>8} {:>8} {:>8} {:>7} {:>9}  gap",
        "id", "type", "location", "severity", "urgency", "coverage", "blocked", "max_hours"
    );
    for s in rank_by_urgency(summaries) {
        println!(
            "{:<4} {:<11} {:<12} {:>8} {:>8.2} {:>7}% {:>7} {:>9.1}  {}",
            s.disaster_id,
            s.disaster_type,
            s.location,
            s.severity,
            s.urgency,
            s.coverage_score,
            s.blocked_routes,
            s.max_transit_hours,
            s.priority_gap
                .as_ref()
                .map(|gap| format!("{gap} ({} short)", s.shortfall))
                .unwrap_or_else(|| "-".to_string())
        );
    }

    let totals = totals(summaries);
    println!(
        "\n{} disaster(s), {} fully covered, mean coverage {:.1}%, {}/{} units allocated, {} blocked route(s)",
        totals.disasters,
        totals.fully_covered,
        totals.mean_coverage,
        totals.total_allocated,
        totals.total_required,
        totals.blocked_routes
    );
}
