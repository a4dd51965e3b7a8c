//! Batch planning for relief scenarios.
//!
//! Loads a scenario, plans every active disaster in parallel against one
//! inventory snapshot, optionally commits the plans in priority order, and
//! exports the results.
//!
//! # Quick Start
//!
//! ```no_run
//! use relief_batch::{run_batch, summarize, BatchOptions};
//! use relief_core::ScenarioFile;
//!
//! let scenario = ScenarioFile::load("scenarios/demo.json")?;
//! let engine = scenario.build_engine()?;
//! let store = scenario.build_store();
//!
//! let outcome = run_batch(&engine, &store, &BatchOptions { commit: true, ..Default::default() })?;
//! for plan in &outcome.plans {
//!     println!("{:?}", summarize(plan));
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Architecture
//!
//! - [`runner`]: parallel planning with rayon, sequential commits
//! - [`metrics`]: per-plan summaries and batch totals
//! - [`export`]: JSON/CSV export and urgency ranking

pub mod export;
pub mod metrics;
pub mod runner;

pub use export::{
    export_commitments_to_json, export_plans_to_json, export_summary_to_csv, most_urgent_index,
    rank_by_urgency,
};
pub use metrics::{summarize, totals, BatchTotals, PlanSummary};
pub use runner::{run_batch, BatchOptions, BatchOutcome, CommitRecord, CommitStatus};
