//! Parallel planning over every active disaster using rayon.
//!
//! Plans are computed concurrently from one inventory snapshot. Committing is
//! sequential, most severe disaster first; a plan whose stock was taken by an
//! earlier commit is replanned against the remaining inventory before it is
//! committed.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use relief_core::model::{Disaster, DisasterStatus};
use relief_core::store::Commitment;
use relief_core::{InMemoryStore, OptimizationResult, ReliefEngine, ReliefError};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads; rayon's default when `None`.
    pub num_threads: Option<usize>,
    pub show_progress: bool,
    /// Reserve planned stock in the store after planning.
    pub commit: bool,
}

/// How a plan's commit went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitStatus {
    Committed,
    /// Stock moved under the original plan; the replanned result was committed.
    Replanned,
    /// Nothing left to allocate.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitRecord {
    pub disaster_id: u64,
    pub status: CommitStatus,
    pub commitments: Vec<Commitment>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Final plans, in commit priority order.
    pub plans: Vec<OptimizationResult>,
    pub commits: Vec<CommitRecord>,
}

/// Commit order: highest severity first, then lowest id.
pub fn priority_order(disasters: &mut [Disaster]) {
    disasters.sort_by(|a, b| {
        b.clamped_severity()
            .cmp(&a.clamped_severity())
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Plan every active disaster in `store` and optionally commit the plans.
pub fn run_batch(engine: &ReliefEngine, store: &InMemoryStore, options: &BatchOptions) -> Result<BatchOutcome> {
    let mut disasters = store
        .list_disasters(Some(DisasterStatus::Active))
        .context("listing active disasters")?;
    priority_order(&mut disasters);
    let inventory = store.list_resources(1).context("reading inventory snapshot")?;

    info!(
        "planning {} active disaster(s) against {} stock record(s)",
        disasters.len(),
        inventory.len()
    );
    let mut plans = plan_parallel(engine, &disasters, &inventory, options)?;

    let mut commits = Vec::new();
    if options.commit {
        for plan in plans.iter_mut() {
            commits.push(commit_plan(engine, store, plan)?);
        }
    }

    Ok(BatchOutcome { plans, commits })
}

/// Plan each disaster against the same inventory snapshot, in parallel.
///
/// Results keep the order of `disasters`.
pub fn plan_parallel(
    engine: &ReliefEngine,
    disasters: &[Disaster],
    inventory: &[relief_core::model::ResourceUnit],
    options: &BatchOptions,
) -> Result<Vec<OptimizationResult>> {
    let total = disasters.len();
    let pb = if options.show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .context("progress bar template")?
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = options.num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build().context("failed to create thread pool")?;

    let pb_clone = pb.clone();
    let plans = pool.install(|| {
        disasters
            .par_iter()
            .map(|disaster| {
                let plan = engine.plan(disaster, inventory);
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                plan
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    Ok(plans)
}

fn commit_plan(engine: &ReliefEngine, store: &InMemoryStore, plan: &mut OptimizationResult) -> Result<CommitRecord> {
    let disaster_id = plan.disaster.id;
    let mut status = CommitStatus::Committed;

    let commitments = match store.commit(plan) {
        Ok(commitments) => commitments,
        Err(ReliefError::InsufficientStock {
            resource_id,
            requested,
            available,
        }) => {
            warn!(
                "disaster {disaster_id}: resource {resource_id} has {available} of {requested} planned units left, replanning"
            );
            let inventory = store.list_resources(1).context("re-reading inventory")?;
            *plan = engine.plan(&plan.disaster, &inventory);
            status = CommitStatus::Replanned;
            store
                .commit(plan)
                .with_context(|| format!("committing replanned disaster {disaster_id}"))?
        }
        Err(err) => return Err(err).with_context(|| format!("committing disaster {disaster_id}")),
    };

    if commitments.is_empty() {
        status = CommitStatus::Skipped;
    }
    info!(
        "disaster {disaster_id}: {} commitment(s), {:?}",
        commitments.len(),
        status
    );
    Ok(CommitRecord {
        disaster_id: disaster_id.0,
        status,
        commitments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_core::model::{DisasterType, ResourceId, ResourceType, ResourceUnit};
    use relief_core::test_helpers::{demo_engine, demo_scenario};
    use relief_core::{EngineConfig, ObstructionKind};

    #[test]
    fn priority_order_is_severity_then_id() {
        let mut disasters = vec![
            Disaster::new(3, DisasterType::Cyclone, "Chennai", 60),
            Disaster::new(2, DisasterType::Earthquake, "Delhi", 90),
            Disaster::new(1, DisasterType::Flood, "Mumbai", 60),
        ];
        priority_order(&mut disasters);
        let ids: Vec<u64> = disasters.iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn parallel_plans_match_sequential_plans() {
        let scenario = demo_scenario();
        let engine = scenario.build_engine().expect("engine");
        let options = BatchOptions {
            num_threads: Some(2),
            ..Default::default()
        };
        let parallel =
            plan_parallel(&engine, &scenario.disasters, &scenario.resources, &options).expect("plans");
        assert_eq!(parallel.len(), scenario.disasters.len());
        for (plan, disaster) in parallel.iter().zip(&scenario.disasters) {
            let sequential = engine.plan(disaster, &scenario.resources);
            assert_eq!(plan.disaster.id, disaster.id);
            assert_eq!(plan.allocations, sequential.allocations);
            assert_eq!(plan.routes, sequential.routes);
        }
    }

    #[test]
    fn conflicting_plan_is_replanned_on_commit() {
        let engine = demo_engine(EngineConfig::default().with_obstruction(ObstructionKind::Clear));
        let store = InMemoryStore::with_records(
            vec![
                Disaster::new(1, DisasterType::Flood, "Mumbai", 75),
                Disaster::new(2, DisasterType::Flood, "Mumbai", 80),
            ],
            vec![
                ResourceUnit::new(1, "Medical Kit A", ResourceType::Medical, 30, "Warehouse A"),
                ResourceUnit::new(5, "First Aid Supplies", ResourceType::Medical, 75, "Warehouse C"),
            ],
        );
        let options = BatchOptions {
            num_threads: Some(1),
            show_progress: false,
            commit: true,
        };
        let outcome = run_batch(&engine, &store, &options).expect("batch");

        assert_eq!(outcome.plans[0].disaster.id.0, 2);
        assert_eq!(outcome.commits[0].status, CommitStatus::Committed);
        assert_eq!(outcome.commits[1].status, CommitStatus::Replanned);

        let kit = store.resource(ResourceId(1)).expect("read").expect("kit");
        let first_aid = store.resource(ResourceId(5)).expect("read").expect("first aid");
        let committed: u32 = outcome
            .commits
            .iter()
            .flat_map(|c| c.commitments.iter())
            .map(|c| c.quantity)
            .sum();
        assert_eq!(30 - kit.quantity + 75 - first_aid.quantity, committed);
    }
}
