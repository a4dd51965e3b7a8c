//! Relief logistics engine: requirement estimation, stock allocation and
//! delivery route planning for reported disasters.
//!
//! Given a disaster (type, location, severity) and an inventory snapshot spread
//! over warehouses, the engine computes how much of each resource type is
//! needed, allocates stock greedily by priority, plans one delivery route per
//! source warehouse and summarizes coverage in a recommendation.
//!
//! # Quick Start
//!
//! ```no_run
//! use relief_core::{OptimizationOrchestrator, ScenarioFile};
//! use relief_core::model::DisasterId;
//!
//! let scenario = ScenarioFile::load("scenarios/demo.json")?;
//! let engine = scenario.build_engine()?;
//! let store = scenario.build_store();
//!
//! let result = OptimizationOrchestrator::new(&engine, &store, &store).optimize(DisasterId(1))?;
//! println!("{}% covered: {}", result.coverage_score, result.recommendation_text);
//! # Ok::<(), relief_core::ReliefError>(())
//! ```
//!
//! # Architecture
//!
//! - [`requirements`]: severity-scaled requirement vectors
//! - [`matching`]: greedy multi-source allocation ranked by affinity and proximity
//! - [`routing`]: distance models, obstruction models and the route planner
//! - [`recommendation`]: coverage scoring and recommendation text
//! - [`optimizer`]: the engine and the store-backed orchestrator
//! - [`store`]: store contracts and the in-memory record store
//!
//! Every simulated decision (requirement variance, road blockages) is derived
//! from the configured seed and the decision's inputs, so the same inputs always
//! produce the same plan.

pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod optimizer;
pub mod recommendation;
pub mod requirements;
pub mod routing;
pub mod scenario;
pub mod seed;
pub mod spatial;
pub mod speed;
pub mod store;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use config::{DistanceModelKind, EngineConfig, ObstructionKind};
pub use error::{ReliefError, Result};
pub use optimizer::{OptimizationOrchestrator, OptimizationResult, ReliefEngine};
pub use scenario::ScenarioFile;
pub use store::{DisasterStore, InMemoryStore, InventoryStore};
