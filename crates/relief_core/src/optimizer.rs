//! Planning pipeline: requirements, matching, routing and recommendation.
//!
//! [`ReliefEngine::plan`] is the pure entry point for callers that already hold
//! an inventory snapshot. [`OptimizationOrchestrator`] adds the store lookups
//! around it.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ReliefError, Result};
use crate::matching::{Allocations, ResourceMatcher};
use crate::model::{Disaster, DisasterId, ResourceUnit};
use crate::recommendation::{PriorityGap, RecommendationSynthesizer, TypeCoverage};
use crate::requirements::{RequirementCalculator, RequirementVector};
use crate::routing::planner::{Route, RoutePlanner};
use crate::routing::{build_distance_model, RoadSegment};
use crate::spatial::LocationTable;
use crate::store::{DisasterStore, InventoryStore};

/// Complete plan for one disaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub disaster: Disaster,
    pub requirements: RequirementVector,
    pub allocations: Allocations,
    pub routes: Vec<Route>,
    pub coverage: Vec<TypeCoverage>,
    pub recommendation_text: String,
    pub coverage_score: u8,
    pub blocked_routes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_gap: Option<PriorityGap>,
    #[serde(default)]
    pub recommended_equipment: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl OptimizationResult {
    pub fn total_required(&self) -> u64 {
        self.requirements.values().map(|&v| u64::from(v)).sum()
    }

    pub fn total_allocated(&self) -> u64 {
        self.allocations
            .values()
            .map(|allocation| u64::from(allocation.allocated))
            .sum()
    }

    /// Longest leg of the plan, i.e. the time until every source has arrived.
    pub fn max_transit_hours(&self) -> f64 {
        self.routes
            .iter()
            .map(|route| route.estimated_time_hours)
            .fold(0.0, f64::max)
    }
}

/// The four planning components wired to one shared distance model.
pub struct ReliefEngine {
    config: EngineConfig,
    requirements: RequirementCalculator,
    matcher: ResourceMatcher,
    planner: RoutePlanner,
    synthesizer: RecommendationSynthesizer,
}

impl ReliefEngine {
    /// Validate `config` and build the engine over the given places and roads.
    pub fn new(config: EngineConfig, table: LocationTable, roads: &[RoadSegment]) -> Result<Self> {
        config.validate()?;
        for road in roads {
            road.validate()?;
        }
        let distances = build_distance_model(&config, table, roads);
        Ok(Self {
            requirements: RequirementCalculator::new(config.seed, config.max_variance_pct),
            matcher: ResourceMatcher::new(distances.clone(), &config),
            planner: RoutePlanner::from_config(distances, &config),
            synthesizer: RecommendationSynthesizer,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plan relief for `disaster` against an inventory snapshot.
    ///
    /// Never fails: missing stock and unknown places degrade the result instead.
    pub fn plan(&self, disaster: &Disaster, inventory: &[ResourceUnit]) -> OptimizationResult {
        let requirements = self.requirements.compute(disaster);

        let allocations = self.matcher.allocate(disaster, &requirements, inventory);
        let routes = self.planner.plan(&disaster.location, &allocations);
        let recommendation =
            self.synthesizer
                .synthesize(disaster, &requirements, &allocations, &routes);

        info!(
            "planned disaster {} ({} at {}): coverage {}%, {} route(s), {} blocked",
            disaster.id,
            disaster.disaster_type,
            disaster.location,
            recommendation.coverage_score,
            routes.len(),
            recommendation.blocked_routes
        );

        OptimizationResult {
            disaster: disaster.clone(),
            requirements,
            allocations,
            routes,
            coverage: recommendation.coverage,
            recommendation_text: recommendation.text,
            coverage_score: recommendation.coverage_score,
            blocked_routes: recommendation.blocked_routes,
            priority_gap: recommendation.priority_gap,
            recommended_equipment: recommendation.recommended_equipment,
            generated_at: Utc::now(),
        }
    }
}

/// Looks up the disaster and inventory through injected stores, then plans.
pub struct OptimizationOrchestrator<'a> {
    engine: &'a ReliefEngine,
    disasters: &'a dyn DisasterStore,
    inventory: &'a dyn InventoryStore,
}

impl<'a> OptimizationOrchestrator<'a> {
    pub fn new(
        engine: &'a ReliefEngine,
        disasters: &'a dyn DisasterStore,
        inventory: &'a dyn InventoryStore,
    ) -> Self {
        Self {
            engine,
            disasters,
            inventory,
        }
    }

    /// Plan relief for the stored disaster `id`.
    ///
    /// Fails with [`ReliefError::DisasterNotFound`] before inventory is read
    /// when the disaster does not exist.
    pub fn optimize(&self, id: DisasterId) -> Result<OptimizationResult> {
        let disaster = self
            .disasters
            .get_disaster(id)?
            .ok_or(ReliefError::DisasterNotFound(id))?;
        let inventory = self.inventory.list_resources(1)?;
        Ok(self.engine.plan(&disaster, &inventory))
    }
}
