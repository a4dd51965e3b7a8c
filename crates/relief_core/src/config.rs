//! Engine configuration.
//!
//! Every field has a default, so a scenario file may supply a partial `config`
//! object (or none at all).

use serde::{Deserialize, Serialize};

use crate::error::{ReliefError, Result};
use crate::routing::obstruction::RoadClosure;

/// Default seed used when a scenario does not supply one.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Upper bound of the requirement variance: required quantities stay within
/// `[base * severity, base * severity * 1.2]`.
pub const MAX_VARIANCE_PCT: u32 = 20;

/// Distance used for any pair the distance model cannot resolve (km).
/// Midpoint of the 50-300 km range seen for regional warehouse routes.
pub const DEFAULT_DISTANCE_KM: f64 = 175.0;

/// Which distance backend the matcher and planner use.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DistanceModelKind {
    /// Haversine between table coordinates times a road circuity factor.
    #[default]
    Geodesic,
    /// Shortest path over declared road segments, geodesic when disconnected.
    RoadNetwork,
}

/// Which obstruction model the route planner uses.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstructionKind {
    /// Reproducible pseudo-random blockages per `(seed, from, to)`.
    Seeded { probability: f64 },
    /// Known closures only.
    Reported { closures: Vec<RoadClosure> },
    /// Every route is clear.
    Clear,
}

impl Default for ObstructionKind {
    fn default() -> Self {
        ObstructionKind::Seeded { probability: 0.25 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed mixed into every derived decision.
    pub seed: u64,
    /// Upper bound of the positive requirement variance, in whole percent.
    pub max_variance_pct: u32,
    /// Weight of disaster/resource type affinity in the composite priority.
    pub affinity_weight: f64,
    /// Weight of proximity in the composite priority.
    pub proximity_weight: f64,
    /// Distance at which the proximity score bottoms out (km).
    pub proximity_reference_km: f64,
    /// Distance for pairs the distance model cannot resolve (km).
    pub default_distance_km: f64,
    /// Road circuity applied to straight-line distances.
    pub circuity_factor: f64,
    /// Average convoy speed used for transit estimates (km/h).
    pub convoy_speed_kmh: f64,
    /// Floor for any transit estimate, covering loading and dispatch (hours).
    pub min_transit_hours: f64,
    pub distance_model: DistanceModelKind,
    pub obstruction: ObstructionKind,
    /// LRU capacity of the distance cache. 0 disables caching.
    pub distance_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_variance_pct: MAX_VARIANCE_PCT,
            affinity_weight: 0.5,
            proximity_weight: 0.5,
            proximity_reference_km: 300.0,
            default_distance_km: DEFAULT_DISTANCE_KM,
            circuity_factor: 1.3,
            convoy_speed_kmh: 50.0,
            min_transit_hours: 1.0,
            distance_model: DistanceModelKind::default(),
            obstruction: ObstructionKind::default(),
            distance_cache_capacity: 1_024,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_variance_pct(mut self, pct: u32) -> Self {
        self.max_variance_pct = pct;
        self
    }

    pub fn with_weights(mut self, affinity_weight: f64, proximity_weight: f64) -> Self {
        self.affinity_weight = affinity_weight;
        self.proximity_weight = proximity_weight;
        self
    }

    pub fn with_obstruction(mut self, obstruction: ObstructionKind) -> Self {
        self.obstruction = obstruction;
        self
    }

    pub fn with_distance_model(mut self, kind: DistanceModelKind) -> Self {
        self.distance_model = kind;
        self
    }

    pub fn with_convoy_speed_kmh(mut self, speed_kmh: f64) -> Self {
        self.convoy_speed_kmh = speed_kmh;
        self
    }

    /// Reject values that would break the engine's invariants.
    pub fn validate(&self) -> Result<()> {
        if self.max_variance_pct > MAX_VARIANCE_PCT {
            return Err(ReliefError::invalid_config(format!(
                "max_variance_pct must be at most {MAX_VARIANCE_PCT}, got {}",
                self.max_variance_pct
            )));
        }
        let weight_ok = |w: f64| w.is_finite() && w >= 0.0;
        if !weight_ok(self.affinity_weight) || !weight_ok(self.proximity_weight) {
            return Err(ReliefError::invalid_config(format!(
                "priority weights must be finite and non-negative, got {} / {}",
                self.affinity_weight, self.proximity_weight
            )));
        }
        if self.proximity_reference_km.is_nan() || self.proximity_reference_km <= 0.0 {
            return Err(ReliefError::invalid_config(
                "proximity_reference_km must be positive",
            ));
        }
        if !(0.0..).contains(&self.default_distance_km) {
            return Err(ReliefError::invalid_config(
                "default_distance_km must be non-negative",
            ));
        }
        if !(1.0..).contains(&self.circuity_factor) {
            return Err(ReliefError::invalid_config(
                "circuity_factor must be at least 1.0",
            ));
        }
        if self.convoy_speed_kmh.is_nan() || self.convoy_speed_kmh <= 0.0 {
            return Err(ReliefError::invalid_config(
                "convoy_speed_kmh must be positive",
            ));
        }
        if !(0.0..).contains(&self.min_transit_hours) {
            return Err(ReliefError::invalid_config(
                "min_transit_hours must be non-negative",
            ));
        }
        if let ObstructionKind::Seeded { probability } = self.obstruction {
            if !(0.0..=1.0).contains(&probability) {
                return Err(ReliefError::invalid_config(format!(
                    "blockage probability must be within [0, 1], got {probability}"
                )));
            }
        }
        Ok(())
    }
}
