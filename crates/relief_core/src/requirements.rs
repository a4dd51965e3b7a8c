//! Requirement derivation: how much of each resource type a disaster needs.
//!
//! Baselines are fixed per disaster type and scaled by severity. A bounded
//! positive variance keeps identical-severity disasters from producing
//! identical plans, while the seeded draw keeps each plan reproducible.

use std::collections::BTreeMap;

use log::debug;
use rand::Rng;

use crate::model::{Disaster, DisasterType, ResourceType};
use crate::seed::seeded_rng;

/// Required quantity per resource type, iterated in [`ResourceType`] order.
pub type RequirementVector = BTreeMap<ResourceType, u32>;

/// Baseline quantities for a disaster at severity 100, before variance.
pub fn base_requirements(disaster_type: DisasterType) -> [(ResourceType, u32); 5] {
    use ResourceType::*;
    match disaster_type {
        DisasterType::Earthquake => [
            (Medical, 60),
            (Water, 30),
            (Shelter, 50),
            (Food, 30),
            (Transport, 25),
        ],
        DisasterType::Cyclone => [
            (Medical, 40),
            (Water, 40),
            (Shelter, 40),
            (Food, 40),
            (Transport, 20),
        ],
        // Flood, and the fallback for every type without its own baseline.
        DisasterType::Flood | DisasterType::Fire | DisasterType::Landslide | DisasterType::Other => [
            (Medical, 30),
            (Water, 50),
            (Shelter, 20),
            (Food, 40),
            (Transport, 15),
        ],
    }
}

/// `ceil(base * severity/100 * (100 + pct)/100)` in exact integer arithmetic.
pub fn scaled_requirement(base: u32, severity: u8, variance_pct: u32) -> u32 {
    let numerator = u64::from(base) * u64::from(severity.min(100)) * (100 + u64::from(variance_pct));
    numerator.div_ceil(10_000) as u32
}

#[derive(Debug, Clone)]
pub struct RequirementCalculator {
    seed: u64,
    max_variance_pct: u32,
}

impl RequirementCalculator {
    pub fn new(seed: u64, max_variance_pct: u32) -> Self {
        Self {
            seed,
            max_variance_pct,
        }
    }

    /// Derive the requirement vector for `disaster`. Never fails.
    pub fn compute(&self, disaster: &Disaster) -> RequirementVector {
        let severity = disaster.clamped_severity();
        let id = disaster.id.to_string();
        let severity_key = severity.to_string();

        let required: RequirementVector = base_requirements(disaster.disaster_type)
            .into_iter()
            .map(|(resource_type, base)| {
                let pct = self.variance_pct(&id, disaster.disaster_type, &severity_key, resource_type);
                (resource_type, scaled_requirement(base, severity, pct))
            })
            .collect();

        debug!(
            "disaster {} ({} severity {}): requirements {:?}",
            disaster.id, disaster.disaster_type, severity, required
        );
        required
    }

    fn variance_pct(
        &self,
        disaster_id: &str,
        disaster_type: DisasterType,
        severity: &str,
        resource_type: ResourceType,
    ) -> u32 {
        if self.max_variance_pct == 0 {
            return 0;
        }
        let mut rng = seeded_rng(
            self.seed,
            &[
                "requirement",
                disaster_id,
                disaster_type.as_str(),
                severity,
                resource_type.as_str(),
            ],
        );
        rng.gen_range(0..=self.max_variance_pct)
    }
}

impl Default for RequirementCalculator {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SEED, crate::config::MAX_VARIANCE_PCT)
    }
}
