//! Composite priority used to rank inventory records for a disaster.

use serde::{Deserialize, Serialize};

/// Proximity score at zero distance.
pub const MAX_PROXIMITY: f64 = 0.9;
/// Proximity score at or beyond the reference distance.
pub const MIN_PROXIMITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityScore {
    pub affinity: f64,
    pub proximity: f64,
    pub total: f64,
}

impl PriorityScore {
    pub fn new(affinity: f64, proximity: f64, affinity_weight: f64, proximity_weight: f64) -> Self {
        Self {
            affinity,
            proximity,
            total: affinity_weight * affinity + proximity_weight * proximity,
        }
    }

    /// Total rounded to two decimals, as reported on allocation sources.
    pub fn rounded_total(&self) -> f64 {
        (self.total * 100.0).round() / 100.0
    }
}

/// Linear falloff from [`MAX_PROXIMITY`] at 0 km to [`MIN_PROXIMITY`] at
/// `reference_km` and beyond.
pub fn proximity_score(distance_km: f64, reference_km: f64) -> f64 {
    let ratio = if reference_km > 0.0 {
        (distance_km.max(0.0) / reference_km).min(1.0)
    } else {
        1.0
    };
    MAX_PROXIMITY - (MAX_PROXIMITY - MIN_PROXIMITY) * ratio
}
