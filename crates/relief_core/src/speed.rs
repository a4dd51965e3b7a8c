//! Convoy transit-time estimates.

use crate::routing::obstruction::Obstruction;

#[derive(Debug, Clone, Copy)]
pub struct TransitTimeModel {
    convoy_speed_kmh: f64,
    min_hours: f64,
}

impl TransitTimeModel {
    pub fn new(convoy_speed_kmh: f64, min_hours: f64) -> Self {
        Self {
            convoy_speed_kmh: convoy_speed_kmh.max(1.0),
            min_hours: min_hours.max(0.0),
        }
    }

    /// Hours for an unobstructed trip, never below the dispatch floor.
    pub fn base_hours(&self, distance_km: f64) -> f64 {
        (distance_km.max(0.0) / self.convoy_speed_kmh).max(self.min_hours)
    }

    /// Hours including the detour penalty when the route is obstructed.
    /// Rounded to one decimal.
    pub fn estimate_hours(&self, distance_km: f64, obstruction: Option<&Obstruction>) -> f64 {
        let penalty = obstruction.map_or(0.0, |o| o.detour.time_penalty_hours());
        round1(self.base_hours(distance_km) + penalty)
    }
}

impl Default for TransitTimeModel {
    fn default() -> Self {
        Self::new(50.0, 1.0)
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
