//! Delivery route planning from source warehouses to the disaster location.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::matching::Allocations;
use crate::spatial::location_key;
use crate::speed::{round1, TransitTimeModel};

use super::obstruction::{build_obstruction_model, BlockageReason, DetourStrategy, ObstructionModel};
use super::{resolve_distance_km, DistanceModel};

/// One planned delivery leg.
///
/// `blockage_reason` and `alternate_route` are both present exactly when
/// `has_blockage` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub has_blockage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockage_reason: Option<BlockageReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_route: Option<DetourStrategy>,
    pub estimated_time_hours: f64,
}

pub struct RoutePlanner {
    distances: Arc<dyn DistanceModel>,
    obstructions: Box<dyn ObstructionModel>,
    transit: TransitTimeModel,
    default_distance_km: f64,
}

impl RoutePlanner {
    pub fn new(
        distances: Arc<dyn DistanceModel>,
        obstructions: Box<dyn ObstructionModel>,
        transit: TransitTimeModel,
        default_distance_km: f64,
    ) -> Self {
        Self {
            distances,
            obstructions,
            transit,
            default_distance_km,
        }
    }

    pub fn from_config(distances: Arc<dyn DistanceModel>, config: &EngineConfig) -> Self {
        Self::new(
            distances,
            build_obstruction_model(config),
            TransitTimeModel::new(config.convoy_speed_kmh, config.min_transit_hours),
            config.default_distance_km,
        )
    }

    /// One route per distinct source location, in first-seen order.
    pub fn plan(&self, disaster_location: &str, allocations: &Allocations) -> Vec<Route> {
        source_locations(allocations)
            .into_iter()
            .map(|from| self.plan_leg(from, disaster_location))
            .collect()
    }

    fn plan_leg(&self, from: &str, to: &str) -> Route {
        let distance_km = round1(resolve_distance_km(
            self.distances.as_ref(),
            from,
            to,
            self.default_distance_km,
        ));
        let obstruction = self.obstructions.assess(from, to);
        let estimated_time_hours = self.transit.estimate_hours(distance_km, obstruction.as_ref());

        if let Some(o) = &obstruction {
            debug!(
                "route {from} -> {to} blocked ({}), detour: {}",
                o.reason.description(),
                o.detour.description()
            );
        }

        Route {
            from: from.to_string(),
            to: to.to_string(),
            distance_km,
            has_blockage: obstruction.is_some(),
            blockage_reason: obstruction.map(|o| o.reason),
            alternate_route: obstruction.map(|o| o.detour),
            estimated_time_hours,
        }
    }
}

/// Distinct source locations across all allocations, first-seen order.
/// Names differing only by case or surrounding whitespace count as one.
pub fn source_locations(allocations: &Allocations) -> Vec<&str> {
    let mut seen = HashSet::new();
    allocations
        .values()
        .flat_map(|allocation| allocation.sources.iter())
        .map(|source| source.location.as_str())
        .filter(|location| seen.insert(location_key(location)))
        .collect()
}
