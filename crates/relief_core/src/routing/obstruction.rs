//! Obstruction models: decide whether a planned route is blocked and how to
//! get around it.
//!
//! Blockages are simulated. The seeded model is a pure function of
//! `(seed, from, to)` so replanning the same disaster yields the same detours.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, ObstructionKind};
use crate::seed::seeded_rng;
use crate::spatial::location_key;

/// Why a route is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockageReason {
    #[serde(rename = "Bridge collapse", alias = "bridge_collapse")]
    BridgeCollapse,
    #[serde(rename = "Flooded road", alias = "flooded_road")]
    FloodedRoad,
    #[serde(rename = "Landslide", alias = "landslide")]
    Landslide,
    #[serde(rename = "Civil unrest", alias = "civil_unrest")]
    CivilUnrest,
    #[serde(rename = "Road construction", alias = "road_construction")]
    RoadConstruction,
    #[serde(rename = "Accident blockage", alias = "accident")]
    Accident,
}

impl BlockageReason {
    pub const CATALOG: [BlockageReason; 6] = [
        BlockageReason::BridgeCollapse,
        BlockageReason::FloodedRoad,
        BlockageReason::Landslide,
        BlockageReason::CivilUnrest,
        BlockageReason::RoadConstruction,
        BlockageReason::Accident,
    ];

    pub fn description(self) -> &'static str {
        match self {
            BlockageReason::BridgeCollapse => "Bridge collapse",
            BlockageReason::FloodedRoad => "Flooded road",
            BlockageReason::Landslide => "Landslide",
            BlockageReason::CivilUnrest => "Civil unrest",
            BlockageReason::RoadConstruction => "Road construction",
            BlockageReason::Accident => "Accident blockage",
        }
    }
}

/// How to get supplies through when the direct route is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetourStrategy {
    #[serde(rename = "Use service road via nearby village", alias = "service_road")]
    ServiceRoad,
    #[serde(rename = "Take the national highway with 15km detour", alias = "highway_detour")]
    HighwayDetour,
    #[serde(rename = "Air lift available for critical supplies", alias = "air_lift")]
    AirLift,
    #[serde(rename = "Rail transport possible from nearest station", alias = "rail")]
    Rail,
    #[serde(rename = "Combination of river and road transport", alias = "combined")]
    Combined,
}

impl DetourStrategy {
    pub const CATALOG: [DetourStrategy; 5] = [
        DetourStrategy::ServiceRoad,
        DetourStrategy::HighwayDetour,
        DetourStrategy::AirLift,
        DetourStrategy::Rail,
        DetourStrategy::Combined,
    ];

    pub fn description(self) -> &'static str {
        match self {
            DetourStrategy::ServiceRoad => "Use service road via nearby village",
            DetourStrategy::HighwayDetour => "Take the national highway with 15km detour",
            DetourStrategy::AirLift => "Air lift available for critical supplies",
            DetourStrategy::Rail => "Rail transport possible from nearest station",
            DetourStrategy::Combined => "Combination of river and road transport",
        }
    }

    /// Hours added to the transit estimate when this detour is taken.
    pub fn time_penalty_hours(self) -> f64 {
        match self {
            DetourStrategy::HighwayDetour | DetourStrategy::AirLift => 1.0,
            DetourStrategy::ServiceRoad => 2.0,
            DetourStrategy::Rail | DetourStrategy::Combined => 3.0,
        }
    }
}

/// A blocked route and the detour assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstruction {
    pub reason: BlockageReason,
    pub detour: DetourStrategy,
}

/// A known closure between two places, in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadClosure {
    pub from: String,
    pub to: String,
    pub reason: BlockageReason,
    pub detour: DetourStrategy,
}

/// Trait for obstruction backends.
pub trait ObstructionModel: Send + Sync {
    /// `Some` when the route `from -> to` is blocked.
    fn assess(&self, from: &str, to: &str) -> Option<Obstruction>;
}

/// Pseudo-random blockages, reproducible per `(seed, from, to)`.
#[derive(Debug, Clone)]
pub struct SeededObstructionModel {
    seed: u64,
    probability: f64,
}

impl SeededObstructionModel {
    pub fn new(seed: u64, probability: f64) -> Self {
        Self {
            seed,
            probability: if probability.is_nan() {
                0.0
            } else {
                probability.clamp(0.0, 1.0)
            },
        }
    }
}

impl ObstructionModel for SeededObstructionModel {
    fn assess(&self, from: &str, to: &str) -> Option<Obstruction> {
        let from_key = location_key(from);
        let to_key = location_key(to);
        let mut rng = seeded_rng(self.seed, &["route", &from_key, &to_key]);
        if !rng.gen_bool(self.probability) {
            return None;
        }
        let reason = *BlockageReason::CATALOG.choose(&mut rng)?;
        let detour = *DetourStrategy::CATALOG.choose(&mut rng)?;
        Some(Obstruction { reason, detour })
    }
}

/// Blockages from a fixed list of reported closures.
#[derive(Debug, Clone, Default)]
pub struct ReportedObstructionModel {
    closures: Vec<RoadClosure>,
}

impl ReportedObstructionModel {
    pub fn new(closures: Vec<RoadClosure>) -> Self {
        Self { closures }
    }
}

impl ObstructionModel for ReportedObstructionModel {
    fn assess(&self, from: &str, to: &str) -> Option<Obstruction> {
        let (from, to) = (location_key(from), location_key(to));
        self.closures
            .iter()
            .find(|closure| {
                let (a, b) = (location_key(&closure.from), location_key(&closure.to));
                (a == from && b == to) || (a == to && b == from)
            })
            .map(|closure| Obstruction {
                reason: closure.reason,
                detour: closure.detour,
            })
    }
}

/// Every route is clear.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearRoads;

impl ObstructionModel for ClearRoads {
    fn assess(&self, _from: &str, _to: &str) -> Option<Obstruction> {
        None
    }
}

pub fn build_obstruction_model(config: &EngineConfig) -> Box<dyn ObstructionModel> {
    match &config.obstruction {
        ObstructionKind::Seeded { probability } => {
            Box::new(SeededObstructionModel::new(config.seed, *probability))
        }
        ObstructionKind::Reported { closures } => {
            Box::new(ReportedObstructionModel::new(closures.clone()))
        }
        ObstructionKind::Clear => Box::new(ClearRoads),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_model_is_reproducible() {
        let model = SeededObstructionModel::new(11, 0.5);
        for from in ["Warehouse A", "Warehouse B", "Warehouse C", "Pune"] {
            assert_eq!(model.assess(from, "Mumbai"), model.assess(from, "Mumbai"));
        }
    }

    #[test]
    fn probability_bounds_are_respected() {
        let always = SeededObstructionModel::new(3, 1.0);
        let never = SeededObstructionModel::new(3, 0.0);
        assert!(always.assess("Warehouse A", "Mumbai").is_some());
        assert!(never.assess("Warehouse A", "Mumbai").is_none());
    }

    #[test]
    fn seeded_rate_is_near_probability() {
        let model = SeededObstructionModel::new(99, 0.25);
        let blocked = (0..2_000)
            .filter(|i| model.assess(&format!("Depot {i}"), "Chennai").is_some())
            .count();
        assert!((350..650).contains(&blocked), "blocked {blocked} of 2000");
    }

    #[test]
    fn reported_closures_match_either_direction() {
        let model = ReportedObstructionModel::new(vec![RoadClosure {
            from: "Warehouse A".into(),
            to: "Mumbai".into(),
            reason: BlockageReason::BridgeCollapse,
            detour: DetourStrategy::ServiceRoad,
        }]);
        assert!(model.assess("mumbai", "Warehouse A").is_some());
        assert!(model.assess("Warehouse B", "Mumbai").is_none());
    }

    #[test]
    fn detour_names_round_trip_through_aliases() {
        let closure: RoadClosure = serde_json::from_str(
            r#"{"from": "A", "to": "B", "reason": "flooded_road", "detour": "air_lift"}"#,
        )
        .expect("closure json");
        assert_eq!(closure.reason, BlockageReason::FloodedRoad);
        assert_eq!(closure.detour, DetourStrategy::AirLift);
        let json = serde_json::to_value(closure.detour).expect("detour json");
        assert_eq!(json, "Air lift available for critical supplies");
    }

    #[test]
    fn penalties_stay_within_three_hours() {
        assert!(DetourStrategy::CATALOG
            .iter()
            .all(|d| (1.0..=3.0).contains(&d.time_penalty_hours())));
    }
}
