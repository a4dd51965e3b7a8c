use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::config::EngineConfig;
use crate::model::{Disaster, ResourceType, ResourceUnit};
use crate::requirements::RequirementVector;
use crate::routing::{resolve_distance_km, DistanceModel};

use super::affinity::type_affinity;
use super::scoring::{proximity_score, PriorityScore};
use super::types::{AllocationSource, Allocations, RankedCandidate, TypeAllocation};

/// Greedy multi-source matcher.
///
/// For each required resource type, candidates are ranked by composite
/// priority (type affinity + proximity to the disaster), highest first, with
/// ascending resource id breaking ties. Units are then drawn from candidates in
/// rank order until the requirement is met or candidates run out.
///
/// Resource types are processed independently, so the order of types in the
/// requirement vector does not affect the result.
pub struct ResourceMatcher {
    distances: Arc<dyn DistanceModel>,
    affinity_weight: f64,
    proximity_weight: f64,
    proximity_reference_km: f64,
    default_distance_km: f64,
}

impl ResourceMatcher {
    pub fn new(distances: Arc<dyn DistanceModel>, config: &EngineConfig) -> Self {
        Self {
            distances,
            affinity_weight: config.affinity_weight,
            proximity_weight: config.proximity_weight,
            proximity_reference_km: config.proximity_reference_km,
            default_distance_km: config.default_distance_km,
        }
    }

    /// Allocate inventory against `required`.
    ///
    /// A type appears in the result only when at least one unit was allocated.
    /// Missing inventory is not an error; callers see it as a coverage gap.
    pub fn allocate(
        &self,
        disaster: &Disaster,
        required: &RequirementVector,
        inventory: &[ResourceUnit],
    ) -> Allocations {
        let mut distance_memo: HashMap<&str, f64> = HashMap::new();
        let mut allocations = Allocations::new();

        for (&resource_type, &amount) in required {
            if amount == 0 {
                continue;
            }
            let ranked = self.rank_candidates(disaster, resource_type, inventory, &mut distance_memo);
            let sources = take_greedily(amount, ranked);
            if sources.is_empty() {
                debug!(
                    "disaster {}: no {} inventory available for {} required",
                    disaster.id, resource_type, amount
                );
                continue;
            }

            let allocated = sources.iter().map(|s| s.quantity_allocated).sum();
            debug!(
                "disaster {}: {} allocated {}/{} from {} source(s)",
                disaster.id,
                resource_type,
                allocated,
                amount,
                sources.len()
            );
            allocations.insert(
                resource_type,
                TypeAllocation {
                    resource_type,
                    required: amount,
                    allocated,
                    sources,
                },
            );
        }

        allocations
    }

    /// Candidates of `resource_type` with stock on hand, best first.
    ///
    /// `distance_memo` holds per-location distances for one `allocate` call.
    fn rank_candidates<'a>(
        &self,
        disaster: &Disaster,
        resource_type: ResourceType,
        inventory: &'a [ResourceUnit],
        distance_memo: &mut HashMap<&'a str, f64>,
    ) -> Vec<(&'a ResourceUnit, RankedCandidate)> {
        let affinity = type_affinity(disaster.disaster_type, resource_type);

        let mut ranked: Vec<(&ResourceUnit, RankedCandidate)> = inventory
            .iter()
            .filter(|unit| unit.resource_type == resource_type && unit.quantity > 0)
            .map(|unit| {
                let distance_km = *distance_memo
                    .entry(unit.location.as_str())
                    .or_insert_with(|| {
                        resolve_distance_km(
                            self.distances.as_ref(),
                            &unit.location,
                            &disaster.location,
                            self.default_distance_km,
                        )
                    });
                let proximity = proximity_score(distance_km, self.proximity_reference_km);
                let score = PriorityScore::new(
                    affinity,
                    proximity,
                    self.affinity_weight,
                    self.proximity_weight,
                );
                (
                    unit,
                    RankedCandidate {
                        resource_id: unit.id,
                        score,
                        distance_km,
                    },
                )
            })
            .collect();

        ranked.sort_by(|(_, a), (_, b)| compare_candidates(a, b));
        ranked
    }
}

/// Higher total first; equal totals fall back to ascending resource id.
fn compare_candidates(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.score
        .total
        .total_cmp(&a.score.total)
        .then_with(|| a.resource_id.cmp(&b.resource_id))
}

fn take_greedily(required: u32, ranked: Vec<(&ResourceUnit, RankedCandidate)>) -> Vec<AllocationSource> {
    let mut remaining = required;
    let mut sources = Vec::new();

    for (unit, candidate) in ranked {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(unit.quantity);
        sources.push(AllocationSource {
            resource_id: unit.id,
            resource_name: unit.name.clone(),
            location: unit.location.clone(),
            quantity_allocated: take,
            quantity_available: unit.quantity,
            priority_score: candidate.score.rounded_total(),
        });
        remaining -= take;
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisasterType, ResourceId};
    use crate::routing::GeodesicDistanceModel;
    use crate::spatial::{GeoPoint, LocationTable};

    fn matcher() -> ResourceMatcher {
        let mut table = LocationTable::new();
        table.insert("Mumbai", GeoPoint::new(19.076, 72.8777));
        table.insert("Warehouse A", GeoPoint::new(19.2813, 73.0483));
        table.insert("Warehouse C", GeoPoint::new(12.9675, 79.9419));
        let distances = Arc::new(GeodesicDistanceModel::new(table, 1.3));
        ResourceMatcher::new(distances, &EngineConfig::default())
    }

    fn required(pairs: &[(ResourceType, u32)]) -> RequirementVector {
        pairs.iter().copied().collect()
    }

    #[test]
    fn nearer_source_is_drawn_first() {
        let disaster = Disaster::new(1, DisasterType::Flood, "Mumbai", 75);
        let inventory = vec![
            ResourceUnit::new(1, "First Aid Supplies", ResourceType::Medical, 75, "Warehouse C"),
            ResourceUnit::new(2, "Medical Kit A", ResourceType::Medical, 50, "Warehouse A"),
        ];
        let allocations = matcher().allocate(
            &disaster,
            &required(&[(ResourceType::Medical, 60)]),
            &inventory,
        );

        let medical = &allocations[&ResourceType::Medical];
        assert_eq!(medical.allocated, 60);
        assert_eq!(medical.sources[0].resource_id, ResourceId(2));
        assert_eq!(medical.sources[0].quantity_allocated, 50);
        assert_eq!(medical.sources[1].quantity_allocated, 10);
        assert!(medical.sources[0].priority_score > medical.sources[1].priority_score);
    }

    #[test]
    fn stops_once_requirement_met() {
        let disaster = Disaster::new(1, DisasterType::Flood, "Mumbai", 75);
        let inventory = vec![
            ResourceUnit::new(1, "Water Bottles", ResourceType::Water, 200, "Warehouse A"),
            ResourceUnit::new(2, "Water Tanker", ResourceType::Water, 500, "Warehouse A"),
        ];
        let allocations =
            matcher().allocate(&disaster, &required(&[(ResourceType::Water, 40)]), &inventory);
        let water = &allocations[&ResourceType::Water];
        assert_eq!(water.sources.len(), 1);
        assert_eq!(water.allocated, 40);
        assert_eq!(water.sources[0].quantity_available, 200);
    }

    #[test]
    fn missing_inventory_omits_type() {
        let disaster = Disaster::new(1, DisasterType::Flood, "Mumbai", 75);
        let allocations =
            matcher().allocate(&disaster, &required(&[(ResourceType::Medical, 30)]), &[]);
        assert!(allocations.is_empty());
    }

    #[test]
    fn zero_quantity_records_are_skipped() {
        let disaster = Disaster::new(1, DisasterType::Flood, "Mumbai", 75);
        let inventory = vec![ResourceUnit::new(1, "Empty", ResourceType::Food, 0, "Warehouse A")];
        let allocations =
            matcher().allocate(&disaster, &required(&[(ResourceType::Food, 30)]), &inventory);
        assert!(allocations.is_empty());
    }

    #[test]
    fn equal_scores_break_ties_by_id() {
        let disaster = Disaster::new(1, DisasterType::Flood, "Mumbai", 75);
        let inventory = vec![
            ResourceUnit::new(9, "Tents B", ResourceType::Shelter, 10, "Warehouse A"),
            ResourceUnit::new(4, "Tents A", ResourceType::Shelter, 10, "Warehouse A"),
        ];
        let allocations =
            matcher().allocate(&disaster, &required(&[(ResourceType::Shelter, 15)]), &inventory);
        let shelter = &allocations[&ResourceType::Shelter];
        assert_eq!(shelter.sources[0].resource_id, ResourceId(4));
        assert_eq!(shelter.sources[0].quantity_allocated, 10);
        assert_eq!(shelter.sources[1].resource_id, ResourceId(9));
        assert_eq!(shelter.sources[1].quantity_allocated, 5);
    }
}
