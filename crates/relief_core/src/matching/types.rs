use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ResourceId, ResourceType};

use super::scoring::PriorityScore;

/// Allocations keyed by resource type, iterated in [`ResourceType`] order.
pub type Allocations = BTreeMap<ResourceType, TypeAllocation>;

/// Units drawn from one inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSource {
    pub resource_id: ResourceId,
    pub resource_name: String,
    pub location: String,
    /// Always positive and never above `quantity_available`.
    pub quantity_allocated: u32,
    /// On-hand quantity in the snapshot the plan was computed from.
    pub quantity_available: u32,
    /// Composite priority the source was ranked by, two decimals.
    pub priority_score: f64,
}

/// Everything allocated for one resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAllocation {
    pub resource_type: ResourceType,
    pub required: u32,
    /// Sum of `sources[..].quantity_allocated`; never above `required`.
    pub allocated: u32,
    pub sources: Vec<AllocationSource>,
}

impl TypeAllocation {
    pub fn shortfall(&self) -> u32 {
        self.required.saturating_sub(self.allocated)
    }

    pub fn is_fully_covered(&self) -> bool {
        self.allocated >= self.required
    }
}

/// An inventory record scored for one disaster, before allocation.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub resource_id: ResourceId,
    pub score: PriorityScore,
    pub distance_km: f64,
}
