//! Recommendation synthesis: coverage scoring and the human-readable summary.
//!
//! Coverage is measured against the full requirement vector. A required type
//! with no allocation counts as zero allocated, so a disaster with no matching
//! stock scores 0, not 100. A zero required total scores 100.

use serde::{Deserialize, Serialize};

use crate::matching::Allocations;
use crate::model::{Disaster, DisasterType, ResourceType};
use crate::requirements::RequirementVector;
use crate::routing::planner::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBand {
    High,
    Medium,
    Low,
}

impl SeverityBand {
    pub fn of(severity: u8) -> Self {
        match severity {
            70.. => SeverityBand::High,
            40..=69 => SeverityBand::Medium,
            _ => SeverityBand::Low,
        }
    }
}

/// Opening protocol line for a disaster type and severity band.
pub fn response_protocol(disaster_type: DisasterType, band: SeverityBand) -> &'static str {
    use SeverityBand::*;
    match (disaster_type, band) {
        (DisasterType::Flood, High) => "Prioritize water rescue equipment and medical supplies. Consider deploying boats and water purification systems first.",
        (DisasterType::Flood, Medium) => "Focus on clean water distribution and temporary shelters. Monitor for waterborne diseases.",
        (DisasterType::Flood, Low) => "Provide basic medical support and assess infrastructure damage.",
        (DisasterType::Earthquake, High) => "Deploy search and rescue teams immediately. Prioritize medical personnel and heavy equipment for debris removal.",
        (DisasterType::Earthquake, Medium) => "Set up field hospitals and assess structural damage. Be prepared for aftershocks.",
        (DisasterType::Earthquake, Low) => "Conduct damage assessment and provide temporary shelter.",
        (DisasterType::Cyclone, High) => "Secure temporary shelters and emergency power. Prioritize medical teams for injuries from flying debris.",
        (DisasterType::Cyclone, Medium) => "Distribute food and water supplies. Restore communication lines.",
        (DisasterType::Cyclone, Low) => "Assess property damage and clear roads.",
        _ => "Deploy standard emergency response protocol.",
    }
}

/// Field equipment typically requested for a disaster type.
pub fn recommended_equipment(disaster_type: DisasterType) -> &'static [&'static str] {
    match disaster_type {
        DisasterType::Flood => &["rescue boats", "water purifiers", "medical kits"],
        DisasterType::Earthquake => &["heavy equipment", "tents", "search dogs"],
        DisasterType::Cyclone => &["generators", "tarpaulins", "dry food"],
        DisasterType::Fire => &["fire extinguishers", "protective gear", "water tankers"],
        DisasterType::Landslide | DisasterType::Other => {
            &["medical supplies", "food packets", "blankets"]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCoverage {
    pub resource_type: ResourceType,
    pub required: u32,
    pub allocated: u32,
    /// `round(allocated / required * 100)`; 100 when nothing is required.
    pub percent: u32,
}

/// The type with the largest unmet quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityGap {
    pub resource_type: ResourceType,
    pub shortfall: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    /// Overall coverage percentage, 0-100.
    pub coverage_score: u8,
    pub coverage: Vec<TypeCoverage>,
    pub blocked_routes: usize,
    pub priority_gap: Option<PriorityGap>,
    pub recommended_equipment: Vec<String>,
}

pub fn percent(allocated: u32, required: u32) -> u32 {
    if required == 0 {
        return 100;
    }
    (f64::from(allocated) / f64::from(required) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationSynthesizer;

impl RecommendationSynthesizer {
    pub fn synthesize(
        &self,
        disaster: &Disaster,
        requirements: &RequirementVector,
        allocations: &Allocations,
        routes: &[Route],
    ) -> Recommendation {
        let coverage = type_coverage(requirements, allocations);
        let coverage_score = overall_coverage(&coverage);
        let blocked_routes = routes.iter().filter(|route| route.has_blockage).count();
        let priority_gap = find_priority_gap(&coverage);

        let band = SeverityBand::of(disaster.clamped_severity());
        let mut text = format!(
            "{} Optimization complete with {}% overall coverage ({}).",
            response_protocol(disaster.disaster_type, band),
            coverage_score,
            coverage_summary(&coverage)
        );

        if blocked_routes > 0 {
            text.push_str(&format!(
                " Detected {} route {} - recommend using alternate transport methods.",
                blocked_routes,
                if blocked_routes == 1 { "blockage" } else { "blockages" }
            ));
        }

        if let Some(gap) = &priority_gap {
            text.push_str(&format!(
                " Priority gap detected in {} resources ({} units short) - consider emergency procurement.",
                gap.resource_type, gap.shortfall
            ));
        }

        Recommendation {
            text,
            coverage_score,
            coverage,
            blocked_routes,
            priority_gap,
            recommended_equipment: recommended_equipment(disaster.disaster_type)
                .iter()
                .map(|item| item.to_string())
                .collect(),
        }
    }
}

fn type_coverage(requirements: &RequirementVector, allocations: &Allocations) -> Vec<TypeCoverage> {
    requirements
        .iter()
        .map(|(&resource_type, &required)| {
            let allocated = allocations
                .get(&resource_type)
                .map_or(0, |allocation| allocation.allocated.min(required));
            TypeCoverage {
                resource_type,
                required,
                allocated,
                percent: percent(allocated, required),
            }
        })
        .collect()
}

fn overall_coverage(coverage: &[TypeCoverage]) -> u8 {
    let required: u64 = coverage.iter().map(|c| u64::from(c.required)).sum();
    if required == 0 {
        return 100;
    }
    let allocated: u64 = coverage.iter().map(|c| u64::from(c.allocated)).sum();
    let pct = (allocated as f64 / required as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Largest positive shortfall; the first type in order wins ties.
fn find_priority_gap(coverage: &[TypeCoverage]) -> Option<PriorityGap> {
    let mut best: Option<PriorityGap> = None;
    for c in coverage {
        let shortfall = c.required.saturating_sub(c.allocated);
        if shortfall > best.map_or(0, |gap| gap.shortfall) {
            best = Some(PriorityGap {
                resource_type: c.resource_type,
                shortfall,
            });
        }
    }
    best
}

fn coverage_summary(coverage: &[TypeCoverage]) -> String {
    let parts: Vec<String> = coverage
        .iter()
        .filter(|c| c.required > 0)
        .map(|c| format!("{}: {}% covered", c.resource_type, c.percent))
        .collect();
    if parts.is_empty() {
        "no resources required".to_string()
    } else {
        parts.join(", ")
    }
}
