//! Per-plan summaries and batch-wide totals.

use relief_core::OptimizationResult;
use serde::Serialize;

/// One flat row per planned disaster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub disaster_id: u64,
    pub disaster_type: String,
    pub location: String,
    pub severity: u8,
    /// Severity-weighted unmet need in [0, 100]: `severity * (100 - coverage) / 100`.
    pub urgency: f64,
    pub coverage_score: u8,
    pub total_required: u64,
    pub total_allocated: u64,
    pub sources: usize,
    pub routes: usize,
    pub blocked_routes: usize,
    pub max_transit_hours: f64,
    /// Resource type with the largest shortfall, if any.
    pub priority_gap: Option<String>,
    pub shortfall: u32,
}

pub fn urgency(severity: u8, coverage_score: u8) -> f64 {
    let severity = f64::from(severity.min(100));
    let unmet = 100.0 - f64::from(coverage_score.min(100));
    (severity * unmet / 100.0 * 100.0).round() / 100.0
}

pub fn summarize(result: &OptimizationResult) -> PlanSummary {
    let disaster = &result.disaster;
    PlanSummary {
        disaster_id: disaster.id.0,
        disaster_type: disaster.disaster_type.to_string(),
        location: disaster.location.clone(),
        severity: disaster.severity,
        urgency: urgency(disaster.severity, result.coverage_score),
        coverage_score: result.coverage_score,
        total_required: result.total_required(),
        total_allocated: result.total_allocated(),
        sources: result.allocations.values().map(|a| a.sources.len()).sum(),
        routes: result.routes.len(),
        blocked_routes: result.blocked_routes,
        max_transit_hours: result.max_transit_hours(),
        priority_gap: result.priority_gap.map(|gap| gap.resource_type.to_string()),
        shortfall: result.priority_gap.map_or(0, |gap| gap.shortfall),
    }
}

/// Aggregates across every plan of a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchTotals {
    pub disasters: usize,
    pub fully_covered: usize,
    pub mean_coverage: f64,
    pub total_required: u64,
    pub total_allocated: u64,
    pub blocked_routes: usize,
}

pub fn totals(summaries: &[PlanSummary]) -> BatchTotals {
    if summaries.is_empty() {
        return BatchTotals::default();
    }
    let coverage_sum: f64 = summaries.iter().map(|s| f64::from(s.coverage_score)).sum();
    BatchTotals {
        disasters: summaries.len(),
        fully_covered: summaries.iter().filter(|s| s.coverage_score == 100).count(),
        mean_coverage: coverage_sum / summaries.len() as f64,
        total_required: summaries.iter().map(|s| s.total_required).sum(),
        total_allocated: summaries.iter().map(|s| s.total_allocated).sum(),
        blocked_routes: summaries.iter().map(|s| s.blocked_routes).sum(),
    }
}
