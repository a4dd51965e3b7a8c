use std::cmp::Ordering;

use crate::metrics::PlanSummary;

/// Higher urgency first; ties go to the higher severity, then the lower id.
fn compare_urgency(a: &PlanSummary, b: &PlanSummary) -> Ordering {
    b.urgency
        .total_cmp(&a.urgency)
        .then_with(|| b.severity.cmp(&a.severity))
        .then_with(|| a.disaster_id.cmp(&b.disaster_id))
}

pub(crate) fn rank_by_urgency_impl(summaries: &[PlanSummary]) -> Vec<&PlanSummary> {
    let mut ranked: Vec<&PlanSummary> = summaries.iter().collect();
    ranked.sort_by(|a, b| compare_urgency(a, b));
    ranked
}

pub(crate) fn most_urgent_index_impl(summaries: &[PlanSummary]) -> Option<usize> {
    summaries
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| compare_urgency(a, b))
        .map(|(index, _)| index)
}
