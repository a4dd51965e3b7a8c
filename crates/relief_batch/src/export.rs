//! Result export and ranking utilities.
//!
//! Full plans and commitments go to JSON; the flat per-disaster summary goes
//! to CSV.

use std::path::Path;

use relief_core::store::Commitment;
use relief_core::OptimizationResult;

use crate::metrics::PlanSummary;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/ranking.rs"]
mod ranking;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export full plans as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if `plans` is empty, or if file creation or JSON
/// serialization fails.
pub fn export_plans_to_json(
    plans: &[OptimizationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(plans)?;
    let file = writer_utils::create_output_file(path)?;
    json::write_json(plans, file)
}

/// Export commitments as a JSON array. An empty list is written as `[]`.
pub fn export_commitments_to_json(
    commitments: &[Commitment],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::write_json(commitments, file)
}

/// Export one summary row per disaster to CSV.
///
/// # Errors
///
/// Returns an error if `summaries` is empty, or if file creation or CSV
/// writing fails.
pub fn export_summary_to_csv(
    summaries: &[PlanSummary],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(summaries)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_summary_impl(summaries, file)
}

/// Summaries ordered most urgent first.
pub fn rank_by_urgency(summaries: &[PlanSummary]) -> Vec<&PlanSummary> {
    ranking::rank_by_urgency_impl(summaries)
}

/// Index of the most urgent summary, or `None` when there are none.
pub fn most_urgent_index(summaries: &[PlanSummary]) -> Option<usize> {
    ranking::most_urgent_index_impl(summaries)
}
