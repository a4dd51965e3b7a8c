use crate::metrics::PlanSummary;

pub(crate) fn export_summary_impl(
    summaries: &[PlanSummary],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "disaster_id",
        "disaster_type",
        "location",
        "severity",
        "urgency",
        "coverage_score",
        "total_required",
        "total_allocated",
        "sources",
        "routes",
        "blocked_routes",
        "max_transit_hours",
        "priority_gap",
        "shortfall",
    ])?;

    for s in summaries {
        wtr.write_record([
            s.disaster_id.to_string(),
            s.disaster_type.clone(),
            s.location.clone(),
            s.severity.to_string(),
            format!("{:.2}", s.urgency),
            s.coverage_score.to_string(),
            s.total_required.to_string(),
            s.total_allocated.to_string(),
            s.sources.to_string(),
            s.routes.to_string(),
            s.blocked_routes.to_string(),
            format!("{:.1}", s.max_transit_hours),
            s.priority_gap.clone().unwrap_or_default(),
            s.shortfall.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
