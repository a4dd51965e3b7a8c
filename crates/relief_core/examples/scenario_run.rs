//! Plan relief for the three demo disasters and print the results.
//!
//! Run with: cargo run -p relief_core --example scenario_run

use relief_core::model::DisasterStatus;
use relief_core::test_helpers::demo_scenario;
use relief_core::OptimizationOrchestrator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let scenario = demo_scenario();
    let engine = scenario.build_engine()?;
    let store = scenario.build_store();
    let orchestrator = OptimizationOrchestrator::new(&engine, &store, &store);

    println!(
        "--- Demo scenario ({} disasters, {} stock records, seed {}) ---",
        scenario.disasters.len(),
        scenario.resources.len(),
        engine.config().seed
    );

    for disaster in store.list_disasters(Some(DisasterStatus::Active))? {
        let result = orchestrator.optimize(disaster.id)?;

        println!(
            "\n#{} {} at {} (severity {}): {}% coverage",
            disaster.id,
            disaster.disaster_type,
            disaster.location,
            disaster.severity,
            result.coverage_score
        );
        for coverage in &result.coverage {
            println!(
                "  {:<10} required {:>3}  allocated {:>3}  ({}%)",
                coverage.resource_type.to_string(),
                coverage.required,
                coverage.allocated,
                coverage.percent
            );
        }
        for route in &result.routes {
            match route.alternate_route {
                Some(detour) => println!(
                    "  route {} -> {}: {} km, {} h, BLOCKED ({}), {}",
                    route.from,
                    route.to,
                    route.distance_km,
                    route.estimated_time_hours,
                    route.blockage_reason.map_or("unknown", |r| r.description()),
                    detour.description()
                ),
                None => println!(
                    "  route {} -> {}: {} km, {} h",
                    route.from, route.to, route.distance_km, route.estimated_time_hours
                ),
            }
        }
        println!("  {}", result.recommendation_text);
        println!("  equipment: {}", result.recommended_equipment.join(", "));
    }

    Ok(())
}
