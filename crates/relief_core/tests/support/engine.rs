#![allow(dead_code)]

use std::collections::HashSet;

use relief_core::config::{EngineConfig, ObstructionKind};
use relief_core::model::ResourceUnit;
use relief_core::optimizer::{OptimizationResult, ReliefEngine};
use relief_core::test_helpers::demo_engine;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Demo geography with every road clear, so transit times are exact.
pub fn clear_engine() -> ReliefEngine {
    demo_engine(EngineConfig::default().with_obstruction(ObstructionKind::Clear))
}

pub fn seeded_engine(seed: u64) -> ReliefEngine {
    demo_engine(EngineConfig::default().with_seed(seed))
}

/// Check the structural invariants every plan must satisfy.
pub fn assert_plan_invariants(result: &OptimizationResult, inventory: &[ResourceUnit]) {
    for (resource_type, allocation) in &result.allocations {
        assert_eq!(*resource_type, allocation.resource_type);
        assert!(!allocation.sources.is_empty(), "{resource_type} emitted without sources");
        let sum: u32 = allocation.sources.iter().map(|s| s.quantity_allocated).sum();
        assert_eq!(allocation.allocated, sum, "{resource_type} allocated != sum of sources");
        assert!(allocation.allocated <= allocation.required);
        assert_eq!(Some(&allocation.required), result.requirements.get(resource_type));

        for source in &allocation.sources {
            assert!(source.quantity_allocated > 0);
            assert!(source.quantity_allocated <= source.quantity_available);
            let unit = inventory
                .iter()
                .find(|u| u.id == source.resource_id)
                .expect("source must come from the inventory snapshot");
            assert_eq!(unit.resource_type, *resource_type);
            assert_eq!(unit.quantity, source.quantity_available);
        }
    }

    let distinct: HashSet<String> = result
        .allocations
        .values()
        .flat_map(|a| a.sources.iter())
        .map(|s| s.location.trim().to_lowercase())
        .collect();
    assert_eq!(result.routes.len(), distinct.len(), "one route per distinct source");

    for route in &result.routes {
        assert_eq!(route.to, result.disaster.location);
        assert_eq!(route.blockage_reason.is_some(), route.has_blockage);
        assert_eq!(route.alternate_route.is_some(), route.has_blockage);
        assert!(route.estimated_time_hours >= 1.0);
    }

    assert!(result.coverage_score <= 100);
    assert_eq!(
        result.blocked_routes,
        result.routes.iter().filter(|r| r.has_blockage).count()
    );
}
