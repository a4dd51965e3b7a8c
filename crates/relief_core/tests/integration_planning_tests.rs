mod support;

use relief_core::matching::ResourceMatcher;
use relief_core::model::{Disaster, DisasterType, ResourceId, ResourceType, ResourceUnit};
use relief_core::recommendation::RecommendationSynthesizer;
use relief_core::requirements::{scaled_requirement, RequirementVector};
use relief_core::routing::build_distance_model;
use relief_core::test_helpers::{demo_disasters, demo_location_table, demo_resources};
use relief_core::EngineConfig;

use support::engine::{assert_plan_invariants, clear_engine, init_logging, seeded_engine};

#[test]
fn flood_in_mumbai_draws_from_nearby_warehouse() {
    init_logging();
    let disaster = Disaster::new(1, DisasterType::Flood, "Mumbai", 75);
    let inventory = vec![
        ResourceUnit::new(1, "Medical Kit A", ResourceType::Medical, 50, "Warehouse A"),
        ResourceUnit::new(2, "Water Bottles", ResourceType::Water, 200, "Warehouse A"),
    ];

    let result = clear_engine().plan(&disaster, &inventory);
    assert_plan_invariants(&result, &inventory);

    let medical = &result.allocations[&ResourceType::Medical];
    assert!((23..=27).contains(&medical.required), "medical {}", medical.required);
    assert!(medical.allocated <= 50);
    assert_eq!(medical.allocated, medical.required);

    let water = &result.allocations[&ResourceType::Water];
    assert!((38..=45).contains(&water.required), "water {}", water.required);
    assert!(water.allocated <= 200);

    assert_eq!(result.routes.len(), 1);
    let route = &result.routes[0];
    assert_eq!(route.from, "Warehouse A");
    assert_eq!(route.to, "Mumbai");
    assert!(!route.has_blockage);
    assert!(route.distance_km > 20.0 && route.distance_km < 60.0, "{}", route.distance_km);
    assert_eq!(route.estimated_time_hours, 1.0);
}

#[test]
fn missing_medical_stock_is_reported_as_the_priority_gap() {
    let disaster = Disaster::new(7, DisasterType::Flood, "Mumbai", 75);
    let required: RequirementVector = [(ResourceType::Medical, 30)].into_iter().collect();
    let inventory = vec![ResourceUnit::new(2, "Water Bottles", ResourceType::Water, 200, "Warehouse A")];

    let config = EngineConfig::default();
    let matcher = ResourceMatcher::new(build_distance_model(&config, demo_location_table(), &[]), &config);
    let allocations = matcher.allocate(&disaster, &required, &inventory);
    assert!(!allocations.contains_key(&ResourceType::Medical));

    let recommendation = RecommendationSynthesizer.synthesize(&disaster, &required, &allocations, &[]);
    assert_eq!(recommendation.coverage_score, 0);
    assert_eq!(
        recommendation.priority_gap.map(|g| (g.resource_type, g.shortfall)),
        Some((ResourceType::Medical, 30))
    );
    assert!(recommendation.text.contains("Medical"));
}

#[test]
fn equal_candidates_are_drawn_by_ascending_id() {
    let disaster = Disaster::new(1, DisasterType::Flood, "Mumbai", 75);
    let inventory = vec![
        ResourceUnit::new(7, "Kit North", ResourceType::Medical, 20, "Warehouse A"),
        ResourceUnit::new(3, "Kit South", ResourceType::Medical, 20, "Warehouse A"),
    ];

    let result = clear_engine().plan(&disaster, &inventory);
    let medical = &result.allocations[&ResourceType::Medical];
    assert_eq!(medical.sources[0].resource_id, ResourceId(3));
    assert_eq!(medical.sources[0].quantity_allocated, 20);
    assert_eq!(medical.sources[1].resource_id, ResourceId(7));
    assert_eq!(medical.sources[1].quantity_allocated, medical.required - 20);
    assert_eq!(
        medical.sources[0].priority_score,
        medical.sources[1].priority_score
    );
}

#[test]
fn zero_severity_needs_nothing() {
    let disaster = Disaster::new(9, DisasterType::Earthquake, "Delhi", 0);
    let result = clear_engine().plan(&disaster, &demo_resources());

    assert!(result.requirements.values().all(|&v| v == 0));
    assert!(result.allocations.is_empty());
    assert!(result.routes.is_empty());
    assert_eq!(result.coverage_score, 100);
    assert!(result.priority_gap.is_none());
}

#[test]
fn replanning_is_reproducible() {
    let inventory = demo_resources();
    let first = seeded_engine(42);
    let second = seeded_engine(42);

    for disaster in demo_disasters() {
        let a = first.plan(&disaster, &inventory);
        let b = first.plan(&disaster, &inventory);
        let c = second.plan(&disaster, &inventory);

        assert_eq!(a.requirements, b.requirements);
        assert_eq!(a.allocations, b.allocations);
        assert_eq!(a.routes, b.routes);
        assert_eq!(a.recommendation_text, b.recommendation_text);

        assert_eq!(a.requirements, c.requirements);
        assert_eq!(a.routes, c.routes);
    }
}

#[test]
fn requirements_stay_within_variance_band() {
    let engine = clear_engine();
    for disaster_type in DisasterType::ALL {
        for severity in (0..=100u8).step_by(5) {
            let disaster = Disaster::new(u64::from(severity) + 1, disaster_type, "Mumbai", severity);
            let result = engine.plan(&disaster, &[]);
            let baseline = relief_core::requirements::base_requirements(disaster_type);
            assert_eq!(result.requirements.len(), baseline.len());
            for (resource_type, base) in baseline {
                let value = result.requirements[&resource_type];
                let low = scaled_requirement(base, severity, 0);
                let high = scaled_requirement(base, severity, 20);
                assert!(
                    (low..=high).contains(&value),
                    "{disaster_type} {severity} {resource_type}: {value} not in {low}..={high}"
                );
            }
        }
    }
}

#[test]
fn demo_plans_hold_invariants_under_seeded_blockages() {
    init_logging();
    let inventory = demo_resources();
    for seed in [1, 7, 42, 1_000] {
        let engine = seeded_engine(seed);
        for disaster in demo_disasters() {
            let result = engine.plan(&disaster, &inventory);
            assert_plan_invariants(&result, &inventory);
            for route in result.routes.iter().filter(|r| r.has_blockage) {
                let clear_hours = (route.distance_km / 50.0).max(1.0);
                let penalty = route.estimated_time_hours - clear_hours;
                assert!((0.9..=3.1).contains(&penalty), "penalty {penalty}");
            }
        }
    }
}

#[test]
fn plan_result_serializes_with_type_keys() {
    let result = clear_engine().plan(&demo_disasters()[0], &demo_resources());
    let json = serde_json::to_value(&result).expect("serialize result");

    assert_eq!(json["disaster"]["type"], "Flood");
    assert!(json["allocations"]["Medical"]["sources"].is_array());
    assert!(json["routes"][0].get("blockage_reason").is_none());

    let back: relief_core::OptimizationResult =
        serde_json::from_value(json).expect("deserialize result");
    assert_eq!(back.allocations, result.allocations);
}
