mod support;

use relief_core::model::ResourceType;
use relief_core::routing::obstruction::{BlockageReason, DetourStrategy};
use relief_core::ScenarioFile;

const ROAD_SCENARIO: &str = r#"{
    "config": {
        "distance_model": "road_network",
        "obstruction": { "kind": "clear" }
    },
    "locations": [
        { "name": "Mumbai", "lat": 19.0760, "lng": 72.8777 },
        { "name": "Warehouse A", "lat": 19.2813, "lng": 73.0483 },
        { "name": "Warehouse C", "lat": 12.9675, "lng": 79.9419 }
    ],
    "roads": [
        { "from": "Warehouse A", "to": "Thane", "distance_km": 20.0 },
        { "from": "Thane", "to": "Mumbai", "distance_km": 25.0 },
        { "from": "Warehouse A", "to": "Mumbai", "distance_km": 80.0 }
    ],
    "disasters": [{ "id": 1, "type": "Flood", "location": "Mumbai", "severity": 75 }],
    "resources": [
        { "id": 1, "name": "Medical Kit A", "type": "Medical", "quantity": 10, "location": "Warehouse A" },
        { "id": 5, "name": "First Aid Supplies", "type": "Medical", "quantity": 75, "location": "Warehouse C" }
    ]
}"#;

#[test]
fn road_network_routes_take_the_shortest_path() {
    support::engine::init_logging();
    let scenario = ScenarioFile::from_json(ROAD_SCENARIO).expect("scenario");
    let engine = scenario.build_engine().expect("engine");
    let result = engine.plan(&scenario.disasters[0], &scenario.resources);

    let warehouse_a = result
        .routes
        .iter()
        .find(|r| r.from == "Warehouse A")
        .expect("route from Warehouse A");
    assert_eq!(warehouse_a.distance_km, 45.0);
    assert_eq!(warehouse_a.estimated_time_hours, 1.0);

    // Warehouse C is off the road graph and falls back to geodesic distance.
    let warehouse_c = result
        .routes
        .iter()
        .find(|r| r.from == "Warehouse C")
        .expect("route from Warehouse C");
    assert!(warehouse_c.distance_km > 1_000.0, "{}", warehouse_c.distance_km);
    assert_eq!(
        result.allocations[&ResourceType::Medical].sources[0].location,
        "Warehouse A"
    );
}

#[test]
fn reported_closures_force_detours() {
    let json = ROAD_SCENARIO.replace(
        r#""obstruction": { "kind": "clear" }"#,
        r#""obstruction": { "kind": "reported", "closures": [
            { "from": "Mumbai", "to": "Warehouse A", "reason": "flooded_road", "detour": "rail" }
        ] }"#,
    );
    let scenario = ScenarioFile::from_json(&json).expect("scenario");
    let result = scenario
        .build_engine()
        .expect("engine")
        .plan(&scenario.disasters[0], &scenario.resources);

    let blocked: Vec<_> = result.routes.iter().filter(|r| r.has_blockage).collect();
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].from, "Warehouse A");
    assert_eq!(blocked[0].blockage_reason, Some(BlockageReason::FloodedRoad));
    assert_eq!(blocked[0].alternate_route, Some(DetourStrategy::Rail));
    assert_eq!(blocked[0].estimated_time_hours, 4.0);
    assert_eq!(result.blocked_routes, 1);
    assert!(result
        .recommendation_text
        .contains("Detected 1 route blockage - recommend using alternate transport methods."));
}

#[test]
fn unknown_places_use_the_default_distance() {
    let json = r#"{
        "config": { "obstruction": { "kind": "clear" } },
        "disasters": [{ "id": 1, "type": "Cyclone", "location": "Puri", "severity": 60 }],
        "resources": [{ "id": 1, "name": "Tarps", "type": "Shelter", "quantity": 500, "location": "Depot 9" }]
    }"#;
    let scenario = ScenarioFile::from_json(json).expect("scenario");
    let result = scenario
        .build_engine()
        .expect("engine")
        .plan(&scenario.disasters[0], &scenario.resources);

    assert_eq!(result.routes.len(), 1);
    assert_eq!(result.routes[0].distance_km, 175.0);
    assert_eq!(result.routes[0].estimated_time_hours, 3.5);
}
