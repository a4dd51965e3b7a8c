//! Demo records and builders shared by tests, benches and the example runner.
//!
//! Three active disasters across India and five stock records spread over
//! three regional warehouses, each warehouse near one of the disasters.

use crate::config::EngineConfig;
use crate::model::{Disaster, DisasterType, ResourceType, ResourceUnit};
use crate::optimizer::ReliefEngine;
use crate::scenario::ScenarioFile;
use crate::spatial::{LocationTable, NamedLocation};

pub fn demo_locations() -> Vec<NamedLocation> {
    [
        ("Mumbai", 19.0760, 72.8777),
        ("Delhi", 28.6139, 77.2090),
        ("Chennai", 13.0827, 80.2707),
        ("Kolkata", 22.5726, 88.3639),
        ("Bangalore", 12.9716, 77.5946),
        ("Warehouse A", 19.2813, 73.0483),
        ("Warehouse B", 28.4595, 77.0266),
        ("Warehouse C", 12.9675, 79.9419),
    ]
    .into_iter()
    .map(|(name, lat, lng)| NamedLocation {
        name: name.to_string(),
        lat,
        lng,
    })
    .collect()
}

pub fn demo_location_table() -> LocationTable {
    LocationTable::from_locations(&demo_locations())
}

pub fn demo_disasters() -> Vec<Disaster> {
    vec![
        Disaster::new(1, DisasterType::Flood, "Mumbai", 75)
            .with_description("Heavy monsoon flooding in low-lying areas"),
        Disaster::new(2, DisasterType::Earthquake, "Delhi", 90)
            .with_description("Magnitude 6.5 earthquake"),
        Disaster::new(3, DisasterType::Cyclone, "Chennai", 60)
            .with_description("Cyclone approaching the coast"),
    ]
}

pub fn demo_resources() -> Vec<ResourceUnit> {
    vec![
        ResourceUnit::new(1, "Medical Kit A", ResourceType::Medical, 50, "Warehouse A"),
        ResourceUnit::new(2, "Water Bottles", ResourceType::Water, 200, "Warehouse A"),
        ResourceUnit::new(3, "Emergency Tents", ResourceType::Shelter, 100, "Warehouse B"),
        ResourceUnit::new(4, "Ready-to-Eat Meals", ResourceType::Food, 150, "Warehouse B"),
        ResourceUnit::new(5, "First Aid Supplies", ResourceType::Medical, 75, "Warehouse C"),
    ]
}

pub fn demo_scenario() -> ScenarioFile {
    ScenarioFile {
        config: EngineConfig::default(),
        locations: demo_locations(),
        roads: Vec::new(),
        disasters: demo_disasters(),
        resources: demo_resources(),
    }
}

/// Engine over the demo places with `config`.
///
/// # Panics
///
/// Panics if `config` fails validation.
pub fn demo_engine(config: EngineConfig) -> ReliefEngine {
    ReliefEngine::new(config, demo_location_table(), &[]).expect("demo engine config should be valid")
}
