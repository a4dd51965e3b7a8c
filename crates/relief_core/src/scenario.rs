//! Scenario files: engine configuration, places, roads and records in one
//! JSON document.
//!
//! ```json
//! {
//!   "config": { "seed": 7, "obstruction": { "kind": "clear" } },
//!   "locations": [{ "name": "Mumbai", "lat": 19.076, "lng": 72.8777 }],
//!   "roads": [{ "from": "Warehouse A", "to": "Mumbai", "distance_km": 46.0 }],
//!   "disasters": [{ "id": 1, "type": "Flood", "location": "Mumbai", "severity": 75 }],
//!   "resources": [{ "id": 1, "name": "Medical Kit A", "type": "Medical",
//!                   "quantity": 50, "location": "Warehouse A" }]
//! }
//! ```
//!
//! Only `disasters` and `resources` are required.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ReliefError, Result};
use crate::model::{Disaster, ResourceUnit};
use crate::optimizer::ReliefEngine;
use crate::routing::RoadSegment;
use crate::spatial::{LocationTable, NamedLocation};
use crate::store::InMemoryStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub locations: Vec<NamedLocation>,
    #[serde(default)]
    pub roads: Vec<RoadSegment>,
    pub disasters: Vec<Disaster>,
    pub resources: Vec<ResourceUnit>,
}

impl ScenarioFile {
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: ScenarioFile = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scenario = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            "loaded scenario {}: {} disaster(s), {} resource(s), {} location(s), {} road(s)",
            path.display(),
            scenario.disasters.len(),
            scenario.resources.len(),
            scenario.locations.len(),
            scenario.roads.len()
        );
        Ok(scenario)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Engine config, road segment distances and record id uniqueness.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        for road in &self.roads {
            road.validate()?;
        }

        let mut disaster_ids = HashSet::new();
        if let Some(dup) = self.disasters.iter().find(|d| !disaster_ids.insert(d.id)) {
            return Err(ReliefError::invalid_config(format!(
                "duplicate disaster id {}",
                dup.id
            )));
        }
        let mut resource_ids = HashSet::new();
        if let Some(dup) = self.resources.iter().find(|r| !resource_ids.insert(r.id)) {
            return Err(ReliefError::invalid_config(format!(
                "duplicate resource id {}",
                dup.id
            )));
        }
        Ok(())
    }

    pub fn location_table(&self) -> LocationTable {
        LocationTable::from_locations(&self.locations)
    }

    pub fn build_engine(&self) -> Result<ReliefEngine> {
        ReliefEngine::new(self.config.clone(), self.location_table(), &self.roads)
    }

    /// A fresh store holding this scenario's disasters and resources.
    pub fn build_store(&self) -> InMemoryStore {
        InMemoryStore::with_records(self.disasters.iter().cloned(), self.resources.iter().cloned())
    }
}
