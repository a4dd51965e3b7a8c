//! Record store contracts and an in-memory implementation.
//!
//! The engine reads through [`DisasterStore`] and [`InventoryStore`].
//! [`InMemoryStore`] implements both and can commit finished plans, which is
//! the only place stock quantities ever change.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{ReliefError, Result};
use crate::model::{Disaster, DisasterId, DisasterStatus, DisasterType, ResourceId, ResourceUnit};
use crate::optimizer::OptimizationResult;
use crate::routing::planner::Route;
use crate::spatial::location_key;

/// Disaster lookup.
pub trait DisasterStore: Send + Sync {
    fn get_disaster(&self, id: DisasterId) -> Result<Option<Disaster>>;
}

/// Inventory query.
pub trait InventoryStore: Send + Sync {
    /// Resources holding at least `min_quantity` units.
    fn list_resources(&self, min_quantity: u32) -> Result<Vec<ResourceUnit>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    #[default]
    Pending,
    Dispatched,
    Delivered,
}

/// Stock reserved from one source for one disaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub disaster_id: DisasterId,
    pub resource_id: ResourceId,
    pub quantity: u32,
    /// Human-readable leg the stock travels, e.g. `"Warehouse A -> Mumbai (46.2 km)"`.
    pub route: String,
    pub status: CommitmentStatus,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Records {
    disasters: BTreeMap<DisasterId, Disaster>,
    resources: BTreeMap<ResourceId, ResourceUnit>,
    commitments: Vec<Commitment>,
}

/// Mutex-guarded store for disasters, resources and commitments.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the given records.
    pub fn with_records(
        disasters: impl IntoIterator<Item = Disaster>,
        resources: impl IntoIterator<Item = ResourceUnit>,
    ) -> Self {
        let records = Records {
            disasters: disasters.into_iter().map(|d| (d.id, d)).collect(),
            resources: resources.into_iter().map(|r| (r.id, r)).collect(),
            commitments: Vec::new(),
        };
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>> {
        self.records
            .lock()
            .map_err(|_| ReliefError::store("record store lock poisoned"))
    }

    /// Record a new active disaster under the next free id.
    pub fn create_disaster(
        &self,
        disaster_type: DisasterType,
        location: impl Into<String>,
        severity: u8,
        description: Option<String>,
    ) -> Result<Disaster> {
        let mut records = self.lock()?;
        let next_id = records
            .disasters
            .keys()
            .next_back()
            .map_or(1, |id| id.0 + 1);
        let mut disaster = Disaster::new(next_id, disaster_type, location, severity);
        disaster.description = description;
        records.disasters.insert(disaster.id, disaster.clone());
        info!(
            "recorded disaster {} ({} at {}, severity {})",
            disaster.id, disaster.disaster_type, disaster.location, disaster.severity
        );
        Ok(disaster)
    }

    /// Insert or replace a disaster record as given.
    pub fn insert_disaster(&self, disaster: Disaster) -> Result<()> {
        self.lock()?.disasters.insert(disaster.id, disaster);
        Ok(())
    }

    pub fn update_disaster_status(&self, id: DisasterId, status: DisasterStatus) -> Result<()> {
        let mut records = self.lock()?;
        let disaster = records
            .disasters
            .get_mut(&id)
            .ok_or(ReliefError::DisasterNotFound(id))?;
        disaster.status = status;
        Ok(())
    }

    /// Disasters in id order, optionally filtered by status.
    pub fn list_disasters(&self, status: Option<DisasterStatus>) -> Result<Vec<Disaster>> {
        Ok(self
            .lock()?
            .disasters
            .values()
            .filter(|d| status.is_none() || status == Some(d.status))
            .cloned()
            .collect())
    }

    pub fn upsert_resource(&self, resource: ResourceUnit) -> Result<()> {
        self.lock()?.resources.insert(resource.id, resource);
        Ok(())
    }

    /// Resources with at least `min_quantity` units, most recently updated first.
    pub fn list_resources(&self, min_quantity: u32) -> Result<Vec<ResourceUnit>> {
        let mut resources: Vec<ResourceUnit> = self
            .lock()?
            .resources
            .values()
            .filter(|r| r.quantity >= min_quantity)
            .cloned()
            .collect();
        resources.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(resources)
    }

    pub fn resource(&self, id: ResourceId) -> Result<Option<ResourceUnit>> {
        Ok(self.lock()?.resources.get(&id).cloned())
    }

    pub fn commitments(&self) -> Result<Vec<Commitment>> {
        Ok(self.lock()?.commitments.clone())
    }

    /// Reserve the stock a plan allocated and record one pending commitment
    /// per source.
    ///
    /// All-or-nothing: every source is checked against current stock before
    /// any quantity is decremented, so a rejected commit leaves the store as
    /// it was.
    pub fn commit(&self, result: &OptimizationResult) -> Result<Vec<Commitment>> {
        let mut records = self.lock()?;

        let mut requested: BTreeMap<ResourceId, u32> = BTreeMap::new();
        for source in result.allocations.values().flat_map(|a| a.sources.iter()) {
            let resource_id = source.resource_id;
            let total = requested.entry(resource_id).or_default();
            *total = match total.checked_add(source.quantity_allocated) {
                Some(sum) => sum,
                None => {
                    let unit = records
                        .resources
                        .get(&resource_id)
                        .ok_or(ReliefError::UnknownResource(resource_id))?;
                    return Err(ReliefError::InsufficientStock {
                        resource_id,
                        requested: u32::MAX,
                        available: unit.quantity,
                    });
                }
            };
        }

        for (&resource_id, &quantity) in &requested {
            let unit = records
                .resources
                .get(&resource_id)
                .ok_or(ReliefError::UnknownResource(resource_id))?;
            if unit.quantity < quantity {
                return Err(ReliefError::InsufficientStock {
                    resource_id,
                    requested: quantity,
                    available: unit.quantity,
                });
            }
        }

        let now = Utc::now();
        for (resource_id, quantity) in &requested {
            if let Some(unit) = records.resources.get_mut(resource_id) {
                unit.quantity -= quantity;
                unit.last_updated = now;
            }
        }

        let legs = route_descriptions(&result.routes);
        let commitments: Vec<Commitment> = result
            .allocations
            .values()
            .flat_map(|a| a.sources.iter())
            .map(|source| Commitment {
                disaster_id: result.disaster.id,
                resource_id: source.resource_id,
                quantity: source.quantity_allocated,
                route: legs
                    .get(&location_key(&source.location))
                    .cloned()
                    .unwrap_or_else(|| format!("{} -> {}", source.location, result.disaster.location)),
                status: CommitmentStatus::Pending,
                committed_at: now,
            })
            .collect();

        debug!(
            "disaster {}: committed {} source(s)",
            result.disaster.id,
            commitments.len()
        );
        records.commitments.extend(commitments.iter().cloned());
        Ok(commitments)
    }
}

fn route_descriptions(routes: &[Route]) -> HashMap<String, String> {
    routes
        .iter()
        .map(|route| {
            let mut text = format!("{} -> {} ({} km)", route.from, route.to, route.distance_km);
            if let Some(detour) = route.alternate_route {
                text.push_str(&format!(", detour: {}", detour.description()));
            }
            (location_key(&route.from), text)
        })
        .collect()
}

impl DisasterStore for InMemoryStore {
    fn get_disaster(&self, id: DisasterId) -> Result<Option<Disaster>> {
        Ok(self.lock()?.disasters.get(&id).cloned())
    }
}

impl InventoryStore for InMemoryStore {
    fn list_resources(&self, min_quantity: u32) -> Result<Vec<ResourceUnit>> {
        InMemoryStore::list_resources(self, min_quantity)
    }
}
