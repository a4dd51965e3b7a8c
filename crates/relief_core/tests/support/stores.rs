#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use relief_core::error::{ReliefError, Result};
use relief_core::model::{Disaster, DisasterId, ResourceUnit};
use relief_core::store::{DisasterStore, InMemoryStore, InventoryStore};

/// Wraps an [`InMemoryStore`] and counts every read the engine makes.
pub struct CountingStore {
    inner: InMemoryStore,
    disaster_reads: AtomicUsize,
    inventory_reads: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            disaster_reads: AtomicUsize::new(0),
            inventory_reads: AtomicUsize::new(0),
        }
    }

    pub fn disaster_reads(&self) -> usize {
        self.disaster_reads.load(Ordering::SeqCst)
    }

    pub fn inventory_reads(&self) -> usize {
        self.inventory_reads.load(Ordering::SeqCst)
    }
}

impl DisasterStore for CountingStore {
    fn get_disaster(&self, id: DisasterId) -> Result<Option<Disaster>> {
        self.disaster_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_disaster(id)
    }
}

impl InventoryStore for CountingStore {
    fn list_resources(&self, min_quantity: u32) -> Result<Vec<ResourceUnit>> {
        self.inventory_reads.fetch_add(1, Ordering::SeqCst);
        InventoryStore::list_resources(&self.inner, min_quantity)
    }
}

/// Inventory backend that is always down.
pub struct UnavailableInventory;

impl InventoryStore for UnavailableInventory {
    fn list_resources(&self, _min_quantity: u32) -> Result<Vec<ResourceUnit>> {
        Err(ReliefError::store("inventory backend unavailable"))
    }
}
