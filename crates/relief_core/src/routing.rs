//! Pluggable distance models: trait abstraction for distance backends.
//!
//! Two implementations, selectable via [`DistanceModelKind`]:
//!
//! - **`GeodesicDistanceModel`**: haversine between table coordinates times a road
//!   circuity factor.
//! - **`RoadNetworkDistanceModel`**: Dijkstra over declared road segments, with a
//!   geodesic fallback for places the network does not connect.
//!
//! Either can be wrapped in a [`CachedDistanceModel`]. The route planner and the
//! resource matcher share one `Arc<dyn DistanceModel>` built by
//! [`build_distance_model`].

pub mod obstruction;
pub mod planner;

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use log::warn;
use lru::LruCache;
use pathfinding::prelude::dijkstra;
use serde::{Deserialize, Serialize};

use crate::config::{DistanceModelKind, EngineConfig};
use crate::error::{ReliefError, Result};
use crate::spatial::{location_key, LocationTable};

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Trait for distance backends. Implementations must be `Send + Sync` so one
/// model can be shared by concurrent planning calls.
pub trait DistanceModel: Send + Sync {
    /// Road distance between two named places, or `None` if the model cannot
    /// resolve the pair.
    fn distance_km(&self, from: &str, to: &str) -> Option<f64>;
}

/// Resolve a distance, degrading to `default_km` instead of failing.
///
/// The same place (ignoring case) is always 0 km away.
pub fn resolve_distance_km(
    model: &dyn DistanceModel,
    from: &str,
    to: &str,
    default_km: f64,
) -> f64 {
    if location_key(from) == location_key(to) {
        return 0.0;
    }
    match model.distance_km(from, to) {
        Some(km) => km,
        None => {
            warn!("no distance for '{from}' -> '{to}', using default {default_km} km");
            default_km
        }
    }
}

/// An undirected road segment between two named places.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

/// Longest accepted segment (km), roughly the Earth's circumference.
pub const MAX_SEGMENT_KM: f64 = 40_000.0;

impl RoadSegment {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance_km: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance_km,
        }
    }

    /// Distance must lie in `[0, MAX_SEGMENT_KM]`; NaN and infinities are rejected.
    pub fn validate(&self) -> Result<()> {
        if (0.0..=MAX_SEGMENT_KM).contains(&self.distance_km) {
            return Ok(());
        }
        Err(ReliefError::invalid_config(format!(
            "road segment '{}' -> '{}' has distance {} km, expected 0..={} km",
            self.from, self.to, self.distance_km, MAX_SEGMENT_KM
        )))
    }
}

// ---------------------------------------------------------------------------
// Geodesic model (always available)
// ---------------------------------------------------------------------------

/// Straight-line distance scaled by a circuity factor.
pub struct GeodesicDistanceModel {
    table: LocationTable,
    circuity_factor: f64,
}

impl GeodesicDistanceModel {
    pub fn new(table: LocationTable, circuity_factor: f64) -> Self {
        Self {
            table,
            circuity_factor,
        }
    }
}

impl DistanceModel for GeodesicDistanceModel {
    fn distance_km(&self, from: &str, to: &str) -> Option<f64> {
        self.table
            .straight_line_km(from, to)
            .map(|km| km * self.circuity_factor)
    }
}

// ---------------------------------------------------------------------------
// Road network model
// ---------------------------------------------------------------------------

/// Shortest-path distance over a road graph of named places.
///
/// Edge weights are whole metres so Dijkstra runs on an ordered integer cost.
pub struct RoadNetworkDistanceModel {
    nodes: HashMap<String, usize>,
    edges: Vec<Vec<(usize, u64)>>,
    fallback: Option<GeodesicDistanceModel>,
}

impl RoadNetworkDistanceModel {
    pub fn new(segments: &[RoadSegment]) -> Self {
        let mut nodes: HashMap<String, usize> = HashMap::new();
        let mut edges: Vec<Vec<(usize, u64)>> = Vec::new();

        let mut node_of = |name: &str, edges: &mut Vec<Vec<(usize, u64)>>| -> usize {
            let key = location_key(name);
            *nodes.entry(key).or_insert_with(|| {
                edges.push(Vec::new());
                edges.len() - 1
            })
        };

        for segment in segments {
            if let Err(err) = segment.validate() {
                warn!("ignoring road segment: {err}");
                continue;
            }
            let a = node_of(&segment.from, &mut edges);
            let b = node_of(&segment.to, &mut edges);
            let metres = (segment.distance_km * 1000.0).round() as u64;
            edges[a].push((b, metres));
            edges[b].push((a, metres));
        }

        Self {
            nodes,
            edges,
            fallback: None,
        }
    }

    /// Use straight-line distances for pairs the network does not connect.
    pub fn with_fallback(mut self, fallback: GeodesicDistanceModel) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn shortest_path_km(&self, from: &str, to: &str) -> Option<f64> {
        let start = *self.nodes.get(&location_key(from))?;
        let goal = *self.nodes.get(&location_key(to))?;
        let (_, metres) = dijkstra(
            &start,
            |&node| self.edges[node].iter().copied(),
            |&node| node == goal,
        )?;
        Some(metres as f64 / 1000.0)
    }
}

impl DistanceModel for RoadNetworkDistanceModel {
    fn distance_km(&self, from: &str, to: &str) -> Option<f64> {
        self.shortest_path_km(from, to).or_else(|| {
            self.fallback
                .as_ref()
                .and_then(|fallback| fallback.distance_km(from, to))
        })
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

/// LRU-cached wrapper around any [`DistanceModel`].
///
/// Cache key is the normalized `(from, to)` pair (directional). Unresolved
/// pairs are cached too, so repeated misses do not re-run the inner model.
pub struct CachedDistanceModel {
    inner: Box<dyn DistanceModel>,
    cache: Mutex<LruCache<(String, String), Option<f64>>>,
}

impl CachedDistanceModel {
    pub fn new(inner: Box<dyn DistanceModel>, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }
}

impl DistanceModel for CachedDistanceModel {
    fn distance_km(&self, from: &str, to: &str) -> Option<f64> {
        let key = (location_key(from), location_key(to));

        // Fast path: cache hit
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&key) {
                return *cached;
            }
        }

        let result = self.inner.distance_km(from, to);

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, result);
        }

        result
    }
}

// ---------------------------------------------------------------------------
// Factory: build a model from DistanceModelKind
// ---------------------------------------------------------------------------

/// Construct the shared distance model described by `config`.
///
/// A zero `distance_cache_capacity` returns the model without a cache.
pub fn build_distance_model(
    config: &EngineConfig,
    table: LocationTable,
    roads: &[RoadSegment],
) -> Arc<dyn DistanceModel> {
    let geodesic = GeodesicDistanceModel::new(table, config.circuity_factor);
    let model: Box<dyn DistanceModel> = match config.distance_model {
        DistanceModelKind::Geodesic => Box::new(geodesic),
        DistanceModelKind::RoadNetwork => {
            if roads.is_empty() {
                warn!("road network model selected without road segments; using geodesic distances");
            }
            Box::new(RoadNetworkDistanceModel::new(roads).with_fallback(geodesic))
        }
    };

    if config.distance_cache_capacity == 0 {
        Arc::from(model)
    } else {
        Arc::new(CachedDistanceModel::new(
            model,
            config.distance_cache_capacity,
        ))
    }
}
