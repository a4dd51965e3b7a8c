//! Named places and great-circle distances.
//!
//! This module provides:
//!
//! - **GeoPoint**: latitude/longitude in degrees
//! - **LocationTable**: place name → coordinate lookup (case-insensitive)
//! - **haversine_km**: great-circle distance between two points
//!
//! Locations are identified by the same free-text names used on disaster and
//! resource records, so lookups trim and ignore case.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// A named place as it appears in scenario files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Place name → coordinate lookup.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    points: HashMap<String, GeoPoint>,
}

pub(crate) fn location_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_locations<'a>(locations: impl IntoIterator<Item = &'a NamedLocation>) -> Self {
        let mut table = Self::new();
        for location in locations {
            table.insert(&location.name, GeoPoint::new(location.lat, location.lng));
        }
        table
    }

    /// Insert or replace a place.
    pub fn insert(&mut self, name: &str, point: GeoPoint) {
        self.points.insert(location_key(name), point);
    }

    pub fn get(&self, name: &str) -> Option<GeoPoint> {
        self.points.get(&location_key(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.points.contains_key(&location_key(name))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Straight-line distance between two named places, if both are known.
    pub fn straight_line_km(&self, from: &str, to: &str) -> Option<f64> {
        Some(haversine_km(self.get(from)?, self.get(to)?))
    }
}
