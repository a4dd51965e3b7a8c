//! Disaster/resource type affinity matrix.
//!
//! How well a resource category suits a disaster category, in [0, 1]. Every
//! disaster type resolves to an explicit row; pairs a row does not list score
//! [`UNLISTED_AFFINITY`].

use crate::model::{DisasterType, ResourceType};

pub const UNLISTED_AFFINITY: f64 = 0.5;

pub fn type_affinity(disaster_type: DisasterType, resource_type: ResourceType) -> f64 {
    use ResourceType::*;
    let row: &[(ResourceType, f64)] = match disaster_type {
        DisasterType::Flood => &[
            (Medical, 0.9),
            (Water, 0.8),
            (Shelter, 0.7),
            (Food, 0.6),
            (Transport, 0.5),
        ],
        DisasterType::Earthquake => &[
            (Medical, 1.0),
            (Shelter, 0.9),
            (Transport, 0.8),
            (Food, 0.7),
            (Water, 0.6),
        ],
        DisasterType::Cyclone => &[
            (Shelter, 0.9),
            (Food, 0.8),
            (Medical, 0.7),
            (Water, 0.6),
            (Transport, 0.5),
        ],
        DisasterType::Fire => &[
            (Medical, 0.8),
            (Shelter, 0.7),
            (Water, 0.9),
            (Food, 0.6),
            (Transport, 0.7),
        ],
        // default row
        DisasterType::Landslide | DisasterType::Other => &[
            (Medical, 0.7),
            (Shelter, 0.6),
            (Food, 0.5),
            (Water, 0.5),
            (Transport, 0.5),
        ],
    };
    row.iter()
        .find(|(kind, _)| *kind == resource_type)
        .map_or(UNLISTED_AFFINITY, |(_, affinity)| *affinity)
}
