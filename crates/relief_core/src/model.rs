//! Domain records read by the engine: disasters and inventoried resources.
//!
//! Both record kinds are owned by an external store. The engine only reads
//! snapshots of them and never mutates quantities.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisasterId(pub u64);

impl fmt::Display for DisasterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a reported emergency. Unrecognized names parse as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisasterType {
    Flood,
    Earthquake,
    Cyclone,
    Fire,
    Landslide,
    Other,
}

impl DisasterType {
    pub const ALL: [DisasterType; 6] = [
        DisasterType::Flood,
        DisasterType::Earthquake,
        DisasterType::Cyclone,
        DisasterType::Fire,
        DisasterType::Landslide,
        DisasterType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisasterType::Flood => "Flood",
            DisasterType::Earthquake => "Earthquake",
            DisasterType::Cyclone => "Cyclone",
            DisasterType::Fire => "Fire",
            DisasterType::Landslide => "Landslide",
            DisasterType::Other => "Other",
        }
    }
}

impl From<&str> for DisasterType {
    fn from(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(DisasterType::Other)
    }
}

impl From<String> for DisasterType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<DisasterType> for String {
    fn from(value: DisasterType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DisasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of an inventoried relief resource. Unrecognized names parse as `Other`.
///
/// The declaration order is the order in which requirement vectors, allocations
/// and coverage summaries are iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    Medical,
    Water,
    Shelter,
    Food,
    Transport,
    Equipment,
    Other,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Medical,
        ResourceType::Water,
        ResourceType::Shelter,
        ResourceType::Food,
        ResourceType::Transport,
        ResourceType::Equipment,
        ResourceType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Medical => "Medical",
            ResourceType::Water => "Water",
            ResourceType::Shelter => "Shelter",
            ResourceType::Food => "Food",
            ResourceType::Transport => "Transport",
            ResourceType::Equipment => "Equipment",
            ResourceType::Other => "Other",
        }
    }
}

impl From<&str> for ResourceType {
    fn from(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(ResourceType::Other)
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ResourceType> for String {
    fn from(value: ResourceType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterStatus {
    #[default]
    Active,
    Resolved,
}

/// A reported emergency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disaster {
    pub id: DisasterId,
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    /// Place name; used for display and as a key into the location table.
    pub location: String,
    /// 0-100. Larger values are clamped when scaling requirements.
    pub severity: u8,
    #[serde(default)]
    pub status: DisasterStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub reported_at: DateTime<Utc>,
}

impl Disaster {
    pub fn new(
        id: u64,
        disaster_type: DisasterType,
        location: impl Into<String>,
        severity: u8,
    ) -> Self {
        Self {
            id: DisasterId(id),
            disaster_type,
            location: location.into(),
            severity,
            status: DisasterStatus::Active,
            description: None,
            reported_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: DisasterStatus) -> Self {
        self.status = status;
        self
    }

    /// Severity as a factor in [0, 1].
    pub fn severity_factor(&self) -> f64 {
        f64::from(self.clamped_severity()) / 100.0
    }

    pub fn clamped_severity(&self) -> u8 {
        self.severity.min(100)
    }

    pub fn is_active(&self) -> bool {
        self.status == DisasterStatus::Active
    }
}

/// Units of one relief resource held at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUnit {
    pub id: ResourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub quantity: u32,
    pub location: String,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl ResourceUnit {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        resource_type: ResourceType,
        quantity: u32,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: ResourceId(id),
            name: name.into(),
            resource_type,
            quantity,
            location: location.into(),
            last_updated: Utc::now(),
        }
    }
}
