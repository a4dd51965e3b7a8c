//! Error types for the relief engine.
//!
//! Only [`ReliefError::DisasterNotFound`] crosses the planning boundary as a
//! failure. Empty inventory and zero requirements are normal, degraded results
//! and are reported through coverage, never through this enum.

use thiserror::Error;

use crate::model::{DisasterId, ResourceId};

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ReliefError>;

#[derive(Error, Debug)]
pub enum ReliefError {
    /// The referenced disaster does not exist in the store. Not retryable
    /// until the record exists.
    #[error("disaster {0} not found")]
    DisasterNotFound(DisasterId),

    /// The external record store failed.
    #[error("store error: {0}")]
    Store(String),

    /// A commit asked for more stock than the resource currently holds.
    #[error("insufficient stock for resource {resource_id}: requested {requested}, available {available}")]
    InsufficientStock {
        resource_id: ResourceId,
        requested: u32,
        available: u32,
    },

    /// A commit referenced a resource the store does not hold.
    #[error("resource {0} not found")]
    UnknownResource(ResourceId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReliefError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the caller may retry the same call unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::InsufficientStock { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_terminal() {
        let err = ReliefError::DisasterNotFound(DisasterId(7));
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "disaster 7 not found");
    }

    #[test]
    fn insufficient_stock_message_names_resource() {
        let err = ReliefError::InsufficientStock {
            resource_id: ResourceId(3),
            requested: 40,
            available: 10,
        };
        assert!(err.is_retryable());
        assert!(err.to_string().contains("resource 3"));
    }
}
