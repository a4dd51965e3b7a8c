pub mod affinity;
pub mod matcher;
pub mod scoring;
pub mod types;

pub use affinity::type_affinity;
pub use matcher::ResourceMatcher;
pub use scoring::{proximity_score, PriorityScore};
pub use types::{AllocationSource, Allocations, RankedCandidate, TypeAllocation};
