//! Data models for the lending library

pub mod enums;
pub mod member;
pub mod resource;
pub mod stats;

// Re-export commonly used types
pub use enums::{MembershipTier, ResourceKind};
pub use member::{Member, UserId};
pub use resource::{Media, Resource, ResourceDetails, ResourceId, ResourceQuery};
pub use stats::LibraryStats;
