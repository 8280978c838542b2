//! Shared domain enums

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ---------------------------------------------------------------------------
// MembershipTier
// ---------------------------------------------------------------------------

/// Membership tier, fixed when the member is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    Regular,
    Premium,
}

impl MembershipTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Regular => "regular",
            MembershipTier::Premium => "premium",
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MembershipTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" => Ok(MembershipTier::Regular),
            "premium" => Ok(MembershipTier::Premium),
            _ => Err(format!("Invalid membership tier: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// Kind tag of a catalog resource, as written in the `kind` field of JSON records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Book,
    Dvd,
    Cd,
    Magazine,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Book,
        ResourceKind::Dvd,
        ResourceKind::Cd,
        ResourceKind::Magazine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Book => "book",
            ResourceKind::Dvd => "dvd",
            ResourceKind::Cd => "cd",
            ResourceKind::Magazine => "magazine",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(ResourceKind::Book),
            "dvd" => Ok(ResourceKind::Dvd),
            "cd" => Ok(ResourceKind::Cd),
            "magazine" => Ok(ResourceKind::Magazine),
            _ => Err(AppError::UnsupportedType(s.to_string())),
        }
    }
}
