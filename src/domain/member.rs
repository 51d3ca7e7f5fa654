//! Domain entities: core data structures

use std::fmt;
use std::hash::{Hash, Hasher};

/// Kickback rate applied when a record does not specify one.
pub const DEFAULT_KICKBACK_RATE: f64 = 0.2;

/// One node in the referral hierarchy: an individual with a direct
/// commission and a kickback share of their descendants' earnings.
///
/// Ranges are caller-trusted: a negative `direct_commission` or a
/// `kickback_rate` outside [0, 1] is accepted and propagates
/// arithmetically through aggregation.
#[derive(Debug, Clone)]
pub struct Member {
    /// Opaque unique identifier (unique across the member set)
    pub id: String,
    /// Display label
    pub name: String,
    /// Commission earned directly, independent of descendants
    pub direct_commission: f64,
    /// Fraction of total descendant commission credited upward
    pub kickback_rate: f64,
}

impl Member {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        direct_commission: f64,
        kickback_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            direct_commission,
            kickback_rate,
        }
    }

    /// Construct with the default kickback rate.
    pub fn with_default_rate(
        id: impl Into<String>,
        name: impl Into<String>,
        direct_commission: f64,
    ) -> Self {
        Self::new(id, name, direct_commission, DEFAULT_KICKBACK_RATE)
    }
}

// Identity is the id alone; name and commission fields never re-key a member.
impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Raw parent/child edge row as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub parent: String,
    pub child: String,
}

impl Edge {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}
