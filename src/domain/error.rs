//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
///
/// Every variant aborts forest building entirely; there is no
/// partial-success mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate edge: {parent} -> {child}")]
    DuplicateEdge { parent: String, child: String },

    #[error("edge {parent} -> {child} references unknown member id: {unknown}")]
    UnknownId {
        parent: String,
        child: String,
        unknown: String,
    },

    #[error("duplicate member id: {0}")]
    DuplicateMember(String),

    #[error("cycle detected in referral hierarchy at member: {0}")]
    CycleDetected(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
