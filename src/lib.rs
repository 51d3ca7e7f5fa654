//! Referral commission trees.
//!
//! Builds a forest of members from flat records (members plus parent/child
//! edges) and computes kickback commissions: each member earns their direct
//! commission plus a kickback share of the total commission generated by
//! their downline, recursively.
//!
//! Layers:
//! - [`domain`]: entities, arena trees, forest builder, aggregation
//! - [`application`]: record loading and presentation-facing queries
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{load_file, load_str, member_details, total_commission};
pub use domain::{Edge, ForestBuilder, Member, MemberTree, DEFAULT_KICKBACK_RATE};
