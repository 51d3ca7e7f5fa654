//! Record loading: parses member and edge records from a TOML document.
//!
//! This is the data-access boundary: a TOML snapshot of the member and
//! edge tables, loaded once per process:
//!
//! ```toml
//! [[member]]
//! id = "1a2b3c"
//! name = "Alice"
//! direct_commission = 100.0
//! kickback_rate = 0.2      # optional, defaults to 0.2
//!
//! [[edge]]
//! parent = "1a2b3c"
//! child = "2b3c4d"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::instrument;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{Edge, Member, DEFAULT_KICKBACK_RATE};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default, rename = "member")]
    members: Vec<MemberRecord>,
    #[serde(default, rename = "edge")]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    id: String,
    name: String,
    direct_commission: f64,
    #[serde(default = "default_rate")]
    kickback_rate: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    parent: String,
    child: String,
}

fn default_rate() -> f64 {
    DEFAULT_KICKBACK_RATE
}

/// Parse member and edge records from TOML content.
///
/// `origin` is only used for error messages.
#[instrument(level = "debug", skip(content))]
pub fn load_str(content: &str, origin: &Path) -> ApplicationResult<(Vec<Member>, Vec<Edge>)> {
    let document: Document = toml::from_str(content).map_err(|e| ApplicationError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let members = document
        .members
        .into_iter()
        .map(|r| Member::new(r.id, r.name, r.direct_commission, r.kickback_rate))
        .collect();
    let edges = document
        .edges
        .into_iter()
        .map(|r| Edge::new(r.parent, r.child))
        .collect();

    Ok((members, edges))
}

/// Read and parse a member data file.
#[instrument(level = "debug")]
pub fn load_file(path: &Path) -> ApplicationResult<(Vec<Member>, Vec<Edge>)> {
    let content = fs::read_to_string(path).map_err(|e| ApplicationError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_str(&content, path)
}
