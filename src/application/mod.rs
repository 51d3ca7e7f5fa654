//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and owns the data-access boundary.

pub mod error;
pub mod loader;
pub mod report;

pub use error::{ApplicationError, ApplicationResult};
pub use loader::{load_file, load_str};
pub use report::{member_details, total_commission, ChildRow, MemberDetails, ToTermTree};
