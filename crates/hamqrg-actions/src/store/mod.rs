//! The black-box store behind the dashboard.

mod memory;
mod traits;

pub use memory::InMemoryStore;
pub use traits::{DashboardStore, RepeaterUpdate, ReportStatus};
