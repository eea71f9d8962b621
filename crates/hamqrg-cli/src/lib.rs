//! Operator CLI for HamQRG dashboard access control.
//!
//! Inspect the permission policy, see what role a session token resolves
//! to, check permissions and page access, and manage the CLI's own
//! configuration.

pub mod access_handlers;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::{HamqrgCli, Outcome};
pub use cli::CliArgs;
pub use config::HamqrgConfig;
