//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use hamqrg_acl::Permission;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(author, about = "Inspect HamQRG dashboard access control", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "HAMQRG_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the role → permission table.
    Policy,

    /// Show the role a session token resolves to.
    Whoami {
        /// Session access token. Omit to resolve an anonymous caller.
        #[arg(short, long, env = "HAMQRG_TOKEN")]
        token: Option<String>,
    },

    /// Check whether a session token grants a permission.
    Check {
        /// Permission tag, e.g. `reports.manage`.
        permission: Permission,

        /// Session access token. Omit to check an anonymous caller.
        #[arg(short, long, env = "HAMQRG_TOKEN")]
        token: Option<String>,
    },

    /// Show which pages and sidebar sections a session token can see.
    Pages {
        /// Session access token. Omit to check an anonymous caller.
        #[arg(short, long, env = "HAMQRG_TOKEN")]
        token: Option<String>,

        /// Only check the page served at this path.
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "access.landing_route").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
