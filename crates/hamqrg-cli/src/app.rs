//! HamqrgCli application.
//!
//! Wires configuration, logging and the access-control handlers together.

use crate::access_handlers;
use crate::cli::{CliArgs, Command};
use crate::config::HamqrgConfig;
use crate::config_handlers;
use hamqrg_acl::AccessControl;
use hamqrg_core::Result;
use tracing_subscriber::EnvFilter;

// ============================================================================
// HamqrgCli
// ============================================================================

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran and, for checks, the permission was granted.
    Success,
    /// A permission check was refused.
    Denied,
}

/// The CLI application.
pub struct HamqrgCli {
    name: String,
    config: HamqrgConfig,
    access: AccessControl,
    version: String,
}

impl HamqrgCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = HamqrgConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application over the authoritative policy.
    pub fn new(name: impl Into<String>, config: HamqrgConfig) -> Self {
        Self {
            name: name.into(),
            config,
            access: AccessControl::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the access control (e.g. to run against a modified policy).
    pub fn with_access(mut self, access: AccessControl) -> Self {
        self.access = access;
        self
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config(&self) -> &HamqrgConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Library crates log through `log`; the subscriber picks those records up.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub fn run(&self, args: CliArgs) -> Result<Outcome> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Policy) => {
                print!("{}", access_handlers::render_policy(self.access.policy()));
            }
            Some(Command::Whoami { token }) => {
                print!(
                    "{}",
                    access_handlers::render_whoami(&self.access, token.as_deref())
                );
            }
            Some(Command::Check { permission, token }) => {
                let (granted, line) = access_handlers::check_permission(
                    &self.access,
                    self.config.actions.locale,
                    permission,
                    token.as_deref(),
                );
                println!("{line}");
                if !granted {
                    return Ok(Outcome::Denied);
                }
            }
            Some(Command::Pages { token, path }) => {
                let out = access_handlers::render_pages(
                    &self.access,
                    &self.config.access.landing_route,
                    token.as_deref(),
                    path.as_deref(),
                )?;
                print!("{out}");
            }
            Some(Command::Version) => println!("{} {}", self.name, self.version),
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)?
            }
            None => println!("{} {} (use --help for usage)", self.name, self.version),
        }
        Ok(Outcome::Success)
    }
}

// ============================================================================
// Tests
// ============================================================================
