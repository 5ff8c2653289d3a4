//! Command-line interface and orchestration for es2graphite
//!
//! ## Commands
//!
//! - **poll**: Poll a cluster on a fixed interval and send its metrics to Graphite, or
//!   print a single cycle with `--dry-run`
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! Settings come from a TOML file (`es2graphite.toml` unless `--config` names one),
//! and `poll` flags override individual keys. The `common` module sets up logging.

mod common;
mod config;
mod host;
mod init;
mod log_file;
mod poll;
mod run;
mod validate;

pub use common::{LogLevel, init_logging};
pub use config::Config;
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use poll::{PollArgs, poll, resolve_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
