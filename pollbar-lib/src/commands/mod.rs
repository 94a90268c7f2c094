//! Command-line interface and orchestration for pollbar
//!
//! # Commands
//!
//! - **watch**: Poll a progress endpoint, draw a progress bar on stderr, and
//!   print a success line once the task reports completion
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file for syntax and value errors
//!
//! The `run` function parses command-line arguments using clap and routes to
//! the appropriate handler. All output goes through a [`Host`] so commands can
//! be exercised in tests without touching the real process streams.
//!
//! Configuration lives in a TOML file (`pollbar.toml` by default); `watch`
//! flags override individual settings from it.

mod common;
mod config;
mod host;
mod init;
mod run;
mod terminal_display;
mod validate;
mod watch;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use terminal_display::TerminalDisplay;
pub use validate::{ValidateArgs, validate_config};
pub use watch::{WatchArgs, watch};
