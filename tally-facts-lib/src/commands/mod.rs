//! Command-line interface for tally-facts
//!
//! The `run` function parses command-line arguments using clap and routes to one of:
//!
//! - **normalize**: Load the configuration and product registry, then normalize every host in
//!   a JSON facts file and print the normalized facts as JSON
//! - **init**: Generate a default configuration file
//! - **validate**: Check that the configuration file and the product registry it names load
//!
//! All output goes through [`Host`] so that commands can be exercised without a real process.

mod common;
mod host;
mod init;
mod normalize;
mod run;
mod validate;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use normalize::{NormalizeArgs, normalize_hosts};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
