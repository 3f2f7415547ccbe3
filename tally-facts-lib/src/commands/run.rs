//! Command dispatch logic for tally-facts

use super::{InitArgs, NormalizeArgs, ValidateArgs, init_config, normalize_hosts, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "tally-facts", bin_name = "tally-facts", author, version, long_about = None)]
#[command(about = "Normalize host inventory facts and resolve their product tags")]
#[command(styles = CLAP_STYLES)]
struct Args {
    #[command(subcommand)]
    command: TallySubcommand,
}

#[derive(Subcommand, Debug)]
enum TallySubcommand {
    /// Normalize host facts read from a JSON file
    Normalize(Box<NormalizeArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file and its product registry
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let args = Args::parse_from(args);

    match &args.command {
        TallySubcommand::Normalize(normalize_args) => normalize_hosts(host, normalize_args),
        TallySubcommand::Init(init_args) => init_config(host, init_args),
        TallySubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
