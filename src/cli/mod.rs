//! Command-line interface.
//!
//! Parsing happens before the terminal is touched so `--version`, `--help`
//! and argument errors print to a normal screen:
//!
//! ```ignore
//! use parley::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&command) {
//!     std::process::exit(if result.is_ok() { 0 } else { 2 });
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions};
pub use version::{handle_version_command, version_string, VERSION};

use color_eyre::{eyre::eyre, Result};

pub const USAGE: &str = "\
Usage: parley [OPTIONS]

Terminal chat client for WebSocket chat rooms.

Options:
  -u, --url <URL>          Endpoint to pre-fill (ws:// or wss://)
      --log-level <LEVEL>  Log filter, e.g. info, debug, parley=trace
  -V, --version            Print version
  -h, --help               Print this help

Environment:
  PARLEY_HOME  Data directory (default: ~/.parley)
  PARLEY_LOG   Log filter when --log-level is not given
";

/// Run a non-interactive command.
///
/// Returns `None` for [`CliCommand::Run`]; the caller starts the TUI.
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            print!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            Some(Err(eyre!("{}", message)))
        }
        CliCommand::Run(_) => None,
    }
}
