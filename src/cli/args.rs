//! Command-line argument parsing.

/// Options that shape a normal interactive run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Endpoint to pre-fill instead of the saved one
    pub url: Option<String>,
    /// Log filter directive, e.g. `debug` or `parley=trace`
    pub log_level: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Malformed arguments; carries the message to print
    Invalid(String),
    /// Run the chat client (default)
    Run(RunOptions),
}

/// Parse command-line arguments, skipping the program name.
///
/// ```
/// use parley::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["parley".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" | "-u" => match args.next() {
                Some(url) => options.url = Some(url),
                None => return CliCommand::Invalid(format!("{} requires a value", arg)),
            },
            "--log-level" => match args.next() {
                Some(level) => options.log_level = Some(level),
                None => return CliCommand::Invalid(format!("{} requires a value", arg)),
            },
            other => {
                if let Some(url) = other.strip_prefix("--url=") {
                    options.url = Some(url.to_string());
                } else if let Some(level) = other.strip_prefix("--log-level=") {
                    options.log_level = Some(level.to_string());
                } else {
                    return CliCommand::Invalid(format!("unknown argument: {}", other));
                }
            }
        }
    }
    CliCommand::Run(options)
}
