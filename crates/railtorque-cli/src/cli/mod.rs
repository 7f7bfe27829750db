mod commands;
mod helpers;

use clap::Parser;
use railtorque_core::domain::AlignError;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_align_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            eprintln!("{}", diagnostic.fatal_exit_line());
            diagnostic.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("railtorque".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_tracing(&cli.log_level);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "railtorque",
    version,
    about = "Rail alignment offset extraction and clamp torque suggestions"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Analyze an ASC export and print the torque table
    Analyze(commands::AnalyzeArgs),
    /// Write the HTML result page for an ASC export
    Report(commands::ReportArgs),
    /// Show which lines each position rule selects
    Inspect(commands::InspectArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Analyze(args) => commands::run_analyze_command(args),
        CliCommand::Report(args) => commands::run_report_command(args),
        CliCommand::Inspect(args) => commands::run_inspect_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(AlignError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_align_error(&self) -> AlignError {
        match self {
            Self::Usage(message) => {
                AlignError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => AlignError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

impl From<AlignError> for CliError {
    fn from(error: AlignError) -> Self {
        Self::Compute(error)
    }
}
