use std::io::IsTerminal;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use miette::{IntoDiagnostic, Result};
use tracing_log::AsTrace;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: s4::commands::Commands,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Format of log output
    #[arg(long, global = true, value_enum, default_value_t)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    better_panic::install();

    let cli = Cli::parse();

    let output = match cli.log_format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .without_time()
            .compact()
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(
            EnvFilter::builder()
                .with_default_directive(cli.verbose.log_level_filter().as_trace().into())
                .from_env_lossy(),
        )
        .try_init()
        .into_diagnostic()?;

    cli.command.handle()
}
