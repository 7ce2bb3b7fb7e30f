//! CLI command definitions and handlers.

pub mod run;

use clap::Parser;

/// Snap Triage - capture one still frame, score it, retain or discard it
#[derive(Parser)]
#[command(name = "snap-triage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run arguments (capture, model, triage settings).
    #[command(flatten)]
    pub run: run::RunArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The run reached `Done`.
    Success,
    /// The run failed at some stage.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::Error => Self::from(1),
        }
    }
}
