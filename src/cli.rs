use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rcfgen")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Apply compliance deviations to Helix QAC rule configuration files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the deviated RCF (default when no subcommand is given)
    Generate(GenerateArgs),

    /// Validate the RCF and deviation table without emitting output
    Check(CheckArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Default)]
pub struct GenerateArgs {
    /// RCF file to deviate (defaults to the Helix QAC install location)
    #[arg(short, long)]
    pub rcf: Option<String>,

    /// Deviation table (defaults to rule_configuration_deviation.csv
    /// next to the executable)
    #[arg(short, long)]
    pub deviations: Option<String>,

    /// Write the result to a file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// RCF file to deviate (defaults to the Helix QAC install location)
    #[arg(short, long)]
    pub rcf: Option<String>,

    /// Deviation table (defaults to rule_configuration_deviation.csv
    /// next to the executable)
    #[arg(short, long)]
    pub deviations: Option<String>,
}
