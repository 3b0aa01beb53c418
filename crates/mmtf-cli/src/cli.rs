use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "MMTF-RS Contributors",
    version,
    about = "mmtf - inspect, convert and export macromolecular structures in the MMTF binary format.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to decode files in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode one or more structure files and print a summary of each.
    Inspect(InspectArgs),
    /// Decode a structure file and re-encode it with a chosen column encoding.
    Convert(ConvertArgs),
    /// Export every atom of a structure file as CSV.
    Atoms(AtomsArgs),
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Structure files to decode (.mmtf or .mmtf.gz).
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an encoding configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Compress the output with gzip, overriding the config file.
    #[arg(long)]
    pub gzip: bool,

    /// Override the encoding of one column. Can be used multiple times.
    /// Example: -S x-coord=10:100
    #[arg(short = 'S', long = "set", value_name = "COLUMN=STRATEGY[:PARAMETER]", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `atoms` subcommand.
#[derive(Args, Debug)]
pub struct AtomsArgs {
    /// Path to the input structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the CSV output.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}
