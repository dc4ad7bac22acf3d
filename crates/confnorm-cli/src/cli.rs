use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use confnorm_store::Format;

#[derive(Parser)]
#[command(
    name = "confnorm",
    about = "Flatten cache-manager configuration into sorted key/value files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Flatten a configuration document into a properties file
    Normalize(NormalizeArgs),
    /// Show key-level changes between two configuration documents
    Diff(DiffArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Xml,
    Standard,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xml => Format::Xml,
            OutputFormat::Standard => Format::Standard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Section {
    All,
    Cache,
    Global,
    Jgroups,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,
    /// Which part of the configuration to flatten
    #[arg(short = 't', long = "type", value_enum, default_value_t = Section::All)]
    pub section: Section,
    /// Cache to flatten; implies `--type cache`
    #[arg(short, long)]
    pub cache: Option<String>,
    /// Key prefix for single-section output; ignored for `--type all`
    #[arg(short, long, default_value = "")]
    pub prefix: String,
    #[arg(long)]
    pub max_depth: Option<usize>,
    #[arg(long)]
    pub no_cycle_check: bool,
    /// TOML or JSON configuration document
    pub config: PathBuf,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
}
