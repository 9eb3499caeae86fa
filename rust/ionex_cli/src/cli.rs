use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the analysis archive (will over-write the config file)
    #[arg(short, long)]
    pub input_file: Option<PathBuf>,

    /// Comma separated list of chemicals to export (will over-write the
    /// config file)
    #[arg(long, value_delimiter = ',')]
    pub chemicals: Option<Vec<String>>,

    /// Prefix of the output TSV file (will over-write the config file)
    #[arg(short, long)]
    pub output_prefix: Option<String>,

    /// Directory where the diagnostic plot artifacts are written
    #[arg(short, long)]
    pub plotting_dir: Option<PathBuf>,
}
