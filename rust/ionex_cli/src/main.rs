mod cli;
mod config;
mod errors;
mod plot;
mod processing;

use clap::Parser;
use ionex::data_sources::AnalysisArchive;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{
    Config,
    InputConfig,
    OutputConfig,
};

fn main() -> std::result::Result<(), errors::CliError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        ) // This uses RUST_LOG environment variable
        .init();

    // Parse command line arguments
    let args = Cli::parse();

    // Load the configuration, if one was given
    let mut config = match &args.config {
        Some(path) => {
            let file = match std::fs::File::open(path) {
                Ok(x) => x,
                Err(e) => {
                    return Err(errors::CliError::Io {
                        source: e.to_string(),
                        path: Some(path.to_string_lossy().to_string()),
                    });
                }
            };
            let config: Result<Config, _> = serde_json::from_reader(file);
            match config {
                Ok(x) => x,
                Err(e) => {
                    return Err(errors::CliError::ParseError { msg: e.to_string() });
                }
            }
        }
        None => Config::default(),
    };

    // Override config with command line arguments if provided
    if let Some(input_file) = args.input_file {
        config.input = Some(InputConfig::Archive { path: input_file });
    }
    if let Some(chemicals) = args.chemicals {
        config.analysis.chemicals = chemicals;
    }
    if let Some(plotting_dir) = args.plotting_dir {
        let prefix = config.output.as_ref().and_then(|o| o.prefix.clone());
        config.output = Some(OutputConfig {
            plotting_dir,
            prefix,
        });
    }
    if let Some(output_prefix) = args.output_prefix {
        match config.output.as_mut() {
            Some(output) => output.prefix = Some(output_prefix),
            None => {
                return Err(errors::CliError::Config {
                    source: "An output prefix was given but no plotting directory is configured"
                        .to_string(),
                });
            }
        }
    }

    let Some(InputConfig::Archive { path }) = config.input else {
        return Err(errors::CliError::Config {
            source: "No input provided, please provide one in either the config file or with the --input-file flag".to_string(),
        });
    };
    let Some(output) = config.output else {
        return Err(errors::CliError::Config {
            source: "No plotting directory provided, please provide one in either the config file or with the --plotting-dir flag".to_string(),
        });
    };
    info!("Loading analysis archive from {:?}", path);
    let archive = AnalysisArchive::from_file(&path).map_err(|e| errors::CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;

    let chemicals = if config.analysis.chemicals.is_empty() {
        archive.chemicals()
    } else {
        config.analysis.chemicals.clone()
    };
    if chemicals.is_empty() {
        return Err(errors::CliError::Config {
            source: "No chemicals can be found from the input query".to_string(),
        });
    }

    if let Err(e) = std::fs::create_dir_all(&output.plotting_dir) {
        return Err(errors::CliError::Io {
            source: e.to_string(),
            path: Some(output.plotting_dir.to_string_lossy().to_string()),
        });
    }

    let prefix = output
        .prefix
        .clone()
        .unwrap_or_else(|| chemicals.join("-"));
    let report_path = PathBuf::from(format!("{}.tsv", prefix));
    info!("Writing report rows to {:?}", report_path);

    let aggregator = config.analysis.scorer.aggregator();
    let summary = processing::run_batch(
        &archive,
        &chemicals,
        aggregator.as_ref(),
        config.analysis.scaling_ceiling,
        &output.plotting_dir,
        &report_path,
        &plot::ScriptPlotter,
    )?;

    // Partial failures are tolerated; an entirely failed batch is not.
    if summary.exported == 0 {
        return Err(errors::CliError::AllChemicalsFailed {
            attempted: chemicals.len(),
        });
    }
    Ok(())
}
