#[derive(Debug)]
pub enum CliError {
    Config {
        source: String,
    },
    ParseError {
        msg: String,
    },
    Io {
        source: String,
        path: Option<String>,
    },
    Export {
        source: String,
    },
    /// Every chemical in the batch failed; nothing was exported.
    AllChemicalsFailed {
        attempted: usize,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config { source } => write!(f, "Error interpreting the config: {}", source),
            CliError::ParseError { msg } => write!(f, "Error parsing config: {}", msg),
            CliError::Io { source, path } => {
                if let Some(path) = path {
                    write!(f, "Error reading file {}: {}", path, source)
                } else {
                    write!(f, "Error reading file: {}", source)
                }
            }
            CliError::Export { source } => write!(f, "Error exporting results: {}", source),
            CliError::AllChemicalsFailed { attempted } => {
                write!(f, "All {} chemicals failed to export", attempted)
            }
        }
    }
}

impl From<ionex::errors::ExportError> for CliError {
    fn from(e: ionex::errors::ExportError) -> Self {
        CliError::Export {
            source: e.to_string(),
        }
    }
}
