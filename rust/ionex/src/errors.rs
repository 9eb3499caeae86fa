use crate::models::WellId;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ExportError {
    /// No replicate for the chemical carries a measurement for any ion, so
    /// there is nothing to score. The chemical is skipped, not the batch.
    NoUsableSignal {
        chemical: String,
    },
    /// The store returned zero replicates for the requested chemical name.
    EmptyInput {
        chemical: String,
    },
    /// A well id referenced by a replicate does not resolve. This is a
    /// data-integrity problem and is never retried.
    MissingReplicateWell {
        well_id: WellId,
        chemical: String,
    },
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },
    ParseError {
        msg: String,
    },
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::NoUsableSignal { chemical } => {
                write!(f, "No usable ion signal in any replicate of {}", chemical)
            }
            ExportError::EmptyInput { chemical } => {
                write!(f, "No standard ion results found for {}", chemical)
            }
            ExportError::MissingReplicateWell { well_id, chemical } => {
                write!(
                    f,
                    "Well {} referenced by a replicate of {} does not resolve",
                    well_id, chemical
                )
            }
            ExportError::Io { source, path } => {
                if let Some(path) = path {
                    write!(f, "Io error on {}: {}", path.display(), source)
                } else {
                    write!(f, "Io error: {}", source)
                }
            }
            ExportError::ParseError { msg } => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

pub type Result<T> = std::result::Result<T, ExportError>;

impl From<std::io::Error> for ExportError {
    fn from(x: std::io::Error) -> Self {
        Self::Io {
            source: x,
            path: None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(x: serde_json::Error) -> Self {
        Self::ParseError { msg: x.to_string() }
    }
}

impl From<csv::Error> for ExportError {
    fn from(x: csv::Error) -> Self {
        Self::ParseError { msg: x.to_string() }
    }
}
