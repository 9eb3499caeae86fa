use ionex::scoring::{
    BestIonVote,
    IonAggregator,
    MaxSnr,
};
use ionex::traces::DEFAULT_SCALING_CEILING;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum InputConfig {
    #[serde(rename = "archive")]
    Archive { path: PathBuf },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Chemicals to export. When empty, every chemical in the archive.
    pub chemicals: Vec<String>,
    pub scorer: ScorerConfig,
    pub scaling_ceiling: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chemicals: Vec::new(),
            scorer: ScorerConfig::MaxSnr,
            scaling_ceiling: DEFAULT_SCALING_CEILING,
        }
    }
}

/// Which aggregation elects the winning ion. The exact production formula
/// is still under review upstream, so it stays swappable here.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScorerConfig {
    MaxSnr,
    BestIonVote,
}

impl ScorerConfig {
    pub fn aggregator(&self) -> Box<dyn IonAggregator> {
        match self {
            ScorerConfig::MaxSnr => Box::new(MaxSnr),
            ScorerConfig::BestIonVote => Box::new(BestIonVote),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub plotting_dir: PathBuf,
    pub prefix: Option<String>,
}
