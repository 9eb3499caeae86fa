use super::{
    ResultStore,
    ScanSource,
    WellSource,
};
use crate::errors::{
    ExportError,
    Result,
};
use crate::models::{
    StandardIonResult,
    Well,
    WellId,
};
use crate::traces::TracePoint;
use serde::{
    Deserialize,
    Serialize,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One raw extraction series for a (well, ion) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSeries {
    pub well_id: WellId,
    pub ion: String,
    pub points: Vec<TracePoint>,
}

/// JSON bundle of everything the exporter reads: wells, standard-ion
/// results, and the raw extraction series behind them. Stands in for the
/// database layer, which is outside this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisArchive {
    pub wells: Vec<Well>,
    pub results: Vec<StandardIonResult>,
    pub scans: Vec<ScanSeries>,
}

impl AnalysisArchive {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ExportError::Io {
            source: e,
            path: Some(path.to_path_buf()),
        })?;
        let reader = BufReader::new(file);
        let out = serde_json::from_reader(reader)?;
        Ok(out)
    }

    /// Distinct chemical names in first-appearance order.
    pub fn chemicals(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for result in &self.results {
            if !out.iter().any(|c| c == &result.chemical) {
                out.push(result.chemical.clone());
            }
        }
        out
    }
}

impl ResultStore for AnalysisArchive {
    fn results_for_chemical(&self, chemical: &str) -> Vec<StandardIonResult> {
        self.results
            .iter()
            .filter(|r| r.chemical == chemical)
            .cloned()
            .collect()
    }
}

impl WellSource for AnalysisArchive {
    fn well(&self, id: WellId) -> Option<&Well> {
        self.wells.iter().find(|w| w.id == id)
    }
}

impl ScanSource for AnalysisArchive {
    fn time_series(&self, well: WellId, ion: &str) -> Vec<TracePoint> {
        self.scans
            .iter()
            .find(|s| s.well_id == well && s.ion == ion)
            .map(|s| s.points.clone())
            .unwrap_or_default()
    }
}
