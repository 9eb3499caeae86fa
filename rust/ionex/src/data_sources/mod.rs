mod archive;

pub use archive::{
    AnalysisArchive,
    ScanSeries,
};

use crate::models::{
    StandardIonResult,
    Well,
    WellId,
};
use crate::traces::TracePoint;

/// Read accessor over the persisted standard-ion results, in persisted order.
pub trait ResultStore {
    fn results_for_chemical(&self, chemical: &str) -> Vec<StandardIonResult>;
}

/// Resolves a well reference to its full record.
pub trait WellSource {
    fn well(&self, id: WellId) -> Option<&Well>;
}

/// Raw per-well, per-ion extraction series. Opaque, already-computed input;
/// an unknown (well, ion) pair yields an empty series.
pub trait ScanSource {
    fn time_series(&self, well: WellId, ion: &str) -> Vec<TracePoint>;
}
