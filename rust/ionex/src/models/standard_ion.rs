use super::WellId;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::BTreeMap;

/// Extraction result for one ion on one well. Absent entirely when no peak
/// was detected for that ion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IonMeasurement {
    pub intensity: f64,
    pub time: f64,
    pub snr: f64,
}

/// One evaluated replicate of a chemical's positive control well.
///
/// `measurements` maps ion names to the extraction result for that ion,
/// `None` when no peak was found. `best_ion` is the per-replicate winner
/// elected by the lower-level scorer and is always a key of `measurements`.
/// A `BTreeMap` keeps every walk over the candidate ions deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardIonResult {
    pub id: i32,
    pub chemical: String,
    pub positive_well: WellId,
    pub negative_wells: Vec<WellId>,
    pub measurements: BTreeMap<String, Option<IonMeasurement>>,
    pub best_ion: String,
}

impl StandardIonResult {
    pub fn measurement(&self, ion: &str) -> Option<&IonMeasurement> {
        self.measurements.get(ion).and_then(|m| m.as_ref())
    }

    /// Whether any ion on this replicate produced a detectable peak.
    pub fn has_any_measurement(&self) -> bool {
        self.measurements.values().any(|m| m.is_some())
    }
}

/// All replicates for one chemical name, in persisted order. The unit of
/// work for one report row.
#[derive(Debug, Clone)]
pub struct ChemicalResultSet {
    pub chemical: String,
    pub replicates: Vec<StandardIonResult>,
}

impl ChemicalResultSet {
    pub fn new(chemical: impl Into<String>, replicates: Vec<StandardIonResult>) -> Self {
        Self {
            chemical: chemical.into(),
            replicates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.replicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.replicates.len()
    }

    /// The per-replicate best ions, in replicate order.
    pub fn replicate_best_ions(&self) -> impl Iterator<Item = String> + '_ {
        self.replicates.iter().map(|r| r.best_ion.clone())
    }
}
