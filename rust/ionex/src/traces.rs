use crate::data_sources::{
    ScanSource,
    WellSource,
};
use crate::errors::{
    ExportError,
    Result,
};
use crate::grouping::{
    normalize_media_label,
    MediaGroup,
};
use crate::models::{
    IonMeasurement,
    Well,
    WellId,
};
use crate::ordering::IonOrder;
use serde::{
    Deserialize,
    Serialize,
};

/// Media group whose tail-ion panels get a paired negative-control trace.
pub const YEAST_MEDIA: &str = "YEAST";

/// Intensity clamp applied to every plotted point.
pub const DEFAULT_SCALING_CEILING: f64 = 500_000.0;

const BLANK_LABEL: &str = "BLANK";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub time: f64,
    pub intensity: f64,
}

/// One labeled time-series panel, owned here until handed to the plotting
/// collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: String,
    pub points: Vec<TracePoint>,
}

impl Trace {
    pub fn max_intensity(&self) -> f64 {
        self.points.iter().map(|p| p.intensity).fold(0.0, f64::max)
    }

    /// Always-shown blank-scan reference panel. Zero intensity, no points.
    pub fn blank() -> Self {
        Self {
            label: BLANK_LABEL.to_string(),
            points: Vec::new(),
        }
    }
}

/// Ordered traces plus their per-panel intensity ceilings.
///
/// The two lists stay positionally aligned; the only way in is [`push`],
/// which records the trace's maximum alongside it.
///
/// [`push`]: TraceSet::push
#[derive(Debug, Default)]
pub struct TraceSet {
    traces: Vec<Trace>,
    y_maxima: Vec<f64>,
}

impl TraceSet {
    pub fn push(&mut self, trace: Trace) {
        let y_max = trace.max_intensity();
        self.traces.push(trace);
        self.y_maxima.push(y_max);
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn y_maxima(&self) -> &[f64] {
        &self.y_maxima
    }

    pub fn labels(&self) -> Vec<String> {
        self.traces.iter().map(|t| t.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Media label plus concentration, as shown on every panel.
fn plate_metadata(well: &Well) -> String {
    let concentration = well
        .concentration
        .map(|c| c.to_string())
        .unwrap_or_default();
    format!("{} {}", normalize_media_label(&well.media), concentration)
}

/// Final label for a positive-control panel, built in one pass.
fn positive_label(
    chemical: &str,
    ion: &str,
    well: &Well,
    measurement: Option<&IonMeasurement>,
) -> String {
    let plate = plate_metadata(well);
    match measurement {
        Some(m) => format!(
            "{} {}\n{} \n{:.2}SNR at {:.2}s",
            chemical, ion, plate, m.snr, m.time
        ),
        None => format!("{} {}\n{} \nNo peaks found", chemical, ion, plate),
    }
}

fn negative_label(chemical: &str, ion: &str, well: &Well) -> String {
    format!(
        "{} {}\n{} Negative Control",
        chemical,
        ion,
        plate_metadata(well)
    )
}

/// Walks the display order across the media groups and builds the full
/// paginated panel sequence for one chemical.
pub struct TraceAssembler<'a, W, S> {
    wells: &'a W,
    scans: &'a S,
    scaling_ceiling: f64,
}

impl<'a, W: WellSource, S: ScanSource> TraceAssembler<'a, W, S> {
    pub fn new(wells: &'a W, scans: &'a S) -> Self {
        Self {
            wells,
            scans,
            scaling_ceiling: DEFAULT_SCALING_CEILING,
        }
    }

    pub fn with_scaling_ceiling(mut self, scaling_ceiling: f64) -> Self {
        self.scaling_ceiling = scaling_ceiling;
        self
    }

    fn resolve_well(&self, id: WellId, chemical: &str) -> Result<&'a Well> {
        self.wells
            .well(id)
            .ok_or_else(|| ExportError::MissingReplicateWell {
                well_id: id,
                chemical: chemical.to_string(),
            })
    }

    fn clamped_series(&self, well: WellId, ion: &str) -> Vec<TracePoint> {
        self.scans
            .time_series(well, ion)
            .into_iter()
            .map(|p| TracePoint {
                time: p.time,
                intensity: p.intensity.min(self.scaling_ceiling),
            })
            .collect()
    }

    /// For each ion in order, for each media group, for each replicate:
    /// a panel when the ion is universal or is that replicate's own best
    /// ion. Tail-ion YEAST panels additionally get the replicate's first
    /// negative-control well as a paired panel, and every universal ion is
    /// followed by one blank filler panel.
    pub fn assemble(
        &self,
        chemical: &str,
        order: &IonOrder,
        groups: &[MediaGroup<'_>],
    ) -> Result<TraceSet> {
        let mut out = TraceSet::default();

        for display in &order.ions {
            for group in groups {
                for result in &group.members {
                    if !display.universal && result.best_ion != display.ion {
                        continue;
                    }

                    let positive = self.resolve_well(result.positive_well, chemical)?;
                    out.push(Trace {
                        label: positive_label(
                            chemical,
                            &display.ion,
                            positive,
                            result.measurement(&display.ion),
                        ),
                        points: self.clamped_series(result.positive_well, &display.ion),
                    });

                    let tail_best_match = !display.universal && result.best_ion == display.ion;
                    if group.label == YEAST_MEDIA && tail_best_match {
                        // TODO: pick the negative well with the highest
                        // noise instead of the first listed one.
                        if let Some(&negative_id) = result.negative_wells.first() {
                            let negative = self.resolve_well(negative_id, chemical)?;
                            out.push(Trace {
                                label: negative_label(chemical, &display.ion, negative),
                                points: self.clamped_series(negative_id, &display.ion),
                            });
                        }
                    }
                }
            }

            if display.universal {
                out.push(Trace::blank());
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_sources::{
        AnalysisArchive,
        ScanSeries,
    };
    use crate::grouping::group_by_media;
    use crate::models::{
        StandardIonResult,
        WellRole,
    };
    use crate::ordering::{
        IonOrder,
        DEFAULT_ION,
    };
    use std::collections::BTreeMap;

    fn well(id: i32, media: &str, role: WellRole, concentration: Option<f64>) -> Well {
        Well {
            id,
            chemical: "mesaconate".to_string(),
            media: media.to_string(),
            concentration,
            role,
        }
    }

    fn series(well_id: i32, ion: &str, intensities: &[f64]) -> ScanSeries {
        let points = intensities
            .iter()
            .enumerate()
            .map(|(i, &intensity)| TracePoint {
                time: i as f64,
                intensity,
            })
            .collect();
        ScanSeries {
            well_id,
            ion: ion.to_string(),
            points,
        }
    }

    fn replicate(
        id: i32,
        positive_well: i32,
        negative_wells: Vec<i32>,
        best_ion: &str,
        measured: &[(&str, Option<IonMeasurement>)],
    ) -> StandardIonResult {
        let measurements: BTreeMap<String, Option<IonMeasurement>> = measured
            .iter()
            .map(|(ion, m)| (ion.to_string(), *m))
            .collect();
        StandardIonResult {
            id,
            chemical: "mesaconate".to_string(),
            positive_well,
            negative_wells,
            measurements,
            best_ion: best_ion.to_string(),
        }
    }

    fn measurement(snr: f64, time: f64) -> IonMeasurement {
        IonMeasurement {
            intensity: snr * 100.0,
            time,
            snr,
        }
    }

    /// Scenario A: three replicates over YEAST and LB, winner == default.
    #[test]
    fn test_single_universal_ion_with_blank_filler() {
        let archive = AnalysisArchive {
            wells: vec![
                well(1, "YEAST", WellRole::Positive, Some(10.0)),
                well(2, "YEAST", WellRole::Positive, None),
                well(3, "LB", WellRole::Positive, None),
            ],
            results: vec![],
            scans: vec![
                series(1, "M+H", &[100.0, 400.0]),
                series(2, "M+H", &[50.0]),
                series(3, "M+H", &[75.0]),
            ],
        };
        let replicates = vec![
            replicate(10, 1, vec![], "M+H", &[("M+H", Some(measurement(4.0, 30.0)))]),
            replicate(11, 2, vec![], "M+H", &[("M+H", Some(measurement(2.0, 31.0)))]),
            replicate(12, 3, vec![], "M+H", &[("M+H", Some(measurement(3.0, 29.0)))]),
        ];
        let groups = group_by_media("mesaconate", &replicates, &archive).unwrap();
        let order = IonOrder::build(
            replicates.iter().map(|r| r.best_ion.clone()),
            "M+H",
            DEFAULT_ION,
        );
        assert_eq!(order.fold_index, 1);
        assert_eq!(order.len(), 1);

        let assembler = TraceAssembler::new(&archive, &archive);
        let set = assembler.assemble("mesaconate", &order, &groups).unwrap();

        // Three positive panels plus one blank filler for the one universal
        // ion, all maxima aligned.
        assert_eq!(set.len(), 4);
        assert_eq!(set.y_maxima().len(), set.traces().len());
        assert_eq!(set.traces()[3].label, "BLANK");
        assert_eq!(set.y_maxima()[3], 0.0);
        assert_eq!(set.y_maxima()[0], 400.0);
        assert!(set.traces()[0].label.contains("4.00SNR at 30.00s"));
    }

    /// Scenario B: tail ion on a YEAST replicate pairs a negative control.
    #[test]
    fn test_yeast_tail_ion_pairs_negative_control() {
        let archive = AnalysisArchive {
            wells: vec![
                well(1, "YEAST", WellRole::Positive, Some(5.0)),
                well(2, "YEAST", WellRole::Negative, None),
            ],
            results: vec![],
            scans: vec![
                series(1, "M+H", &[10.0]),
                series(1, "M+Na", &[900.0]),
                series(2, "M+Na", &[30.0]),
            ],
        };
        let replicates = vec![replicate(
            10,
            1,
            vec![2],
            "M+Na",
            &[
                ("M+H", Some(measurement(1.0, 30.0))),
                ("M+Na", Some(measurement(8.5, 32.5))),
            ],
        )];
        let groups = group_by_media("mesaconate", &replicates, &archive).unwrap();
        let order = IonOrder::build(
            replicates.iter().map(|r| r.best_ion.clone()),
            "M+H",
            DEFAULT_ION,
        );
        assert_eq!(order.fold_index, 1);

        let assembler = TraceAssembler::new(&archive, &archive);
        let set = assembler.assemble("mesaconate", &order, &groups).unwrap();

        // M+H universal panel, blank filler, then the tail M+Na panel with
        // its paired negative control right after it.
        assert_eq!(set.len(), 4);
        assert!(set.traces()[2].label.contains("8.50SNR at 32.50s"));
        assert!(set.traces()[3].label.ends_with("Negative Control"));
        assert_eq!(set.y_maxima()[2], 900.0);
        assert_eq!(set.y_maxima()[3], 30.0);
    }

    /// Scenario C: no measurement for the requested ion.
    #[test]
    fn test_missing_measurement_labels_no_peaks() {
        let archive = AnalysisArchive {
            wells: vec![well(1, "LB", WellRole::Positive, None)],
            results: vec![],
            scans: vec![],
        };
        let replicates = vec![replicate(10, 1, vec![], "M+H", &[("M+H", None)])];
        let groups = group_by_media("mesaconate", &replicates, &archive).unwrap();
        let order = IonOrder::build(
            replicates.iter().map(|r| r.best_ion.clone()),
            "M+H",
            DEFAULT_ION,
        );

        let assembler = TraceAssembler::new(&archive, &archive);
        let set = assembler.assemble("mesaconate", &order, &groups).unwrap();
        assert!(set.traces()[0].label.contains("No peaks found"));
        assert_eq!(set.y_maxima()[0], 0.0);
    }

    #[test]
    fn test_unresolvable_negative_well_is_fatal() {
        let archive = AnalysisArchive {
            wells: vec![well(1, "YEAST", WellRole::Positive, None)],
            results: vec![],
            scans: vec![],
        };
        let replicates = vec![replicate(
            10,
            1,
            vec![99],
            "M+Na",
            &[("M+H", None), ("M+Na", Some(measurement(2.0, 30.0)))],
        )];
        let groups = group_by_media("mesaconate", &replicates, &archive).unwrap();
        let order = IonOrder::build(
            replicates.iter().map(|r| r.best_ion.clone()),
            "M+H",
            DEFAULT_ION,
        );

        let assembler = TraceAssembler::new(&archive, &archive);
        let err = assembler
            .assemble("mesaconate", &order, &groups)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::MissingReplicateWell { well_id: 99, .. }
        ));
    }

    #[test]
    fn test_intensities_clamp_at_ceiling() {
        let archive = AnalysisArchive {
            wells: vec![well(1, "LB", WellRole::Positive, None)],
            results: vec![],
            scans: vec![series(1, "M+H", &[100.0, 2_000_000.0])],
        };
        let replicates = vec![replicate(
            10,
            1,
            vec![],
            "M+H",
            &[("M+H", Some(measurement(3.0, 30.0)))],
        )];
        let groups = group_by_media("mesaconate", &replicates, &archive).unwrap();
        let order = IonOrder::build(
            replicates.iter().map(|r| r.best_ion.clone()),
            "M+H",
            DEFAULT_ION,
        );

        let assembler = TraceAssembler::new(&archive, &archive);
        let set = assembler.assemble("mesaconate", &order, &groups).unwrap();
        assert_eq!(set.y_maxima()[0], DEFAULT_SCALING_CEILING);
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let archive = AnalysisArchive {
            wells: vec![
                well(1, "YEAST", WellRole::Positive, Some(2.5)),
                well(2, "YEAST", WellRole::Negative, None),
            ],
            results: vec![],
            scans: vec![series(1, "M+H", &[10.0]), series(1, "M+K", &[55.0])],
        };
        let replicates = vec![replicate(
            10,
            1,
            vec![2],
            "M+K",
            &[
                ("M+H", Some(measurement(1.5, 28.0))),
                ("M+K", Some(measurement(6.0, 29.0))),
            ],
        )];
        let groups = group_by_media("mesaconate", &replicates, &archive).unwrap();
        let order = IonOrder::build(
            replicates.iter().map(|r| r.best_ion.clone()),
            "M+K",
            DEFAULT_ION,
        );

        let assembler = TraceAssembler::new(&archive, &archive);
        let a = assembler.assemble("mesaconate", &order, &groups).unwrap();
        let b = assembler.assemble("mesaconate", &order, &groups).unwrap();
        assert_eq!(a.labels(), b.labels());
        assert_eq!(a.y_maxima(), b.y_maxima());
    }
}
