use crate::errors::CliError;
use indicatif::{
    ProgressIterator,
    ProgressStyle,
};
use ionex::data_sources::AnalysisArchive;
use ionex::export::export_chemical;
use ionex::plotting::Plotter;
use ionex::report::TsvReportWriter;
use ionex::scoring::IonAggregator;
use std::path::Path;
use std::time::Instant;
use tracing::{
    info,
    warn,
};

#[derive(Debug)]
pub struct BatchSummary {
    pub exported: usize,
    pub failed: usize,
}

/// Processes the chemicals strictly one after another. A failure skips
/// that chemical with a warning; the report row for each success is
/// appended and flushed before the next chemical starts.
pub fn run_batch(
    archive: &AnalysisArchive,
    chemicals: &[String],
    aggregator: &dyn IonAggregator,
    scaling_ceiling: f64,
    plotting_dir: &Path,
    report_path: &Path,
    plotter: &dyn Plotter,
) -> Result<BatchSummary, CliError> {
    let mut writer = TsvReportWriter::create(report_path).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(report_path.display().to_string()),
    })?;

    let start = Instant::now();
    let mut exported = 0;
    let mut failed = 0;

    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .unwrap();
    for chemical in chemicals.iter().progress_with_style(style) {
        let export = match export_chemical(
            archive,
            chemical,
            aggregator,
            scaling_ceiling,
            plotting_dir,
        ) {
            Ok(x) => x,
            Err(e) => {
                warn!("Skipping {}: {}", chemical, e);
                failed += 1;
                continue;
            }
        };

        if let Err(e) = plotter.plot(&export.plot) {
            warn!("Skipping {}: plot hand-off failed: {}", chemical, e);
            failed += 1;
            continue;
        }

        // An unwritable report is not a per-chemical problem; abort.
        writer.append(&export.row).map_err(|e| CliError::Io {
            source: e.to_string(),
            path: Some(report_path.display().to_string()),
        })?;
        exported += 1;
    }

    info!(
        "Exported {} of {} chemicals ({} failed) in {:?}",
        exported,
        chemicals.len(),
        failed,
        start.elapsed()
    );
    Ok(BatchSummary { exported, failed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ionex::models::{
        IonMeasurement,
        StandardIonResult,
        Well,
        WellRole,
    };
    use ionex::plotting::PlotRequest;
    use ionex::scoring::MaxSnr;
    use ionex::traces::DEFAULT_SCALING_CEILING;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    struct NoopPlotter;

    impl Plotter for NoopPlotter {
        fn plot(&self, _request: &PlotRequest) -> ionex::errors::Result<()> {
            Ok(())
        }
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ionex_cli_batch_{}", tag));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fixture_archive() -> AnalysisArchive {
        let mut measurements = BTreeMap::new();
        measurements.insert(
            "M+H".to_string(),
            Some(IonMeasurement {
                intensity: 400.0,
                time: 30.0,
                snr: 4.0,
            }),
        );
        AnalysisArchive {
            wells: vec![Well {
                id: 1,
                chemical: "mesaconate".to_string(),
                media: "LB".to_string(),
                concentration: None,
                role: WellRole::Positive,
            }],
            results: vec![StandardIonResult {
                id: 10,
                chemical: "mesaconate".to_string(),
                positive_well: 1,
                negative_wells: vec![],
                measurements,
                best_ion: "M+H".to_string(),
            }],
            scans: vec![],
        }
    }

    #[test]
    fn test_failed_chemical_does_not_stop_the_batch() {
        let archive = fixture_archive();
        let dir = scratch_dir("isolation");
        let report_path = dir.join("report.tsv");

        let chemicals = vec!["citrate".to_string(), "mesaconate".to_string()];
        let summary = run_batch(
            &archive,
            &chemicals,
            &MaxSnr,
            DEFAULT_SCALING_CEILING,
            &dir,
            &report_path,
            &NoopPlotter,
        )
        .unwrap();

        assert_eq!(summary.exported, 1);
        assert_eq!(summary.failed, 1);

        let report = std::fs::read_to_string(&report_path).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("mesaconate\tM+H\t"));
    }
}
