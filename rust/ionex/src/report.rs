use crate::errors::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// TSV header fields, in output order. The manual-review fields are left
/// blank for the scientist to fill in after looking at the plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    Chemical,
    BestIonFromAlgo,
    ManualPick,
    Author,
    DiagnosticPlots,
    Note,
}

impl ReportField {
    pub const HEADER: [ReportField; 6] = [
        ReportField::Chemical,
        ReportField::BestIonFromAlgo,
        ReportField::ManualPick,
        ReportField::Author,
        ReportField::DiagnosticPlots,
        ReportField::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportField::Chemical => "CHEMICAL",
            ReportField::BestIonFromAlgo => "BEST_ION_FROM_ALGO",
            ReportField::ManualPick => "MANUAL_PICK",
            ReportField::Author => "AUTHOR",
            ReportField::DiagnosticPlots => "DIAGNOSTIC_PLOTS",
            ReportField::Note => "NOTE",
        }
    }
}

/// One exported row: exactly one per processed chemical.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub chemical: String,
    pub best_ion: String,
    pub diagnostic_plots: String,
}

impl ReportRow {
    pub fn new(chemical: &str, best_ion: &str, plot_path: &Path) -> Self {
        Self {
            chemical: chemical.to_string(),
            best_ion: best_ion.to_string(),
            diagnostic_plots: plot_path.display().to_string(),
        }
    }

    /// Field values aligned to [`ReportField::HEADER`].
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.chemical,
            &self.best_ion,
            "",
            "",
            &self.diagnostic_plots,
            "",
        ]
    }
}

/// Tab-separated report writer. The header goes out on creation and every
/// appended row is flushed immediately so partial progress survives a
/// crash mid-batch.
pub struct TsvReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl TsvReportWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;
        Self::from_csv_writer(writer)
    }
}

impl<W: Write> TsvReportWriter<W> {
    pub fn from_writer(writer: W) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        Self::from_csv_writer(writer)
    }

    fn from_csv_writer(mut writer: csv::Writer<W>) -> Result<Self> {
        writer.write_record(ReportField::HEADER.iter().map(|f| f.as_str()))?;
        writer.flush().map_err(|e| crate::errors::ExportError::Io {
            source: e,
            path: None,
        })?;
        Ok(Self { writer })
    }

    pub fn append(&mut self, row: &ReportRow) -> Result<()> {
        self.writer.write_record(row.fields())?;
        self.writer
            .flush()
            .map_err(|e| crate::errors::ExportError::Io {
                source: e,
                path: None,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_header_order_matches_original_export() {
        let names: Vec<&str> = ReportField::HEADER.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "CHEMICAL",
                "BEST_ION_FROM_ALGO",
                "MANUAL_PICK",
                "AUTHOR",
                "DIAGNOSTIC_PLOTS",
                "NOTE"
            ]
        );
    }

    #[test]
    fn test_rows_are_tab_separated_and_review_fields_blank() {
        let mut writer = TsvReportWriter::from_writer(Vec::new()).unwrap();
        let row = ReportRow::new(
            "mesaconate",
            "M+H",
            &PathBuf::from("/plots/mesaconate.pdf"),
        );
        writer.append(&row).unwrap();

        let bytes = writer.writer.into_inner().ok().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "CHEMICAL\tBEST_ION_FROM_ALGO\tMANUAL_PICK\tAUTHOR\tDIAGNOSTIC_PLOTS\tNOTE"
        );
        assert_eq!(
            lines.next().unwrap(),
            "mesaconate\tM+H\t\t\t/plots/mesaconate.pdf\t"
        );
    }
}
