use crate::errors::{
    ExportError,
    Result,
};
use crate::traces::TraceSet;
use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

pub const X_AXIS_LABEL: &str = "time";
pub const Y_AXIS_LABEL: &str = "intensity";
pub const DEFAULT_FONT_SCALE: f64 = 0.5;

/// Everything the external 2D plotting backend needs, with labels and
/// y-maxima positionally aligned to the blocks of the data file.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    pub data_path: PathBuf,
    pub img_path: PathBuf,
    pub labels: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    pub y_maxima: Vec<f64>,
    pub font_scale: f64,
}

impl PlotRequest {
    pub fn new(data_path: PathBuf, img_path: PathBuf, traces: &TraceSet) -> Self {
        Self {
            data_path,
            img_path,
            labels: traces.labels(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            y_maxima: traces.y_maxima().to_vec(),
            font_scale: DEFAULT_FONT_SCALE,
        }
    }
}

/// External rasterization backend seam.
pub trait Plotter {
    fn plot(&self, request: &PlotRequest) -> Result<()>;
}

/// Writes the plot data file: one two-column block per trace, blocks
/// separated by a double blank line so backends can address them by index.
pub fn write_plot_data(path: &Path, traces: &TraceSet) -> Result<()> {
    let file = File::create(path).map_err(|e| ExportError::Io {
        source: e,
        path: Some(path.to_path_buf()),
    })?;
    let mut writer = BufWriter::new(file);
    for trace in traces.traces() {
        for point in &trace.points {
            writeln!(writer, "{}\t{}", point.time, point.intensity)?;
        }
        writeln!(writer)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
