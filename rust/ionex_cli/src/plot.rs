use ionex::errors::{
    ExportError,
    Result,
};
use ionex::plotting::{
    PlotRequest,
    Plotter,
};
use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::PathBuf;

/// Renders a gnuplot command file next to the target image so the pages
/// can be rasterized by the gnuplot install on the analysis host.
#[derive(Debug, Default)]
pub struct ScriptPlotter;

fn escape_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

impl Plotter for ScriptPlotter {
    fn plot(&self, request: &PlotRequest) -> Result<()> {
        let script_path = PathBuf::from(format!("{}.gnuplot", request.img_path.display()));
        let file = File::create(&script_path).map_err(|e| ExportError::Io {
            source: e,
            path: Some(script_path.clone()),
        })?;
        let mut writer = BufWriter::new(file);

        writeln!(
            writer,
            "set terminal pdf font ',{}'",
            (10.0 * request.font_scale).round() as u32
        )?;
        writeln!(writer, "set output \"{}\"", request.img_path.display())?;
        writeln!(writer, "set xlabel \"{}\"", request.x_label)?;
        writeln!(writer, "set ylabel \"{}\"", request.y_label)?;

        for (index, (label, y_max)) in request
            .labels
            .iter()
            .zip(request.y_maxima.iter())
            .enumerate()
        {
            writeln!(writer, "set title \"{}\"", escape_label(label))?;
            if *y_max > 0.0 {
                writeln!(writer, "set yrange [0:{}]", y_max)?;
            } else {
                writeln!(writer, "set yrange [0:*]")?;
            }
            writeln!(
                writer,
                "plot \"{}\" index {} using 1:2 with lines notitle",
                request.data_path.display(),
                index
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}
