use crate::data_sources::{
    ResultStore,
    ScanSource,
    WellSource,
};
use crate::errors::{
    ExportError,
    Result,
};
use crate::grouping::group_by_media;
use crate::models::ChemicalResultSet;
use crate::ordering::{
    IonOrder,
    DEFAULT_ION,
};
use crate::plotting::{
    write_plot_data,
    PlotRequest,
};
use crate::report::ReportRow;
use crate::scoring::{
    select_best_ion,
    IonAggregator,
};
use crate::traces::{
    TraceAssembler,
    TraceSet,
};
use std::path::Path;
use tracing::{
    debug,
    info,
};

/// Everything produced for one chemical: the report row, the assembled
/// panels, and the plot request for the external backend.
#[derive(Debug)]
pub struct ChemicalExport {
    pub row: ReportRow,
    pub traces: TraceSet,
    pub plot: PlotRequest,
}

/// Runs the full per-chemical pipeline: fetch, score, group, order,
/// assemble, write the plot data file, and build the report row.
///
/// One chemical is fully processed before the next begins; failures here
/// never touch the rows already flushed for earlier chemicals.
pub fn export_chemical<A>(
    store: &A,
    chemical: &str,
    aggregator: &dyn IonAggregator,
    scaling_ceiling: f64,
    plotting_dir: &Path,
) -> Result<ChemicalExport>
where
    A: ResultStore + WellSource + ScanSource,
{
    let result_set = ChemicalResultSet::new(chemical, store.results_for_chemical(chemical));
    if result_set.is_empty() {
        return Err(ExportError::EmptyInput {
            chemical: chemical.to_string(),
        });
    }
    debug!(
        "Found {} standard ion results for {}",
        result_set.len(),
        chemical
    );

    let winning_ion = select_best_ion(chemical, &result_set.replicates, aggregator)?;
    info!("Best ion for {}: {}", chemical, winning_ion);

    let groups = group_by_media(chemical, &result_set.replicates, store)?;
    let order = IonOrder::build(result_set.replicate_best_ions(), &winning_ion, DEFAULT_ION);

    let assembler = TraceAssembler::new(store, store).with_scaling_ceiling(scaling_ceiling);
    let traces = assembler.assemble(chemical, &order, &groups)?;
    debug!(
        "Assembled {} traces over {} media groups for {}",
        traces.len(),
        groups.len(),
        chemical
    );

    let data_path = plotting_dir.join(format!("{}.data", chemical));
    let img_path = plotting_dir.join(format!("{}.pdf", chemical));
    write_plot_data(&data_path, &traces)?;

    let plot = PlotRequest::new(data_path, img_path.clone(), &traces);
    let row = ReportRow::new(chemical, &winning_ion, &img_path);

    Ok(ChemicalExport { row, traces, plot })
}
