pub mod data_sources;
pub mod errors;
pub mod export;
pub mod grouping;
pub mod models;
pub mod ordering;
pub mod plotting;
pub mod report;
pub mod scoring;
pub mod traces;

pub use data_sources::{
    AnalysisArchive,
    ResultStore,
    ScanSource,
    WellSource,
};
pub use export::{
    export_chemical,
    ChemicalExport,
};
pub use models::{
    ChemicalResultSet,
    IonMeasurement,
    StandardIonResult,
    Well,
    WellRole,
};
pub use ordering::{
    DisplayIon,
    IonOrder,
    DEFAULT_ION,
};
pub use plotting::{
    PlotRequest,
    Plotter,
};
pub use report::{
    ReportRow,
    TsvReportWriter,
};
pub use scoring::{
    select_best_ion,
    BestIonVote,
    IonAggregator,
    MaxSnr,
};
pub use traces::{
    Trace,
    TraceAssembler,
    TraceSet,
};
