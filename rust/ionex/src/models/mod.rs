mod standard_ion;
mod well;

pub use standard_ion::{
    ChemicalResultSet,
    IonMeasurement,
    StandardIonResult,
};
pub use well::{
    Well,
    WellId,
    WellRole,
};
