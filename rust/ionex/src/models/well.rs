use serde::{
    Deserialize,
    Serialize,
};

pub type WellId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellRole {
    Positive,
    Negative,
}

/// One physical sample location on a plate. Read-only for this crate;
/// wells come out of the persisted analysis archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub id: WellId,
    pub chemical: String,
    pub media: String,
    pub concentration: Option<f64>,
    pub role: WellRole,
}
