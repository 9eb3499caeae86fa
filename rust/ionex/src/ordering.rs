use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Ion every chemical is always evaluated against.
pub const DEFAULT_ION: &str = "M+H";

/// One ion at its position in the display order. Universal ions are shown
/// for every replicate; tail ions only for the replicate that elected them
/// as its own best ion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayIon {
    pub ion: String,
    pub universal: bool,
}

/// Deterministic display order over the candidate ion set.
///
/// `fold_index` is the position immediately after the default ion: every
/// ion before it is universal, everything at or after it is tail. With the
/// winner equal to the default ion the universal section is exactly one
/// ion wide.
#[derive(Debug, Clone)]
pub struct IonOrder {
    pub ions: Vec<DisplayIon>,
    pub fold_index: usize,
}

fn display_rank(ion: &str, winning_ion: &str, default_ion: &str) -> u8 {
    if ion == winning_ion {
        0
    } else if ion == default_ion {
        1
    } else {
        2
    }
}

/// Total order: winning ion first, default ion next, then everything else
/// lexically. Ties cannot occur since candidates are deduplicated.
fn compare_ions(a: &str, b: &str, winning_ion: &str, default_ion: &str) -> Ordering {
    display_rank(a, winning_ion, default_ion)
        .cmp(&display_rank(b, winning_ion, default_ion))
        .then_with(|| a.cmp(b))
}

impl IonOrder {
    /// Builds the order over `{winning_ion, default_ion}` plus every
    /// replicate's own best ion.
    pub fn build<I>(replicate_best_ions: I, winning_ion: &str, default_ion: &str) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut candidates: BTreeSet<String> = replicate_best_ions.into_iter().collect();
        candidates.insert(winning_ion.to_string());
        candidates.insert(default_ion.to_string());

        let mut names: Vec<String> = candidates.into_iter().collect();
        names.sort_by(|a, b| compare_ions(a, b, winning_ion, default_ion));

        // The default ion is always a candidate, so the position lookup
        // cannot miss.
        let fold_index = names
            .iter()
            .position(|n| n == default_ion)
            .map(|i| i + 1)
            .unwrap_or(names.len());

        let ions = names
            .into_iter()
            .enumerate()
            .map(|(i, ion)| DisplayIon {
                ion,
                universal: i < fold_index,
            })
            .collect();

        Self { ions, fold_index }
    }

    pub fn len(&self) -> usize {
        self.ions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ions.is_empty()
    }
}
