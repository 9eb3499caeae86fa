use crate::errors::{
    ExportError,
    Result,
};
use crate::models::StandardIonResult;
use std::collections::BTreeMap;

/// Collapses all replicates of a chemical into one score per candidate ion.
///
/// The aggregation formula is a collaborator concern; implementations must
/// be deterministic for the same input set. Replicates with no usable
/// measurement at all contribute nothing.
pub trait IonAggregator {
    fn aggregate(&self, replicates: &[StandardIonResult]) -> BTreeMap<String, f64>;
}

/// Scores each ion by the maximum signal-to-noise observed for it across
/// all replicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxSnr;

impl IonAggregator for MaxSnr {
    fn aggregate(&self, replicates: &[StandardIonResult]) -> BTreeMap<String, f64> {
        let mut scores: BTreeMap<String, f64> = BTreeMap::new();
        for replicate in replicates {
            for (ion, measurement) in &replicate.measurements {
                let Some(measurement) = measurement else {
                    continue;
                };
                let entry = scores.entry(ion.clone()).or_insert(f64::NEG_INFINITY);
                if measurement.snr > *entry {
                    *entry = measurement.snr;
                }
            }
        }
        scores
    }
}

/// Scores each ion by the number of replicates that elected it as their own
/// best ion. Measurement-less replicates do not vote.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestIonVote;

impl IonAggregator for BestIonVote {
    fn aggregate(&self, replicates: &[StandardIonResult]) -> BTreeMap<String, f64> {
        let mut votes: BTreeMap<String, f64> = BTreeMap::new();
        for replicate in replicates {
            if !replicate.has_any_measurement() {
                continue;
            }
            *votes.entry(replicate.best_ion.clone()).or_insert(0.0) += 1.0;
        }
        votes
    }
}

/// Picks the single best-supported ion across all replicates of `chemical`.
///
/// The highest aggregate score wins; ties resolve to the lexically smallest
/// ion name so the same input set always elects the same winner.
pub fn select_best_ion(
    chemical: &str,
    replicates: &[StandardIonResult],
    aggregator: &dyn IonAggregator,
) -> Result<String> {
    let scores = aggregator.aggregate(replicates);

    let mut winner: Option<(String, f64)> = None;
    // Ascending key order, so on equal scores the first (lexically smallest)
    // candidate is kept.
    for (ion, score) in scores {
        match &winner {
            Some((_, best)) if score <= *best => {}
            _ => winner = Some((ion, score)),
        }
    }

    winner
        .map(|(ion, _)| ion)
        .ok_or_else(|| ExportError::NoUsableSignal {
            chemical: chemical.to_string(),
        })
}
