use crate::data_sources::WellSource;
use crate::errors::{
    ExportError,
    Result,
};
use crate::models::StandardIonResult;

/// Known long-form media names and their short display forms. Exact-match
/// substitution, not pattern matching.
const MEDIA_ALIASES: &[(&str, &str)] = &[(
    "Teknova SC Minimal Broth with Raffinose minus Uracil plus Gal",
    "SC Minimal Broth",
)];

pub fn normalize_media_label(media: &str) -> &str {
    for (long_form, short_form) in MEDIA_ALIASES {
        if media == *long_form {
            return short_form;
        }
    }
    media
}

/// Replicates sharing one (normalized) media label, in input order.
#[derive(Debug)]
pub struct MediaGroup<'a> {
    pub label: String,
    pub members: Vec<&'a StandardIonResult>,
}

/// Partitions `replicates` by the media label of each one's positive well.
///
/// Group order is the order in which each label is first encountered;
/// members keep their input order. Every replicate lands in exactly one
/// group. An unresolvable positive well is a data-integrity failure.
pub fn group_by_media<'a, W: WellSource>(
    chemical: &str,
    replicates: &'a [StandardIonResult],
    wells: &W,
) -> Result<Vec<MediaGroup<'a>>> {
    let mut groups: Vec<MediaGroup<'a>> = Vec::new();
    for replicate in replicates {
        let well =
            wells
                .well(replicate.positive_well)
                .ok_or_else(|| ExportError::MissingReplicateWell {
                    well_id: replicate.positive_well,
                    chemical: chemical.to_string(),
                })?;
        let label = normalize_media_label(&well.media);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.members.push(replicate),
            None => groups.push(MediaGroup {
                label: label.to_string(),
                members: vec![replicate],
            }),
        }
    }
    Ok(groups)
}
