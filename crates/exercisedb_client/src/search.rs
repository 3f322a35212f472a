//! Attribute filtering of an in-memory record list.

use crate::{Exercise, ExerciseDbError};

/// Narrow `records` down to those matching every criterion.
///
/// A record matches a criterion when the criterion value is a substring of
/// the record's field value. Criteria with empty values are skipped. A
/// record lacking a criterion field is a `MissingField` error, not a
/// non-match.
pub fn search(
    records: &[Exercise],
    criteria: &[(&str, &str)],
) -> Result<Vec<Exercise>, ExerciseDbError> {
    let mut matches: Vec<Exercise> = records.to_vec();
    for (field, wanted) in criteria {
        if wanted.is_empty() {
            continue;
        }
        let mut kept = Vec::new();
        for record in matches {
            let is_match = record
                .field(field)
                .ok_or_else(|| ExerciseDbError::MissingField((*field).to_string()))?
                .contains(wanted);
            if is_match {
                kept.push(record);
            }
        }
        matches = kept;
    }
    tracing::debug!(matched = matches.len(), "search finished");
    Ok(matches)
}
