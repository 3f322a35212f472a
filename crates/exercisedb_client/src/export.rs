//! Semicolon-delimited CSV export and the full-database batch driver.

use crate::http_client::ExerciseDbApi;
use crate::store::Store;
use crate::{Exercise, ExerciseDbError, catalog};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const EXPORT_ALL_FILE: &str = "exercises_all.csv";
pub const BATCH_DIR: &str = "batches";

/// The fixed projection written during a full export. The blank `id` and
/// description fields are placeholders for the importing application to
/// fill; `name_pl` duplicates the English name for the same reason.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ExportRow {
    pub id: String,
    pub name_en: String,
    pub name_pl: String,
    pub description_en: String,
    pub description_pl: String,
    #[serde(rename = "gifUrl")]
    pub gif_url: String,
    #[serde(rename = "bodyPart")]
    pub body_part: String,
    pub target: String,
}

impl ExportRow {
    pub fn project(exercise: &Exercise) -> Result<Self, ExerciseDbError> {
        let name = capitalize(&required(exercise, "name")?);
        Ok(Self {
            id: String::new(),
            name_en: name.clone(),
            name_pl: name,
            description_en: String::new(),
            description_pl: String::new(),
            gif_url: required(exercise, "gifUrl")?,
            body_part: capitalize(&required(exercise, "bodyPart")?),
            target: capitalize(&required(exercise, "target")?),
        })
    }
}

fn required(exercise: &Exercise, field: &str) -> Result<String, ExerciseDbError> {
    exercise
        .field(field)
        .map(|v| v.into_owned())
        .ok_or_else(|| ExerciseDbError::MissingField(field.to_string()))
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// How a full export is split across files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchSize {
    /// Everything in one file, no `batches` directory.
    All,
    /// Consecutive chunks of this many rows, one file each.
    Rows(usize),
}

impl BatchSize {
    /// Parse the environment sentinel: empty or `all` means one file,
    /// otherwise a row count. Zero counts as `all`.
    pub fn parse(s: &str) -> Result<Self, ExerciseDbError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let n: usize = trimmed
            .parse()
            .map_err(|_| ExerciseDbError::Config(format!("invalid batch size: {s}")))?;
        Ok(if n == 0 { Self::All } else { Self::Rows(n) })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub files: Vec<PathBuf>,
}

fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>, ExerciseDbError> {
    Ok(csv::WriterBuilder::new().delimiter(b';').from_path(path)?)
}

/// Write projected rows; the header comes from the `ExportRow` field names.
pub fn export_rows(path: &Path, rows: &[ExportRow]) -> Result<(), ExerciseDbError> {
    if rows.is_empty() {
        return Err(ExerciseDbError::EmptyExport);
    }
    let mut wtr = writer(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write raw records; the header row is derived from the first record's
/// field names, so an empty list cannot be exported.
pub fn export_exercises(path: &Path, records: &[Exercise]) -> Result<(), ExerciseDbError> {
    let first = records.first().ok_or(ExerciseDbError::EmptyExport)?;
    let headers = first.field_names();
    let mut wtr = writer(path)?;
    wtr.write_record(&headers)?;
    for record in records {
        let mut row = Vec::with_capacity(headers.len());
        for header in &headers {
            let value = record
                .field(header)
                .ok_or_else(|| ExerciseDbError::MissingField(header.clone()))?;
            row.push(value.into_owned());
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Pull every body-part category through the store, deduplicate by id
/// (first seen wins) and write the projected rows, either as one
/// `exercises_all.csv` or chunked into the `batches` directory.
pub async fn export_all<C: ExerciseDbApi>(
    store: &Store<C>,
    batch_size: BatchSize,
) -> Result<ExportSummary, ExerciseDbError> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for body_part in catalog::BODY_PARTS {
        let records = store.get_data(body_part).await?;
        for record in &records {
            let id = required(record, "id")?;
            if !seen.insert(id) {
                continue;
            }
            rows.push(ExportRow::project(record)?);
        }
    }

    match batch_size {
        // Rows(0) is the same sentinel as "all" in the original interface.
        BatchSize::All | BatchSize::Rows(0) => {
            let path = store.data_dir().join(EXPORT_ALL_FILE);
            export_rows(&path, &rows)?;
            tracing::info!(rows = rows.len(), path = %path.display(), "wrote full export");
            Ok(ExportSummary {
                rows: rows.len(),
                files: vec![path],
            })
        }
        BatchSize::Rows(n) => {
            let batch_dir = store.data_dir().join(BATCH_DIR);
            if !batch_dir.exists() {
                std::fs::create_dir_all(&batch_dir)?;
            }
            let mut files = Vec::new();
            for (i, chunk) in rows.chunks(n).enumerate() {
                let path = batch_dir.join(format!("exercises_batch{i}.csv"));
                export_rows(&path, chunk)?;
                files.push(path);
            }
            tracing::info!(rows = rows.len(), batches = files.len(), "wrote batched export");
            Ok(ExportSummary {
                rows: rows.len(),
                files,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn exercise(id: &str) -> Exercise {
        serde_json::from_value(json!({
            "id": id,
            "name": "barbell good morning",
            "bodyPart": "back",
            "target": "hamstrings",
            "gifUrl": format!("https://example.test/{id}.gif")
        }))
        .unwrap()
    }

    #[test]
    fn capitalize_matches_first_upper_rest_lower() {
        assert_eq!(capitalize("barbell row"), "Barbell row");
        assert_eq!(capitalize("UPPER LEGS"), "Upper legs");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn batch_size_parse_sentinels() {
        assert_eq!(BatchSize::parse("").unwrap(), BatchSize::All);
        assert_eq!(BatchSize::parse("all").unwrap(), BatchSize::All);
        assert_eq!(BatchSize::parse("ALL").unwrap(), BatchSize::All);
        assert_eq!(BatchSize::parse("0").unwrap(), BatchSize::All);
        assert_eq!(BatchSize::parse("50").unwrap(), BatchSize::Rows(50));
        assert!(BatchSize::parse("fifty").is_err());
    }

    #[test]
    fn project_capitalizes_and_blanks_placeholders() {
        let row = ExportRow::project(&exercise("7")).expect("project");
        assert_eq!(row.id, "");
        assert_eq!(row.name_en, "Barbell good morning");
        assert_eq!(row.name_pl, row.name_en);
        assert_eq!(row.description_en, "");
        assert_eq!(row.body_part, "Back");
        assert_eq!(row.target, "Hamstrings");
        assert_eq!(row.gif_url, "https://example.test/7.gif");
    }

    #[test]
    fn project_missing_name_errors() {
        let mut e = exercise("7");
        e.name = None;
        let res = ExportRow::project(&e);
        assert!(matches!(res, Err(ExerciseDbError::MissingField(f)) if f == "name"));
    }

    #[test]
    fn export_rows_empty_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = export_rows(&dir.path().join("out.csv"), &[]);
        assert!(matches!(res, Err(ExerciseDbError::EmptyExport)));
    }

    #[test]
    fn export_rows_writes_semicolon_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![ExportRow::project(&exercise("1")).unwrap()];
        export_rows(&path, &rows).expect("export");

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id;name_en;name_pl;description_en;description_pl;gifUrl;bodyPart;target"
        );
        assert_eq!(
            lines.next().unwrap(),
            ";Barbell good morning;Barbell good morning;;;https://example.test/1.gif;Back;Hamstrings"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn export_exercises_derives_header_from_first_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.csv");
        let records = vec![exercise("1"), exercise("2")];
        export_exercises(&path, &records).expect("export");

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "id;name;bodyPart;target;gifUrl");
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn export_exercises_empty_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = export_exercises(&dir.path().join("filtered.csv"), &[]);
        assert!(matches!(res, Err(ExerciseDbError::EmptyExport)));
    }

    #[test]
    fn export_exercises_missing_field_on_later_record_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut second = exercise("2");
        second.target = None;
        let res = export_exercises(&dir.path().join("filtered.csv"), &[exercise("1"), second]);
        assert!(matches!(res, Err(ExerciseDbError::MissingField(f)) if f == "target"));
    }
}
