//! Clean table serialization.
//!
//! Writes the canonical header plus every row, comma-delimited, UTF-8,
//! minimally quoted. The file is staged in a temporary sibling and
//! renamed into place, so a consumer can never observe a half-written
//! table at the final path.

use std::path::Path;

use tickets_core::error::Result;
use tickets_core::schema::{CanonicalRow, CANONICAL_FIELDS};
use tracing::debug;

/// Write `rows` to `path` as the clean table artifact.
///
/// The rename at the end is the commit point; until then the final
/// path is untouched.
pub fn write_clean_csv(path: &Path, rows: &[CanonicalRow]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let staging = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new_in(".")?,
    };

    {
        // csv::Writer quotes only when a field contains the delimiter,
        // a quote or a line break.
        let mut writer = csv::Writer::from_writer(&staging);
        writer.write_record(CANONICAL_FIELDS)?;
        for row in rows {
            writer.write_record(row.to_record())?;
        }
        writer.flush()?;
    }

    staging
        .persist(path)
        .map_err(|e| tickets_core::error::TicketsError::Io(e.error))?;

    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_row() -> CanonicalRow {
        let mut row = CanonicalRow::default();
        row.summary = "Fix bug".to_string();
        row.issue_key = "PROJ-1".to_string();
        row.created = "2025-12-10 08:43:00".to_string();
        row
    }

    #[test]
    fn test_header_comes_first() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");
        write_clean_csv(&path, &[sample_row()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let first_line = content.lines().next().unwrap();
        assert!(first_line.starts_with("Summary,Issue key,Issue id"));
        assert!(first_line.ends_with("Status Category,Status Category Changed"));
    }

    #[test]
    fn test_empty_row_set_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");
        write_clean_csv(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_minimal_quoting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");
        let mut row = sample_row();
        row.summary = "One, two".to_string();
        row.status = "Plain".to_string();
        write_clean_csv(&path, &[row]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let data_line = content.lines().nth(1).unwrap();
        // Only the field with the embedded comma gets quoted.
        assert!(data_line.starts_with("\"One, two\",PROJ-1"));
        assert!(data_line.contains(",Plain,"));
    }

    #[test]
    fn test_embedded_newline_survives_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");
        let mut row = sample_row();
        row.summary = "line one\nline two".to_string();
        write_clean_csv(&path, &[row]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "line one\nline two");
    }

    #[test]
    fn test_no_partial_file_left_on_missing_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("clean.csv");
        assert!(write_clean_csv(&path, &[sample_row()]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_overwrite_replaces_previous_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");
        write_clean_csv(&path, &[sample_row(), sample_row()]).unwrap();
        write_clean_csv(&path, &[sample_row()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
