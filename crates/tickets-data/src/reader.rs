//! Raw export loading.
//!
//! Reads the delimited input file into an ephemeral [`RawTable`]: the
//! header as exported (names may repeat), a name→first-index lookup
//! built once per pass, and every data row. Rows shorter than the
//! header are padded so the mapper never indexes out of range.

use std::collections::HashMap;
use std::path::Path;

use tickets_core::error::{Result, TicketsError};
use tickets_core::settings::Encoding;
use tracing::debug;

// ── RawTable ──────────────────────────────────────────────────────────────────

/// One raw export, alive only for the duration of a normalization pass.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Header names exactly as exported, duplicates included.
    pub header: Vec<String>,
    /// Name → index of its FIRST occurrence. Repeated names keep the
    /// leftmost column; the Sprint reconciliation in the mapper is the
    /// only place that looks past it.
    pub name_to_idx: HashMap<String, usize>,
    /// Data rows, each padded to the header width.
    pub rows: Vec<Vec<String>>,
}

/// Read a raw export from `path`.
///
/// Missing input is the one pass-fatal condition and maps to
/// [`TicketsError::InputNotFound`]; everything after that degrades at
/// row or field level instead of failing the pass.
pub fn read_raw_csv(path: &Path, encoding: Encoding) -> Result<RawTable> {
    if !path.exists() {
        return Err(TicketsError::InputNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| TicketsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode(&bytes, encoding);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => {
            // A zero-byte file has no header at all; treat it like a
            // header-only export rather than failing the pass.
            return Ok(RawTable {
                header: Vec::new(),
                name_to_idx: HashMap::new(),
                rows: Vec::new(),
            });
        }
    };

    let name_to_idx = build_name_index(&header);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in records {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.len() < header.len() {
            row.resize(header.len(), String::new());
        }
        rows.push(row);
    }

    debug!(
        "Read {} raw rows ({} columns) from {}",
        rows.len(),
        header.len(),
        path.display()
    );

    Ok(RawTable {
        header,
        name_to_idx,
        rows,
    })
}

/// Build the name→first-index lookup. First occurrence wins.
pub fn build_name_index(header: &[String]) -> HashMap<String, usize> {
    let mut name_to_idx = HashMap::new();
    for (i, name) in header.iter().enumerate() {
        name_to_idx.entry(name.clone()).or_insert(i);
    }
    name_to_idx
}

/// Decode raw bytes according to the configured input encoding.
///
/// UTF-8 decodes lossily: a stray invalid byte becomes U+FFFD and the
/// pass continues. Latin-1 maps each byte to the code point of the same
/// value, which cannot fail.
fn decode(bytes: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        Encoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    // ── read_raw_csv ──────────────────────────────────────────────────────────

    #[test]
    fn test_read_basic_table() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "raw.csv", b"Summary,Status\nFix bug,Done\n");

        let table = read_raw_csv(&path, Encoding::Utf8).unwrap();
        assert_eq!(table.header, vec!["Summary", "Status"]);
        assert_eq!(table.rows, vec![vec!["Fix bug", "Done"]]);
        assert_eq!(table.name_to_idx["Status"], 1);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");

        let err = read_raw_csv(&path, Encoding::Utf8).unwrap_err();
        assert!(matches!(err, TicketsError::InputNotFound(_)));
    }

    #[test]
    fn test_header_only_file_yields_no_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "raw.csv", b"Summary,Issue key,Created\n");

        let table = read_raw_csv(&path, Encoding::Utf8).unwrap();
        assert_eq!(table.header.len(), 3);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_short_rows_are_padded_to_header_width() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "raw.csv", b"A,B,C\nonly-a\n");

        let table = read_raw_csv(&path, Encoding::Utf8).unwrap();
        assert_eq!(table.rows[0], vec!["only-a", "", ""]);
    }

    #[test]
    fn test_quoted_fields_with_embedded_delimiters() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "raw.csv",
            b"Summary,Status\n\"Fix: a, b and c\",\"Done\"\n",
        );

        let table = read_raw_csv(&path, Encoding::Utf8).unwrap();
        assert_eq!(table.rows[0][0], "Fix: a, b and c");
    }

    #[test]
    fn test_embedded_newline_in_quoted_field() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "raw.csv", b"Summary,Status\n\"line one\nline two\",Open\n");

        let table = read_raw_csv(&path, Encoding::Utf8).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "line one\nline two");
    }

    #[test]
    fn test_latin1_decoding() {
        let dir = TempDir::new().unwrap();
        // "Resolução" in Latin-1: ç = 0xE7, ã = 0xE3.
        let path = write_file(&dir, "raw.csv", b"Summary\nResolu\xE7\xE3o\n");

        let table = read_raw_csv(&path, Encoding::Latin1).unwrap();
        assert_eq!(table.rows[0][0], "Resolução");
    }

    #[test]
    fn test_empty_file_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "raw.csv", b"");

        let table = read_raw_csv(&path, Encoding::Utf8).unwrap();
        assert!(table.header.is_empty());
        assert!(table.rows.is_empty());
    }

    // ── build_name_index ──────────────────────────────────────────────────────

    #[test]
    fn test_name_index_first_occurrence_wins() {
        let header: Vec<String> = ["Sprint", "Status", "Sprint"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let idx = build_name_index(&header);
        assert_eq!(idx["Sprint"], 0);
        assert_eq!(idx["Status"], 1);
    }
}
