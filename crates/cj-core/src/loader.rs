//! CSV loader for input tables

use crate::error::{Error, Result};
use crate::table::{Row, Table};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Read a CSV file into a Table
///
/// The header is kept as row 0. Field contents are not trimmed and rows
/// keep their own width.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let table = read_from(BufReader::new(file), path)?;
    tracing::info!(path = %path.display(), rows = table.row_count(), "loaded table");
    Ok(table)
}

/// Parse CSV from a string (useful for testing)
pub fn parse_table_str(content: &str, source_name: &str) -> Result<Table> {
    read_from(content.as_bytes(), Path::new(source_name))
}

fn read_from<R: Read>(reader: R, path: &Path) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // Allow varying number of fields
        .from_reader(reader);

    let mut rows: Vec<Row> = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Table::from_rows(rows).map_err(|_| Error::CsvParse {
        path: path.to_path_buf(),
        message: "no header row found".to_string(),
    })
}

/// Locate an input file: the base directory first, then the input directory
pub fn find_input_file(name: &str, base_dir: &Path, input_dir: &Path) -> Option<PathBuf> {
    [base_dir.join(name), input_dir.join(name)]
        .into_iter()
        .find(|candidate| candidate.is_file())
}

/// Locate and load an input file
pub fn load_input(name: &str, base_dir: &Path, input_dir: &Path) -> Result<(PathBuf, Table)> {
    let path = find_input_file(name, base_dir, input_dir).ok_or_else(|| Error::InputNotFound {
        name: name.to_string(),
        searched: vec![base_dir.to_path_buf(), input_dir.to_path_buf()],
    })?;
    let table = read_table(&path)?;
    Ok((path, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row;
    use std::fs;

    #[test]
    fn test_parse_simple_csv() {
        let csv = "id,name\n1,Alice\n2,Bob\n";
        let table = parse_table_str(csv, "test.csv").unwrap();

        assert_eq!(table.header(), &row(&["id", "name"]));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.data_rows()[1], row(&["2", "Bob"]));
    }

    #[test]
    fn test_parse_keeps_ragged_rows() {
        let csv = "id,name,city\n1\n2,Bob,LA,extra\n";
        let table = parse_table_str(csv, "test.csv").unwrap();

        assert_eq!(table.data_rows()[0].len(), 1);
        assert_eq!(table.data_rows()[1].len(), 4);
    }

    #[test]
    fn test_parse_does_not_trim() {
        let csv = "id,name\n 1 ,  Alice\n";
        let table = parse_table_str(csv, "test.csv").unwrap();

        assert_eq!(table.data_rows()[0], row(&[" 1 ", "  Alice"]));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let csv = "id,note\n1,\"hello, world\"\n2,\"say \"\"hi\"\"\"\n";
        let table = parse_table_str(csv, "test.csv").unwrap();

        assert_eq!(table.data_rows()[0][1], "hello, world");
        assert_eq!(table.data_rows()[1][1], "say \"hi\"");
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_table_str("id,name\n", "test.csv").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_parse_empty_input_fails() {
        let err = parse_table_str("", "empty.csv").unwrap_err();
        assert!(matches!(err, Error::CsvParse { .. }));
    }

    #[test]
    fn test_find_input_prefers_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("input");
        fs::create_dir_all(&input_dir).unwrap();
        fs::write(dir.path().join("a.csv"), "id\n1\n").unwrap();
        fs::write(input_dir.join("a.csv"), "id\n2\n").unwrap();
        fs::write(input_dir.join("b.csv"), "id\n3\n").unwrap();

        assert_eq!(
            find_input_file("a.csv", dir.path(), &input_dir),
            Some(dir.path().join("a.csv"))
        );
        assert_eq!(
            find_input_file("b.csv", dir.path(), &input_dir),
            Some(input_dir.join("b.csv"))
        );
        assert_eq!(find_input_file("c.csv", dir.path(), &input_dir), None);
    }

    #[test]
    fn test_load_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_input("nope.csv", dir.path(), &dir.path().join("input")).unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
    }

    #[test]
    fn test_load_input_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.csv"), "id,name\n1,Alice\n").unwrap();

        let (path, table) = load_input("a.csv", dir.path(), &dir.path().join("input")).unwrap();
        assert_eq!(path, dir.path().join("a.csv"));
        assert_eq!(table.row_count(), 1);
    }
}
