//! CSV ingest of continuous datasets.
//!
//! Format:
//! - one header row with unique, non-empty variable names
//! - one numeric value per variable in every data row
//!
//! Unlike a lenient screen, a stability run needs every row intact, so the
//! first bad cell aborts the load with its line and column.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::data::DataSet;
use crate::domain::Node;
use crate::error::AppError;

/// Load a dataset from a delimited text file.
pub fn load_dataset(path: &Path, delimiter: u8) -> Result<DataSet, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::config(format!("Failed to open data file '{}': {e}", path.display()))
    })?;
    read_dataset(file, delimiter)
}

pub fn read_dataset<R: Read>(input: R, delimiter: u8) -> Result<DataSet, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::config(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let variables = parse_headers(&headers)?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: 1-based lines, after the header.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::config(format!("CSV parse error on line {line}: {e}")))?;
        rows.push(parse_row(&record, &variables, line)?);
    }

    if rows.is_empty() {
        return Err(AppError::new(3, "Data file has a header but no data rows."));
    }

    DataSet::from_rows(variables, &rows)
}

fn parse_headers(headers: &StringRecord) -> Result<Vec<Node>, AppError> {
    if headers.is_empty() {
        return Err(AppError::config("Data file has no header row."));
    }
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
            let name = name.trim().trim_start_matches('\u{feff}');
            if name.is_empty() {
                Err(AppError::config(format!("Header column {} is empty.", idx + 1)))
            } else {
                Ok(Node::new(name))
            }
        })
        .collect()
}

fn parse_row(record: &StringRecord, variables: &[Node], line: usize) -> Result<Vec<f64>, AppError> {
    record
        .iter()
        .zip(variables)
        .map(|(cell, var)| {
            cell.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    AppError::config(format!(
                        "Line {line}, column '{var}': '{cell}' is not a finite number."
                    ))
                })
        })
        .collect()
}

/// Write a dataset as CSV with a header row.
pub fn write_dataset(path: &Path, data: &DataSet) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::config(format!("Failed to create data file '{}': {e}", path.display()))
    })?;

    writer
        .write_record(data.variables().iter().map(|v| v.name()))
        .map_err(|e| AppError::config(format!("Failed to write CSV header: {e}")))?;

    for r in 0..data.num_rows() {
        let row = (0..data.num_columns()).map(|c| data.value(r, c).to_string());
        writer
            .write_record(row)
            .map_err(|e| AppError::config(format!("Failed to write CSV row {}: {e}", r + 1)))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::config(format!("Failed to flush data file: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let csv = "\u{feff}x, y ,z\n1,2,3\n4.5,-1e-3,0\n";
        let data = read_dataset(csv.as_bytes(), b',').unwrap();
        let names: Vec<&str> = data.variables().iter().map(|v| v.name()).collect();
        assert_eq!(names, ["x", "y", "z"]);
        assert_eq!(data.num_rows(), 2);
        assert_eq!(data.value(1, 1), -1e-3);
    }

    #[test]
    fn reads_tab_delimited() {
        let data = read_dataset("a\tb\n1\t2\n".as_bytes(), b'\t').unwrap();
        assert_eq!(data.num_columns(), 2);
    }

    #[test]
    fn non_numeric_cell_names_line_and_column() {
        let err = read_dataset("a,b\n1,2\n3,oops\n".as_bytes(), b',').unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("Line 3"));
        assert!(err.message().contains("'b'"));
    }

    #[test]
    fn ragged_rows_and_empty_data_are_errors() {
        assert_eq!(read_dataset("a,b\n1\n".as_bytes(), b',').unwrap_err().exit_code(), 2);
        assert_eq!(read_dataset("a,b\n".as_bytes(), b',').unwrap_err().exit_code(), 3);
        assert_eq!(read_dataset("a,\n1,2\n".as_bytes(), b',').unwrap_err().exit_code(), 2);
    }

    #[test]
    fn write_then_load_preserves_values() {
        let data = DataSet::from_rows(
            vec![Node::new("p"), Node::new("q")],
            &[vec![0.1, 2.0], vec![-3.25, 1e-9]],
        )
        .unwrap();
        let path = std::env::temp_dir().join(format!("cstar_ingest_{}.csv", std::process::id()));
        write_dataset(&path, &data).unwrap();
        let loaded = load_dataset(&path, b',').unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, data);
    }
}
