use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::error::{PredictionError, PredictionResult};
use crate::report::formatter::TableRow;
use crate::utils::io::is_json;

/// Writes the result table as JSON when the path ends in `.json`, CSV otherwise.
pub fn write_table(table: &[TableRow], path: &Path) -> PredictionResult<()> {
    if is_json(path) {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, table).map_err(|e| {
            if e.is_io() {
                PredictionError::Io(e.into())
            } else {
                PredictionError::serialization(e.to_string())
            }
        })?;
    } else {
        let mut wtr = Writer::from_path(path)?;
        if table.is_empty() {
            wtr.write_record(["Date", "Predicted Passenger"])?;
        }
        for row in table {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    }

    info!(path = %path.display(), rows = table.len(), "result table written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow { date: "01-01-2020".into(), predicted_passenger: 100 },
            TableRow { date: "02-01-2020".into(), predicted_passenger: 200 },
        ]
    }

    #[test]
    fn csv_has_display_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_table(&rows(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Date,Predicted Passenger\n01-01-2020,100\n02-01-2020,200\n"
        );
    }

    #[test]
    fn empty_csv_keeps_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_table(&[], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Date,Predicted Passenger\n");
    }

    #[test]
    fn json_extension_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("OUT.JSON");
        write_table(&rows(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.trim_start().starts_with('['));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(matches!(write_table(&rows(), &path), Err(PredictionError::Io(_))));
    }

    #[test]
    fn json_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_table(&rows(), &path).unwrap();
        let back: Vec<TableRow> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, rows());
    }
}
