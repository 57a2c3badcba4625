//! Vector file ingestion.
//!
//! Two layouts are supported:
//!
//! - **CSV**: `id,name,"[v1 v2 ...]"` rows. Rows with an empty first column
//!   are skipped. The vector column is a bracketed, whitespace-separated
//!   float list and may span several lines inside quotes.
//! - **Space-delimited**: a header line followed by `name v1 v2 ...` lines,
//!   the word2vec text layout.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::{DatasetError, DatasetResult, Vector};

/// Layout of a vector file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorFileFormat {
    Csv,
    Space,
}

impl VectorFileFormat {
    /// Guesses the layout from the file extension: `.csv` is CSV, anything
    /// else is space-delimited.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Space,
        }
    }
}

impl FromStr for VectorFileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "space" | "txt" => Ok(Self::Space),
            other => Err(format!("unknown vector file format {other:?}")),
        }
    }
}

/// Loads names and vectors from `path` in the given layout.
pub fn load_vector_file(
    path: &Path,
    format: VectorFileFormat,
) -> DatasetResult<(Vec<String>, Vec<Vec<f64>>)> {
    let (names, data) = match format {
        VectorFileFormat::Csv => load_vector_file_by_csv(path)?,
        VectorFileFormat::Space => load_vector_file_by_space(path)?,
    };
    tracing::debug!(path = %path.display(), ?format, vectors = names.len(), "dataset: loaded vector file");
    Ok((names, data))
}

/// Loads a CSV vector file.
pub fn load_vector_file_by_csv(path: &Path) -> DatasetResult<(Vec<String>, Vec<Vec<f64>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut names = Vec::new();
    let mut data = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        if record.get(0).unwrap_or_default().is_empty() {
            continue;
        }
        let (Some(name), Some(values)) = (record.get(1), record.get(2)) else {
            return Err(load_error(path, line, "expected at least 3 columns"));
        };

        names.push(name.to_string());
        data.push(parse_bracketed_floats(values).map_err(|reason| load_error(path, line, reason))?);
    }
    Ok((names, data))
}

/// Loads a space-delimited vector file. The first line is a header.
pub fn load_vector_file_by_space(path: &Path) -> DatasetResult<(Vec<String>, Vec<Vec<f64>>)> {
    let reader = BufReader::new(File::open(path)?);

    let mut names = Vec::new();
    let mut data = Vec::new();
    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };

        let values = tokens
            .map(parse_float)
            .collect::<Result<Vec<f64>, String>>()
            .map_err(|reason| load_error(path, i + 1, reason))?;
        names.push(name.to_string());
        data.push(values);
    }
    Ok((names, data))
}

/// Builds unlabeled vectors from parallel name and data lists.
/// Extra entries of the longer list are dropped.
pub fn vectors_from_pairs(names: Vec<String>, data: Vec<Vec<f64>>) -> Vec<Vector> {
    names
        .into_iter()
        .zip(data)
        .map(|(name, data)| Vector::new(name, data))
        .collect()
}

/// Parses `"[0.1 0.2\n 0.3]"`.
fn parse_bracketed_floats(s: &str) -> Result<Vec<f64>, String> {
    let s = s.trim();
    let s = s.strip_prefix('[').unwrap_or(s);
    let s = s.strip_suffix(']').unwrap_or(s);
    s.split_whitespace().map(parse_float).collect()
}

fn parse_float(token: &str) -> Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|_| format!("invalid number {token:?}"))
}

fn load_error(path: &Path, line: usize, reason: impl Into<String>) -> DatasetError {
    DatasetError::Load {
        path: path.display().to_string(),
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn csv_file() {
        let f = write_temp(
            ".csv",
            "0,apple,\"[0.1 0.2\n 0.3]\"\n,skipped,[9 9 9]\n1,pear,[1.5  -2e-3 4]\n",
        );
        let (names, data) = load_vector_file_by_csv(f.path()).unwrap();
        assert_eq!(names, vec!["apple", "pear"]);
        assert_eq!(data, vec![vec![0.1, 0.2, 0.3], vec![1.5, -0.002, 4.0]]);
    }

    #[test]
    fn csv_bad_number() {
        let f = write_temp(".csv", "0,apple,[0.1 x]\n");
        let err = load_vector_file_by_csv(f.path()).unwrap_err();
        match err {
            DatasetError::Load { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("\"x\""), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn csv_missing_column() {
        let f = write_temp(".csv", "0,apple\n");
        assert!(matches!(
            load_vector_file_by_csv(f.path()),
            Err(DatasetError::Load { .. })
        ));
    }

    #[test]
    fn space_file() {
        let f = write_temp(".txt", "3 2\nking 0.5 0.25\n  queen 0.5 0.3 \n\nman -1 1e-5\n");
        let (names, data) = load_vector_file_by_space(f.path()).unwrap();
        assert_eq!(names, vec!["king", "queen", "man"]);
        assert_eq!(data[0], vec![0.5, 0.25]);
        assert_eq!(data[1], vec![0.5, 0.3]);
        assert_eq!(data[2], vec![-1.0, 1e-5]);
    }

    #[test]
    fn space_bad_number_reports_line() {
        let f = write_temp(".txt", "header\nok 1 2\nbad 1 two\n");
        match load_vector_file_by_space(f.path()).unwrap_err() {
            DatasetError::Load { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn load_by_detected_format() {
        let f = write_temp(".csv", "0,a,[1 2]\n");
        let format = VectorFileFormat::from_path(f.path());
        assert_eq!(format, VectorFileFormat::Csv);
        let (names, _) = load_vector_file(f.path(), format).unwrap();
        assert_eq!(names, vec!["a"]);

        assert_eq!(
            VectorFileFormat::from_path(Path::new("glove.txt")),
            VectorFileFormat::Space
        );
        assert_eq!("CSV".parse::<VectorFileFormat>(), Ok(VectorFileFormat::Csv));
        assert!("yaml".parse::<VectorFileFormat>().is_err());
    }

    #[test]
    fn pairs_to_vectors() {
        let vectors = vectors_from_pairs(
            vec!["a".into(), "b".into()],
            vec![vec![1.0], vec![2.0], vec![3.0]],
        );
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1].name, "b");
        assert!(vectors.iter().all(|v| v.category.is_empty() && v.color.is_empty()));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_vector_file_by_space(Path::new("/nonexistent/vectors.txt")),
            Err(DatasetError::Io(_))
        ));
    }
}
