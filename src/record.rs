//! Measurement rows: `<producers> <consumers> <time>`.
//!
//! Files are produced by appending one `"%d %d %lf\n"` line per
//! benchmark run.  Fields are separated by any run of whitespace and
//! blank lines are ignored.

use std::{fs, path::Path, str::FromStr};
use tracing::debug;

use crate::error::RenderError;

/// One benchmark measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Number of producer threads, the grouping key.
    pub producer_count: i64,
    /// Number of consumer threads, plotted on the x-axis.
    pub consumer_count: i64,
    /// Average waiting time in microseconds, plotted on the y-axis.
    pub time: f64,
}

/// Why a single row could not be turned into a [`Record`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),
    #[error("{field} must be an integer, got {token:?}")]
    Integer { field: &'static str, token: String },
    #[error("time must be a number, got {0:?}")]
    Time(String),
    #[error("time must be finite, got {0:?}")]
    NonFinite(String),
    #[error("row is not valid UTF-8")]
    Encoding,
}

fn integer(field: &'static str, token: &str) -> Result<i64, RowError> {
    token.parse().map_err(|_| RowError::Integer {
        field,
        token: token.to_owned(),
    })
}

impl FromStr for Record {
    type Err = RowError;

    fn from_str(row: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = row.split_whitespace().collect();
        let &[p, q, t] = fields.as_slice() else {
            return Err(RowError::FieldCount(fields.len()));
        };
        let producer_count = integer("producer count", p)?;
        let consumer_count = integer("consumer count", q)?;
        let time: f64 = t.parse().map_err(|_| RowError::Time(t.to_owned()))?;
        if !time.is_finite() {
            return Err(RowError::NonFinite(t.to_owned()));
        }
        Ok(Record { producer_count, consumer_count, time })
    }
}

/// Parse every non-blank line of `text`, keeping source order.
///
/// Fails on the first malformed row, or with [`RenderError::NoData`]
/// if `text` holds no row at all.
pub fn parse_records(text: &str) -> Result<Vec<Record>, RenderError> {
    parse_bytes(text.as_bytes())
}

/// Like [`parse_records`], decoding each line as UTF-8.  A leading
/// byte order mark is skipped.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<Record>, RenderError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut records: Vec<Record> = Vec::new();
    for (i, raw) in bytes.split(|&b| b == b'\n').enumerate() {
        let parse_error = |reason| RenderError::Parse {
            line: i + 1,
            content: String::from_utf8_lossy(raw).trim().to_owned(),
            reason,
        };
        let line = std::str::from_utf8(raw)
            .map_err(|_| parse_error(RowError::Encoding))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(line.parse::<Record>().map_err(parse_error)?);
    }
    if records.is_empty() {
        return Err(RenderError::NoData);
    }
    Ok(records)
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read and parse the whole file at `path`.
pub fn load(path: &Path) -> Result<Vec<Record>, RenderError> {
    let bytes = fs::read(path).map_err(|source| {
        RenderError::FileNotFound { path: path.to_path_buf(), source }
    })?;
    let records = parse_bytes(&bytes)?;
    debug!(path = %path.display(), rows = records.len(), "loaded measurements");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn rec(p: i64, q: i64, t: f64) -> Record {
        Record { producer_count: p, consumer_count: q, time: t }
    }

    #[test]
    fn parses_benchmark_output() {
        let text = "1 1 100.000000\n1 2 150.500000\n2 1 90\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records, vec![rec(1, 1, 100.), rec(1, 2, 150.5), rec(2, 1, 90.)]);
    }

    #[test]
    fn any_whitespace_separates_fields() {
        let records = parse_records("  4\t 8    1e3 \r\n\n   \n3 2 7.25").unwrap();
        assert_eq!(records, vec![rec(4, 8, 1000.), rec(3, 2, 7.25)]);
    }

    #[test]
    fn field_count_is_checked() {
        assert_eq!("1 2".parse::<Record>(), Err(RowError::FieldCount(2)));
        assert_eq!("1 2 3 4".parse::<Record>(), Err(RowError::FieldCount(4)));
    }

    #[test]
    fn tokens_must_be_numeric() {
        assert_eq!("1 2 abc".parse::<Record>(), Err(RowError::Time("abc".into())));
        assert!(matches!("1.5 2 3".parse::<Record>(),
                         Err(RowError::Integer { field: "producer count", .. })));
        assert!(matches!("1 x 3".parse::<Record>(),
                         Err(RowError::Integer { field: "consumer count", .. })));
        assert_eq!("1 2 nan".parse::<Record>(), Err(RowError::NonFinite("nan".into())));
    }

    #[test]
    fn malformed_row_reports_its_line() {
        let err = parse_records("1 1 100\n\n1 2 abc\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        match err {
            RenderError::Parse { line, content, .. } => {
                assert_eq!(line, 3);
                assert_eq!(content, "1 2 abc");
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        for text in ["", "\n\n", "  \t \n"] {
            let err = parse_records(text).unwrap_err();
            assert!(matches!(err, RenderError::NoData));
            assert_eq!(err.kind(), ErrorKind::Parse);
        }
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, b"1 1 100\n1 2 \xff\n").unwrap();
        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        match err {
            RenderError::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert_eq!(reason, RowError::Encoding);
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn leading_bom_is_skipped() {
        let records = parse_records("\u{feff}1 1 100\n2 1 90\n").unwrap();
        assert_eq!(records, vec![rec(1, 1, 100.), rec(2, 1, 90.)]);
        // Only at the very start of the input.
        let err = parse_records("1 1 100\n\u{feff}2 1 90\n").unwrap_err();
        assert!(matches!(err, RenderError::Parse { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}
