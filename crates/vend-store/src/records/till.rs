//! `Currency.txt`: one `denomination count` pair per line.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use vend_core::{Denomination, Till};

use super::records;
use crate::error::{StoreError, StoreResult};

/// Parses a till. `path` is only used for error messages.
///
/// ## Errors
/// - `Parse` for anything but two non-negative integers
/// - `Invalid` for a zero denomination
/// - `DuplicateDenomination` when a face value repeats
pub fn parse_till(text: &str, path: &Path) -> StoreResult<Till> {
    let mut seen = BTreeSet::new();
    let mut pairs = Vec::new();

    for (line, record) in records(text) {
        let tokens: Vec<&str> = record.split_whitespace().collect();
        let [face, count] = tokens.as_slice() else {
            return Err(StoreError::parse(
                path,
                line,
                format!("expected 'denomination count', got '{}'", record),
            ));
        };

        let face: u32 = face.parse().map_err(|_| {
            StoreError::parse(path, line, format!("invalid denomination '{}'", face))
        })?;
        let denomination =
            Denomination::new(face).map_err(|e| StoreError::invalid(path, line, e))?;
        let count: u32 = count
            .parse()
            .map_err(|_| StoreError::parse(path, line, format!("invalid count '{}'", count)))?;

        if !seen.insert(denomination) {
            return Err(StoreError::DuplicateDenomination {
                path: path.to_path_buf(),
                line,
                denomination,
            });
        }
        pairs.push((denomination, count));
    }

    Ok(Till::from_counts(pairs))
}

/// Renders a till, ascending by denomination, zero counts included.
pub fn format_till(till: &Till) -> String {
    let mut out = String::new();
    for (denomination, count) in till.iter() {
        let _ = writeln!(out, "{} {}", denomination, count);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    fn path() -> &'static Path {
        Path::new("Currency.txt")
    }

    #[test]
    fn test_parse_keeps_exhausted_denominations() {
        let till = parse_till("200 1\n1 0\n\n5 3\n", path()).unwrap();
        assert_eq!(till, Till::from_counts([(d(1), 0), (d(5), 3), (d(200), 1)]));
        assert!(till.recognizes(d(1)));
    }

    #[test]
    fn test_format_is_ascending() {
        let till = Till::from_counts([(d(10), 2), (d(1), 0), (d(5), 7)]);
        assert_eq!(format_till(&till), "1 0\n5 7\n10 2\n");
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_till("1 5\n5\n", path()).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 2, .. }));

        let err = parse_till("1 -3\n", path()).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 1, .. }));

        let err = parse_till("0 3\n", path()).unwrap_err();
        assert!(matches!(err, StoreError::Invalid { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_denomination_rejected() {
        let err = parse_till("5 1\n10 2\n5 4\n", path()).unwrap_err();
        match err {
            StoreError::DuplicateDenomination {
                line, denomination, ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(denomination, d(5));
            }
            other => panic!("expected DuplicateDenomination, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_is_empty_till() {
        let till = parse_till("# nothing yet\n", path()).unwrap();
        assert_eq!(till.denomination_count(), 0);
    }
}
