//! Data-row collection and arity validation.
//!
//! Tokenizes each data line and keeps only rows whose field count matches
//! the header arity. Mismatches are recoverable: each produces a
//! line-numbered [`RowError`], the row is skipped, and the run continues.

use log::warn;
use thiserror::Error;

use crate::tokenize;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line}: expected {expected} field(s) but found {actual}")]
pub struct RowError {
    /// 1-based source line number.
    pub line: usize,
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, Default)]
pub struct Collected {
    pub rows: Vec<Vec<String>>,
    pub errors: Vec<RowError>,
}

/// Consumes numbered data lines (post-header), keeping validated rows in
/// input order. A header-only input yields zero rows and zero errors.
pub fn collect_rows<'a, I>(lines: I, arity: usize, delimiter: char) -> Collected
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut collected = Collected::default();
    for (number, line) in lines {
        let fields = tokenize::tokenize(line, delimiter);
        if fields.len() != arity {
            warn!(
                "Skipping line {number}: expected {arity} field(s) but found {}",
                fields.len()
            );
            collected.errors.push(RowError {
                line: number,
                expected: arity,
                actual: fields.len(),
            });
            continue;
        }
        collected.rows.push(fields);
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(lines: &[&'static str]) -> Vec<(usize, &'static str)> {
        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| (idx + 2, *line))
            .collect()
    }

    #[test]
    fn valid_rows_are_kept_in_input_order() {
        let collected = collect_rows(numbered(&["1,a", "2,b", "3,c"]), 2, ',');
        assert!(collected.errors.is_empty());
        assert_eq!(
            collected.rows,
            vec![vec!["1", "a"], vec!["2", "b"], vec!["3", "c"]]
        );
    }

    #[test]
    fn arity_mismatch_is_recorded_and_skipped() {
        let collected = collect_rows(numbered(&["1,a,x", "2,b", "3,c,y,z"]), 3, ',');
        assert_eq!(collected.rows, vec![vec!["1", "a", "x"]]);
        assert_eq!(
            collected.errors,
            vec![
                RowError {
                    line: 3,
                    expected: 3,
                    actual: 2
                },
                RowError {
                    line: 4,
                    expected: 3,
                    actual: 4
                },
            ]
        );
    }

    #[test]
    fn rows_after_a_bad_row_are_still_collected() {
        let collected = collect_rows(numbered(&["only-one", "1,b"]), 2, ',');
        assert_eq!(collected.rows, vec![vec!["1", "b"]]);
        assert_eq!(collected.errors.len(), 1);
    }

    #[test]
    fn no_data_lines_yields_empty_result() {
        let collected = collect_rows(Vec::new(), 3, ',');
        assert!(collected.rows.is_empty());
        assert!(collected.errors.is_empty());
    }

    #[test]
    fn row_error_formats_with_line_number_and_counts() {
        let err = RowError {
            line: 7,
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "line 7: expected 3 field(s) but found 2"
        );
    }
}
