//! INSERT statement assembly.
//!
//! Renders a window of validated rows into one `INSERT` statement. Two axes
//! are configuration-selected: cardinality (one row vs a multi-value window)
//! is chosen by the caller through the window it passes, and layout (compact
//! vs indented) is chosen by [`StatementStyle`]. Indented layout wraps the
//! column and value lists one-per-line only when the column count exceeds
//! [`INDENT_THRESHOLD`]; narrower statements stay on one line.

use anyhow::{Result, bail};

use crate::value::SqlValue;

/// Column count above which `format_sql` switches to one-per-line layout.
pub const INDENT_THRESHOLD: usize = 5;

#[derive(Debug, Clone)]
pub struct StatementStyle {
    pub quote_identifiers: bool,
    pub format_sql: bool,
    pub indent_unit: String,
}

impl Default for StatementStyle {
    fn default() -> Self {
        Self {
            quote_identifiers: false,
            format_sql: false,
            indent_unit: "  ".to_string(),
        }
    }
}

/// Wraps an identifier in backticks when quoting is enabled. Purely
/// textual: the identifier itself is not validated.
pub fn quote_identifier(name: &str, quote: bool) -> String {
    if quote {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}

/// Renders one `INSERT` for the given rows. A row whose field count does
/// not match the column count violates the collector's contract and fails
/// this statement only.
pub fn render_insert(
    table: &str,
    columns: &[String],
    rows: &[Vec<String>],
    style: &StatementStyle,
) -> Result<String> {
    for row in rows {
        if row.len() != columns.len() {
            bail!(
                "row has {} value(s) for {} column(s)",
                row.len(),
                columns.len()
            );
        }
    }

    let quoted: Vec<String> = columns
        .iter()
        .map(|c| quote_identifier(c, style.quote_identifiers))
        .collect();
    let table = quote_identifier(table, style.quote_identifiers);

    let mut sql = String::new();
    sql.push_str("INSERT INTO ");
    sql.push_str(&table);

    if style.format_sql && columns.len() > INDENT_THRESHOLD {
        sql.push_str(" (\n");
        push_wrapped(&mut sql, &quoted, &style.indent_unit);
        sql.push_str("\n) VALUES ");
        for (idx, row) in rows.iter().enumerate() {
            if idx > 0 {
                sql.push_str(", ");
            }
            sql.push_str("(\n");
            push_wrapped(&mut sql, &render_values(row), &style.indent_unit);
            sql.push_str("\n)");
        }
    } else {
        sql.push_str(" (");
        sql.push_str(&quoted.join(", "));
        sql.push_str(") VALUES ");
        for (idx, row) in rows.iter().enumerate() {
            if idx > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            sql.push_str(&render_values(row).join(", "));
            sql.push(')');
        }
    }
    sql.push(';');
    Ok(sql)
}

fn render_values(row: &[String]) -> Vec<String> {
    row.iter()
        .map(|raw| SqlValue::classify(raw).to_string())
        .collect()
}

fn push_wrapped(sql: &mut String, items: &[String], indent_unit: &str) {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            sql.push_str(",\n");
        }
        sql.push_str(indent_unit);
        sql.push_str(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_row_compact_statement() {
        let sql = render_insert(
            "users",
            &strings(&["id", "name", "age"]),
            &[strings(&["1", "John Doe", "30"])],
            &StatementStyle::default(),
        )
        .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO users (id, name, age) VALUES (1, 'John Doe', 30);"
        );
    }

    #[test]
    fn batched_rows_join_value_tuples() {
        let sql = render_insert(
            "users",
            &strings(&["id", "name"]),
            &[strings(&["1", "a"]), strings(&["2", "b"])],
            &StatementStyle::default(),
        )
        .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO users (id, name) VALUES (1, 'a'), (2, 'b');"
        );
    }

    #[test]
    fn quoted_identifiers_wrap_table_and_columns() {
        let style = StatementStyle {
            quote_identifiers: true,
            ..StatementStyle::default()
        };
        let sql = render_insert(
            "users",
            &strings(&["id", "name"]),
            &[strings(&["1", "a"])],
            &style,
        )
        .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `users` (`id`, `name`) VALUES (1, 'a');"
        );
    }

    #[test]
    fn formatted_layout_stays_compact_at_five_columns_or_fewer() {
        let style = StatementStyle {
            format_sql: true,
            ..StatementStyle::default()
        };
        let sql = render_insert(
            "t",
            &strings(&["a", "b", "c", "d", "e"]),
            &[strings(&["1", "2", "3", "4", "5"])],
            &style,
        )
        .unwrap();
        assert!(!sql.contains('\n'));
    }

    #[test]
    fn formatted_layout_wraps_wide_statements() {
        let style = StatementStyle {
            format_sql: true,
            indent_unit: "  ".to_string(),
            ..StatementStyle::default()
        };
        let sql = render_insert(
            "t",
            &strings(&["a", "b", "c", "d", "e", "f"]),
            &[strings(&["1", "2", "3", "4", "5", "6"])],
            &style,
        )
        .unwrap();
        let expected = "INSERT INTO t (\n  a,\n  b,\n  c,\n  d,\n  e,\n  f\n) VALUES (\n  1,\n  2,\n  3,\n  4,\n  5,\n  6\n);";
        assert_eq!(sql, expected);
    }

    #[test]
    fn formatted_layout_honours_custom_indent_unit() {
        let style = StatementStyle {
            format_sql: true,
            indent_unit: "\t".to_string(),
            ..StatementStyle::default()
        };
        let sql = render_insert(
            "t",
            &strings(&["a", "b", "c", "d", "e", "f"]),
            &[strings(&["1", "2", "3", "4", "5", "6"])],
            &style,
        )
        .unwrap();
        assert!(sql.contains("\n\ta,"));
    }

    #[test]
    fn value_count_mismatch_fails_the_statement() {
        let result = render_insert(
            "users",
            &strings(&["id", "name"]),
            &[strings(&["1"])],
            &StatementStyle::default(),
        );
        assert!(result.is_err());
    }
}
