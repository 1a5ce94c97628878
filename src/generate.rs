//! Generator facade: configuration, orchestration, and command execution.
//!
//! [`generate()`] is pure text generation: lines in, ordered statement
//! strings out. [`execute()`] and [`preview()`] wrap it with file I/O for
//! the `generate` and `preview` subcommands.

use anyhow::{Context, Result, anyhow, bail};
use encoding_rs::{Encoding, UTF_8};
use log::{error, info};

use crate::{
    cli::{GenerateArgs, PreviewArgs},
    io_utils,
    mapping::ColumnMapping,
    rows::{self, RowError},
    statement::{self, StatementStyle},
    tokenize,
};

pub const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub delimiter: char,
    pub encoding: &'static Encoding,
    pub include_transaction: bool,
    pub use_batch_insert: bool,
    pub batch_size: usize,
    pub format_sql: bool,
    pub indent_unit: String,
    pub quote_identifiers: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            delimiter: io_utils::DEFAULT_CSV_DELIMITER,
            encoding: UTF_8,
            include_transaction: false,
            use_batch_insert: false,
            batch_size: DEFAULT_BATCH_SIZE,
            format_sql: false,
            indent_unit: "  ".to_string(),
            quote_identifiers: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_args(args: &GenerateArgs) -> Result<Self> {
        let config = Self {
            delimiter: io_utils::resolve_input_delimiter(&args.input, args.delimiter),
            encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
            include_transaction: args.transaction,
            use_batch_insert: args.batch,
            batch_size: args.batch_size,
            format_sql: args.format,
            indent_unit: args.indent.clone(),
            quote_identifiers: args.quote_identifiers,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects invalid settings up front, before any input is read.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("Batch size must be greater than zero");
        }
        Ok(())
    }

    fn style(&self) -> StatementStyle {
        StatementStyle {
            quote_identifiers: self.quote_identifiers,
            format_sql: self.format_sql,
            indent_unit: self.indent_unit.clone(),
        }
    }
}

#[derive(Debug)]
pub struct GeneratedSql {
    /// Ordered statement sequence, including transaction markers.
    pub statements: Vec<String>,
    /// Recoverable row errors encountered while collecting data lines.
    pub row_errors: Vec<RowError>,
}

/// Converts input lines into an ordered sequence of SQL statements.
///
/// The first non-blank line (BOM stripped) is the header; remaining
/// non-blank lines are data rows. Rows with a field-count mismatch are
/// reported in `row_errors` and skipped, never aborting the run.
pub fn generate<S: AsRef<str>>(
    lines: &[S],
    table: &str,
    config: &GeneratorConfig,
    mapping: Option<&ColumnMapping>,
) -> Result<GeneratedSql> {
    config.validate()?;

    let mut numbered = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.as_ref()))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = numbered
        .next()
        .ok_or_else(|| anyhow!("Input contains no header line"))?;
    let headers = tokenize::tokenize(tokenize::strip_bom(header_line), config.delimiter);
    let headers = match mapping {
        Some(mapping) => mapping.apply(&headers),
        None => headers,
    };

    let collected = rows::collect_rows(numbered, headers.len(), config.delimiter);

    let mut statements = Vec::new();
    if config.include_transaction {
        statements.push("START TRANSACTION;".to_string());
    }

    let style = config.style();
    let window = if config.use_batch_insert {
        config.batch_size
    } else {
        1
    };
    for chunk in collected.rows.chunks(window) {
        match statement::render_insert(table, &headers, chunk, &style) {
            Ok(sql) => statements.push(sql),
            // Cannot happen after arity filtering; fatal for this statement only.
            Err(err) => error!("Skipping statement for table '{table}': {err}"),
        }
    }

    if config.include_transaction {
        statements.push("COMMIT;".to_string());
    }

    Ok(GeneratedSql {
        statements,
        row_errors: collected.errors,
    })
}

pub fn execute(args: &GenerateArgs) -> Result<()> {
    let config = GeneratorConfig::from_args(args)?;
    let mapping = resolve_mapping(args)?;
    info!(
        "Generating INSERT statements for table '{}' from '{}' (delimiter '{}')",
        args.table,
        args.input.display(),
        crate::printable_delimiter(config.delimiter)
    );

    let lines = io_utils::read_lines(&args.input, config.encoding)?;
    let generated = generate(&lines, &args.table, &config, mapping.as_ref())
        .with_context(|| format!("Generating SQL from {:?}", args.input))?;

    io_utils::write_statements(args.output.as_deref(), &generated.statements)?;
    info!(
        "Generated {} statement(s), skipped {} row(s)",
        generated.statements.len(),
        generated.row_errors.len()
    );
    Ok(())
}

pub fn preview(args: &PreviewArgs) -> Result<()> {
    let config = GeneratorConfig {
        delimiter: io_utils::resolve_input_delimiter(&args.input, args.delimiter),
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        quote_identifiers: args.quote_identifiers,
        ..GeneratorConfig::default()
    };

    let lines = io_utils::read_lines(&args.input, config.encoding)?;
    // Header plus the first N non-blank data lines.
    let subset: Vec<&String> = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .take(args.rows + 1)
        .collect();
    let generated = generate(&subset, &args.table, &config, None)
        .with_context(|| format!("Previewing SQL from {:?}", args.input))?;

    io_utils::write_statements(None, &generated.statements)?;
    info!(
        "Previewed {} statement(s) from {:?}",
        generated.statements.len(),
        args.input
    );
    Ok(())
}

fn resolve_mapping(args: &GenerateArgs) -> Result<Option<ColumnMapping>> {
    let mut mapping = match &args.mapping {
        Some(path) => ColumnMapping::load(path)?,
        None => ColumnMapping::default(),
    };
    let inline = ColumnMapping::from_pairs(&args.map)?;
    // Inline --map entries override file entries.
    mapping.merge(inline);
    if mapping.is_empty() {
        Ok(None)
    } else {
        info!("Applying {} column rename(s)", mapping.len());
        Ok(Some(mapping))
    }
}
