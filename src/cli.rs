use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate SQL INSERT statements from delimited text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a delimited file into INSERT statements
    Generate(GenerateArgs),
    /// Print the statements for the first few data rows without writing output
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Input delimited file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Target table for the generated INSERT statements
    #[arg(short = 't', long = "table")]
    pub table: String,
    /// Output SQL file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Field delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Wrap the statement sequence in START TRANSACTION / COMMIT
    #[arg(long = "transaction")]
    pub transaction: bool,
    /// Group consecutive rows into multi-value INSERT statements
    #[arg(long = "batch")]
    pub batch: bool,
    /// Rows per batched statement (requires --batch)
    #[arg(long = "batch-size", default_value_t = 1000)]
    pub batch_size: usize,
    /// Pretty-print wide statements with one column/value per line
    #[arg(long = "format")]
    pub format: bool,
    /// Indent unit used by --format
    #[arg(long = "indent", default_value = "  ")]
    pub indent: String,
    /// Quote table and column identifiers with backticks
    #[arg(long = "quote-identifiers")]
    pub quote_identifiers: bool,
    /// Rename a header column, e.g. --map legacy_id=id (repeatable)
    #[arg(long = "map", action = clap::ArgAction::Append)]
    pub map: Vec<String>,
    /// JSON file of header renames: {"old": "new"}
    #[arg(long = "mapping")]
    pub mapping: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input delimited file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Target table for the generated INSERT statements
    #[arg(short = 't', long = "table")]
    pub table: String,
    /// Number of data rows to render
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Field delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Quote table and column identifiers with backticks
    #[arg(long = "quote-identifiers")]
    pub quote_identifiers: bool,
}

pub fn parse_delimiter(value: &str) -> Result<char, String> {
    match value {
        "tab" | "\t" => Ok('\t'),
        "comma" | "," => Ok(','),
        "|" | "pipe" => Ok('|'),
        ";" | "semicolon" => Ok(';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first)
        }
    }
}
