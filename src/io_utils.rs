//! I/O utilities: encoding resolution, delimiter defaults, line reading,
//! and statement output.
//!
//! All file I/O in csv-sqlgen flows through this module. Input is decoded
//! with `encoding_rs` (UTF-8 by default) and handed to the generator as a
//! plain sequence of lines; the `-` path convention routes through standard
//! streams on both sides.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: char = ',';
pub const DEFAULT_TSV_DELIMITER: char = '\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<char>) -> char {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

/// Reads the whole input (file or stdin for `-`), decodes it with the
/// selected encoding, and splits it into lines.
pub fn read_lines(path: &Path, encoding: &'static Encoding) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    if is_dash(path) {
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Reading from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut bytes)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    let text = decode_bytes(&bytes, encoding)?;
    Ok(text.lines().map(|line| line.to_string()).collect())
}

/// Writes one statement per line to the output file, or stdout when no
/// path (or `-`) is given.
pub fn write_statements(path: Option<&Path>, statements: &[String]) -> Result<()> {
    let mut writer: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(std::io::stdout().lock()),
    };
    for sql in statements {
        writeln!(writer, "{sql}").context("Writing SQL statement")?;
    }
    writer.flush().context("Flushing SQL output")
}
