//! Line-level field tokenizer for delimited input.
//!
//! Splits one line into raw field strings with a single-pass character scan:
//! a delimiter separates fields only outside a quoted region, `""` inside a
//! quoted region is an escaped literal quote, and an unclosed quote consumes
//! the rest of the line rather than failing it.

const BOM: char = '\u{feff}';

/// Removes a leading byte-order mark, if present. Applied to the header line
/// before tokenizing; later lines never carry one.
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix(BOM).unwrap_or(line)
}

pub fn tokenize(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                // Escaped quote ("") inside a quoted region.
                field.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(clean_field(&field));
            field.clear();
        } else {
            field.push(c);
        }
    }

    // The in-progress field always completes the line, even when a quote
    // was never closed.
    fields.push(clean_field(&field));
    fields
}

fn clean_field(field: &str) -> String {
    let trimmed = field.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}
