//! Quote-aware row splitting for the raw feed text
//!
//! Purely syntactic: no header/data distinction happens here. The published
//! export quotes fields containing commas, newlines or quotes, and escapes a
//! quote inside a quoted field as two consecutive quote characters.

/// Split raw delimited text into rows of fields.
///
/// Line terminators `\n`, `\r` and `\r\n` all end a row outside quotes. A row
/// consisting of a single empty field is discarded, so a trailing newline does
/// not produce a spurious empty row; rows with more than one field, or a
/// single non-empty field, are kept.
///
/// Malformed quoting is not rejected: an unterminated quote keeps the rest of
/// the input in the current field, matching how the sheet export behaves when
/// an editor leaves a stray quote in a cell.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                field.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }

        if ch == ',' && !in_quotes {
            row.push(std::mem::take(&mut field));
            continue;
        }

        if (ch == '\n' || ch == '\r') && !in_quotes {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            row.push(std::mem::take(&mut field));
            flush_row(&mut rows, &mut row);
            continue;
        }

        field.push(ch);
    }

    row.push(field);
    flush_row(&mut rows, &mut row);

    rows
}

fn flush_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    if row.len() > 1 || !row[0].is_empty() {
        rows.push(std::mem::take(row));
    } else {
        row.clear();
    }
}
