//! CSV parsing for published-sheet exports.
//!
//! Spreadsheet CSV exports are dirty: BOM prefixes, CRLF and bare-CR line
//! endings, quoted cells with embedded commas and newlines, and the odd
//! unbalanced quote. The parser never fails; it returns a best-effort table
//! and leaves header interpretation to the mapping layer.

/// Parse raw CSV text into rows of trimmed cells.
///
/// Double-quoted cells may contain commas and newlines; an embedded quote is
/// written as `""`. Record separators are `\r\n`, `\r`, or `\n`. A trailing
/// record without a final newline still produces a row.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    // Published exports can lead with a byte-order mark
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => {
                row.push(cell.trim().to_string());
                cell.clear();
            }
            '\r' => {
                row.push(cell.trim().to_string());
                cell.clear();
                rows.push(std::mem::take(&mut row));
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' => {
                row.push(cell.trim().to_string());
                cell.clear();
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(ch),
        }
    }
    row.push(cell.trim().to_string());
    rows.push(row);
    rows
}

/// Serialize rows back to CSV text.
///
/// Cells containing a comma, quote, or newline are quoted with internal
/// quotes doubled, so `parse(write(rows))` reproduces the table.
pub fn write(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| quote_cell(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\r\n")
}

fn quote_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
