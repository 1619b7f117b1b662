//! Tolerant parsing of pasted CSV / TSV text into rows of cells.
//!
//! Spreadsheet copy-paste produces tab-separated text, exported files are
//! usually comma-separated with RFC 4180 style quoting. The first line decides.

pub type Row = Vec<String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Tab anywhere on the first line means TSV, everything else is CSV.
pub fn detect_delimiter(raw: &str) -> Delimiter {
    let first_line = raw.split('\n').next().unwrap_or("");
    if first_line.contains('\t') {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

pub fn parse(raw: &str) -> Vec<Row> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let delimiter = detect_delimiter(raw);
    let rows = match delimiter {
        Delimiter::Tab => parse_tsv(raw),
        Delimiter::Comma => parse_csv(raw),
    };
    log::debug!("tabular: {} rows ({delimiter:?})", rows.len());
    rows
}

/// Plain split, no quoting. Blank lines are skipped.
pub fn parse_tsv(raw: &str) -> Vec<Row> {
    raw.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}

/// Quote-aware scan. Quoted cells may hold commas, newlines and `""` escapes.
pub fn parse_csv(raw: &str) -> Vec<Row> {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    cell.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => cell.push(ch),
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut cell)),
                '\n' => {
                    row.push(std::mem::take(&mut cell));
                    rows.push(std::mem::take(&mut row));
                }
                _ => cell.push(ch),
            }
        }
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}
