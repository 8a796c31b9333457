use super::LoadError;

/// Which tokenizer to use on spreadsheet exports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CsvDialect {
    /// Quote-toggle scanner. Compatible with the published dataset; cannot
    /// represent a literal `"` inside a field.
    #[default]
    Naive,
    /// RFC 4180 parsing (doubled quotes, quoted newlines).
    Strict,
}

pub fn parse(text: &str, dialect: CsvDialect) -> Result<Vec<Vec<String>>, LoadError> {
    match dialect {
        CsvDialect::Naive => Ok(parse_naive(text)),
        CsvDialect::Strict => parse_strict(text),
    }
}

/// Splits on newlines, skips blank lines, and splits each line on commas that
/// are not between quotes. Quote characters only flip the in-quotes flag and
/// never reach the output; fields are trimmed.
pub fn parse_naive(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn parse_strict(text: &str) -> Result<Vec<Vec<String>>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::CsvDecode { source })?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
