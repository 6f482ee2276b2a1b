use crate::error::MushafError;
use crate::metadata::Table;

/// Read delimited text (header row first) into a [`Table`].
///
/// Fields are trimmed and blank lines skipped. A row whose field count
/// differs from the header, or an unterminated quoted field, fails the
/// whole read.
pub fn read_delimited(bytes: &[u8], delimiter: u8) -> Result<Table, MushafError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    // Well-formed quoting always uses quote characters in pairs (open/close
    // or an escaped ""), so an odd count means a field was never closed.
    // Quoting is strict: a bare `"` inside an unquoted field (`12"`) is
    // rejected too, even though csv alone would accept it.
    if bytes.iter().filter(|&&b| b == b'"').count() % 2 != 0 {
        return Err(MushafError::Parse("unterminated quoted field".into()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| MushafError::Parse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(MushafError::Parse("missing header row".into()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| MushafError::Parse(e.to_string()))?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}
