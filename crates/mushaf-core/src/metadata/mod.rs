pub mod delimited;
pub mod xlsx;

use crate::error::MushafError;
use crate::model::{LineMetadata, LineType, PageLines};
use std::path::Path;

/// Raw tabular content: a header row plus text cells, before typing.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Load the line metadata table and group it by page.
///
/// `.xlsx` files are read from their first worksheet; anything else is
/// treated as delimited text split on `delimiter`.
pub fn load_metadata(path: &Path, delimiter: u8) -> Result<PageLines, MushafError> {
    let bytes = std::fs::read(path)?;
    let is_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    let table = if is_xlsx {
        xlsx::read_xlsx(&bytes)?
    } else {
        delimited::read_delimited(&bytes, delimiter)?
    };

    let pages = parse_table(&table)?;
    let row_count: usize = pages.values().map(Vec::len).sum();
    log::info!(
        "loaded {} metadata rows for {} pages from {}",
        row_count,
        pages.len(),
        path.display()
    );
    Ok(pages)
}

/// Parse delimited metadata held in memory.
pub fn parse_metadata_str(text: &str, delimiter: u8) -> Result<PageLines, MushafError> {
    let table = delimited::read_delimited(text.as_bytes(), delimiter)?;
    parse_table(&table)
}

/// Type every row of `table` and group the rows by page number.
pub fn parse_table(table: &Table) -> Result<PageLines, MushafError> {
    let columns = Columns::from_headers(&table.headers)?;
    let mut rows = Vec::with_capacity(table.rows.len());
    for (i, cells) in table.rows.iter().enumerate() {
        // +2: one for the header row, one for 1-based numbering
        rows.push(columns.parse_row(cells, i + 2)?);
    }
    group_by_page(rows)
}

/// Group rows by page, keeping source order within a page.
///
/// Fails if a page's rows are not in non-decreasing line order, since the
/// renderer correlates rows with document paragraphs purely by position.
pub fn group_by_page(rows: Vec<LineMetadata>) -> Result<PageLines, MushafError> {
    let mut pages = PageLines::new();
    for row in rows {
        pages.entry(row.page_number).or_insert_with(Vec::new).push(row);
    }

    for (page, lines) in &pages {
        if let Some(pair) = lines
            .windows(2)
            .find(|pair| pair[1].line_number < pair[0].line_number)
        {
            return Err(MushafError::LineOrder {
                page: *page,
                line: pair[1].line_number,
            });
        }
    }

    Ok(pages)
}

/// Column positions resolved from the header row.
struct Columns {
    page_number: usize,
    line_number: usize,
    line_type: usize,
    is_centered: Option<usize>,
    surah_number: Option<usize>,
    first_word_id: Option<usize>,
    last_word_id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &[String]) -> Result<Columns, MushafError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| find(name).ok_or_else(|| MushafError::MissingColumn(name.into()));

        Ok(Columns {
            page_number: require("page_number")?,
            line_number: require("line_number")?,
            line_type: require("line_type")?,
            is_centered: find("is_centered"),
            surah_number: find("surah_number"),
            first_word_id: find("first_word_id"),
            last_word_id: find("last_word_id"),
        })
    }

    fn parse_row(&self, cells: &[String], row: usize) -> Result<LineMetadata, MushafError> {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| cells.get(i))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
        };

        let page_number = parse_number(cell(Some(self.page_number)), "page_number", row)?
            .ok_or_else(|| MushafError::Parse(format!("row {row}: page_number is empty")))?;
        let line_number = parse_number(cell(Some(self.line_number)), "line_number", row)?
            .ok_or_else(|| MushafError::Parse(format!("row {row}: line_number is empty")))?;
        let line_type = LineType::from_str_loose(cell(Some(self.line_type)).unwrap_or_default());
        let surah_number = parse_number(cell(self.surah_number), "surah_number", row)?;

        if line_type == LineType::SurahName && surah_number.is_none() {
            return Err(MushafError::Parse(format!(
                "row {row}: surah header on page {page_number} line {line_number} has no surah_number"
            )));
        }

        Ok(LineMetadata {
            page_number,
            line_number,
            line_type,
            is_centered: cell(self.is_centered) == Some("1"),
            surah_number,
            first_word_id: cell(self.first_word_id).map(str::to_string),
            last_word_id: cell(self.last_word_id).map(str::to_string),
        })
    }
}

fn parse_number(value: Option<&str>, column: &str, row: usize) -> Result<Option<u32>, MushafError> {
    match value {
        None => Ok(None),
        Some(v) => v.parse::<u32>().map(Some).map_err(|_| {
            MushafError::Parse(format!("row {row}: {column} '{v}' is not a whole number"))
        }),
    }
}
