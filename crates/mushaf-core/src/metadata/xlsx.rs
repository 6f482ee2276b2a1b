use std::io::Cursor;

use calamine::{Reader, Xlsx};

use crate::error::MushafError;
use crate::metadata::Table;

/// Read the first worksheet of an xlsx workbook into a [`Table`].
///
/// Row 1 is the header. Fully empty rows are skipped, and numeric cells are
/// rendered the way they would appear in a CSV export (`12`, not `12.0`).
pub fn read_xlsx(bytes: &[u8]) -> Result<Table, MushafError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| MushafError::Parse(format!("failed to open xlsx: {e}")))?;

    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MushafError::Parse("xlsx workbook has no worksheets".into()))?
        .map_err(|e| MushafError::Parse(format!("failed to read first worksheet: {e}")))?;

    let mut rows = sheet
        .rows()
        .map(|row| row.iter().map(cell_as_string).collect::<Vec<String>>())
        .filter(|row| row.iter().any(|c| !c.is_empty()));

    let headers = rows
        .next()
        .ok_or_else(|| MushafError::Parse("xlsx worksheet is empty".into()))?;

    Ok(Table {
        headers,
        rows: rows.collect(),
    })
}

fn cell_as_string(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::String(s) => s.trim().to_string(),
        calamine::Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        calamine::Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::load_metadata;
    use crate::model::LineType;
    use std::io::Write;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="pages" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

    /// Minimal one-sheet workbook. Cells that parse as numbers are written as
    /// numeric cells, the rest as inline strings; empty cells are omitted.
    fn build_xlsx(rows: &[&[&str]]) -> Vec<u8> {
        let mut sheet = String::new();
        for (r, row) in rows.iter().enumerate() {
            sheet.push_str(&format!("<row r=\"{}\">", r + 1));
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let cell_ref = format!("{}{}", (b'A' + c as u8) as char, r + 1);
                if value.parse::<f64>().is_ok() {
                    sheet.push_str(&format!("<c r=\"{cell_ref}\"><v>{value}</v></c>"));
                } else {
                    sheet.push_str(&format!(
                        "<c r=\"{cell_ref}\" t=\"inlineStr\"><is><t>{value}</t></is></c>"
                    ));
                }
            }
            sheet.push_str("</row>");
        }

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", WORKBOOK.to_string()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            (
                "xl/worksheets/sheet1.xml",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet}</sheetData></worksheet>"#
                ),
            ),
        ];
        for (name, xml) in parts {
            writer.start_file(name, options).unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const HEADER: &[&str] = &[
        "page_number",
        "line_number",
        "line_type",
        "is_centered",
        "surah_number",
        "first_word_id",
        "last_word_id",
    ];

    #[test]
    fn reads_first_sheet_with_header_row() {
        let bytes = build_xlsx(&[HEADER, &["1", "1", "surah_name", "1", "1", "", ""]]);
        let table = read_xlsx(&bytes).unwrap();
        assert_eq!(table.headers, HEADER);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][..5], ["1", "1", "surah_name", "1", "1"]);
    }

    #[test]
    fn load_metadata_dispatches_xlsx_by_extension() {
        let bytes = build_xlsx(&[
            HEADER,
            &["2", "1", "surah_name", "1", "2", "", ""],
            &["2", "2", "basmallah", "1", "", "", ""],
            &["2", "3", "ayah", "0", "", "8", "14"],
        ]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.xlsx");
        std::fs::write(&path, bytes).unwrap();

        let pages = load_metadata(&path, b',').unwrap();

        let lines = &pages[&2];
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].line_type, LineType::SurahName);
        assert_eq!(lines[0].surah_number, Some(2));
        assert!(lines[0].is_centered);
        assert_eq!(lines[2].line_type, LineType::Ayah);
        assert_eq!(lines[2].first_word_id.as_deref(), Some("8"));
        assert_eq!(lines[2].last_word_id.as_deref(), Some("14"));
        assert!(!lines[2].is_centered);
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(cell_as_string(&calamine::Data::Float(12.0)), "12");
        assert_eq!(cell_as_string(&calamine::Data::Float(1.5)), "1.5");
        assert_eq!(cell_as_string(&calamine::Data::Int(604)), "604");
        assert_eq!(cell_as_string(&calamine::Data::String(" ayah ".into())), "ayah");
        assert_eq!(cell_as_string(&calamine::Data::Bool(true)), "1");
        assert_eq!(cell_as_string(&calamine::Data::Empty), "");
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        assert!(matches!(
            read_xlsx(b"not a workbook"),
            Err(MushafError::Parse(_))
        ));
    }
}
