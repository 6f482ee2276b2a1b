use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a physical line on a mushaf page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineType {
    /// Surah header; carries a surah number and no free text.
    SurahName,
    /// A line of ayah text; consumes one text block from the page document.
    Ayah,
    /// The basmallah divider.
    Basmallah,
    Other(String),
}

impl LineType {
    /// Accepts both the table's native names (`surah_name`, `ayah`,
    /// `basmallah`) and the generic `header-line` / `content-line` /
    /// `divider-line` names.
    pub fn from_str_loose(s: &str) -> LineType {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "surah_name" | "header-line" | "header_line" => LineType::SurahName,
            "ayah" | "content-line" | "content_line" => LineType::Ayah,
            "basmallah" | "divider-line" | "divider_line" => LineType::Basmallah,
            _ => LineType::Other(s.trim().to_string()),
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineType::SurahName => write!(f, "surah_name"),
            LineType::Ayah => write!(f, "ayah"),
            LineType::Basmallah => write!(f, "basmallah"),
            LineType::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One row of the line metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMetadata {
    pub page_number: u32,
    pub line_number: u32,
    pub line_type: LineType,
    pub is_centered: bool,
    /// Present for surah header lines.
    pub surah_number: Option<u32>,
    pub first_word_id: Option<String>,
    pub last_word_id: Option<String>,
}

/// Line metadata grouped by page number, each page in source row order.
pub type PageLines = BTreeMap<u32, Vec<LineMetadata>>;

/// The two HTML fragments produced for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub html_content: String,
    pub notes_content: String,
}

/// Final artifact: every converted page keyed by its number.
///
/// Serializes as `{"pages": {"1": {...}, "2": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOutput {
    pub pages: BTreeMap<u32, PageResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_type_accepts_both_vocabularies() {
        assert_eq!(LineType::from_str_loose("surah_name"), LineType::SurahName);
        assert_eq!(LineType::from_str_loose(" Header-Line "), LineType::SurahName);
        assert_eq!(LineType::from_str_loose("ayah"), LineType::Ayah);
        assert_eq!(LineType::from_str_loose("content-line"), LineType::Ayah);
        assert_eq!(LineType::from_str_loose("basmallah"), LineType::Basmallah);
        assert_eq!(
            LineType::from_str_loose("juz_marker"),
            LineType::Other("juz_marker".into())
        );
    }

    #[test]
    fn aggregate_keys_serialize_as_strings_in_page_order() {
        let mut output = AggregateOutput::default();
        output.pages.insert(10, PageResult::default());
        output.pages.insert(2, PageResult::default());
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.starts_with(r#"{"pages":{"2":"#));
        assert!(json.contains(r#""10":{"html_content":"","notes_content":""}"#));
    }
}
