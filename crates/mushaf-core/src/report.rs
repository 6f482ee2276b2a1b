use serde::{Deserialize, Serialize};

pub const REPORT_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The metadata table has no rows for the page.
    MissingMetadata,
    /// The page document could not be read or parsed.
    ExtractionFailed,
    /// A content line had no text block left; the line was skipped.
    AlignmentGap,
    /// Rendering aborted the page (strict alignment policy).
    RenderFailed,
}

impl WarningKind {
    /// Whether the warning caused the page to be left out of the output.
    pub fn drops_page(&self) -> bool {
        !matches!(self, WarningKind::AlignmentGap)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunWarning {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub kind: WarningKind,
    pub message: String,
}

/// What happened during a conversion run, page by page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub report_schema_version: String,
    pub pages_requested: u32,
    pub pages_written: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RunWarning>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self {
            report_schema_version: REPORT_SCHEMA_VERSION.to_string(),
            pages_requested: 0,
            pages_written: 0,
            warnings: Vec::new(),
        }
    }
}

impl RunReport {
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &RunWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// Pages left out of the output, in ascending order.
    pub fn dropped_pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self
            .warnings
            .iter()
            .filter(|w| w.kind.drops_page())
            .map(|w| w.page)
            .collect();
        pages.sort_unstable();
        pages.dedup();
        pages
    }

    /// Sort warnings by page, then line, so reports are stable across runs.
    pub fn sort(&mut self) {
        self.warnings.sort_by_key(|w| (w.page, w.line.unwrap_or(0)));
    }
}
