pub mod archive;
pub mod docx;

use crate::error::MushafError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph,
    Heading { level: u8 },
}

/// One paragraph or heading from a page document, in document order.
///
/// Highlighted runs are already flattened into `~color~[text]` markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(flatten)]
    pub kind: BlockKind,
    pub text: String,
}

impl TextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        TextBlock {
            kind: BlockKind::Paragraph,
            text: text.into(),
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        TextBlock {
            kind: BlockKind::Heading { level },
            text: text.into(),
        }
    }
}

/// Trait for per-page document backends.
pub trait PageSource: Send + Sync {
    /// Extract the ordered text blocks of one page.
    fn extract_page(&self, page: u32) -> Result<Vec<TextBlock>, MushafError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Reads `{page}.{extension}` DOCX files from one style directory.
pub struct DocxDirectory {
    dir: PathBuf,
    extension: String,
}

impl DocxDirectory {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        DocxDirectory {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn page_path(&self, page: u32) -> PathBuf {
        self.dir.join(format!("{}.{}", page, self.extension))
    }
}

impl PageSource for DocxDirectory {
    fn extract_page(&self, page: u32) -> Result<Vec<TextBlock>, MushafError> {
        let path = self.page_path(page);
        let bytes = std::fs::read(&path).map_err(|e| MushafError::Extraction {
            page,
            reason: format!("{}: {}", path.display(), e),
        })?;
        docx::extract_docx(&bytes).map_err(|reason| MushafError::Extraction { page, reason })
    }

    fn backend_name(&self) -> &str {
        "docx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_block_serializes_with_type_tag() {
        let p = serde_json::to_value(TextBlock::paragraph("abc")).unwrap();
        assert_eq!(p, serde_json::json!({"type": "paragraph", "text": "abc"}));
        let h = serde_json::to_value(TextBlock::heading(2, "title")).unwrap();
        assert_eq!(
            h,
            serde_json::json!({"type": "heading", "level": 2, "text": "title"})
        );
    }

    #[test]
    fn missing_page_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DocxDirectory::new(dir.path(), "docx");
        assert_eq!(source.page_path(12), dir.path().join("12.docx"));
        let err = source.extract_page(12).unwrap_err();
        assert!(matches!(err, MushafError::Extraction { page: 12, .. }));
    }
}
