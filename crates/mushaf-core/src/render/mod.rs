pub mod markers;
pub mod templates;

use crate::error::MushafError;
use crate::extraction::TextBlock;
use crate::model::{LineMetadata, LineType};
use markers::{is_ayah_number, parse_markers, split_words, Segment};
use serde::{Deserialize, Serialize};

/// What to do with a content line that has no text block left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Log a warning, emit nothing for the line and keep rendering.
    #[default]
    Skip,
    /// Abort the page; it is left out of the output.
    FailPage,
}

/// Position of the correlation pass within one page.
///
/// `cursor` indexes the next unconsumed text block and `ayah` is the verse
/// tag given to word spans. Both only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub cursor: usize,
    pub ayah: u32,
}

impl RenderState {
    pub const INITIAL_AYAH: u32 = 1;

    pub fn new() -> Self {
        RenderState {
            cursor: 0,
            ayah: Self::INITIAL_AYAH,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendered fragments for one page plus what the pass observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    pub content: String,
    pub notes: String,
    /// Number of text blocks consumed by content lines.
    pub consumed: usize,
    /// Line numbers of content lines skipped for lack of text.
    pub alignment_gaps: Vec<u32>,
}

/// Correlate a page's text blocks with its line metadata.
///
/// Walks `line_metadata` once. Each content line consumes the next text
/// block; headers and dividers are rendered from metadata alone. Blocks
/// left over after the pass are rendered as notes.
pub fn render_page(
    page: u32,
    text_lines: &[TextBlock],
    line_metadata: &[LineMetadata],
    policy: AlignmentPolicy,
) -> Result<RenderedPage, MushafError> {
    let mut state = RenderState::new();
    let mut content = String::new();
    let mut alignment_gaps = Vec::new();

    for meta in line_metadata {
        match &meta.line_type {
            LineType::SurahName => {
                let surah = meta.surah_number.unwrap_or_default();
                content.push_str(&templates::surah_header(surah, meta.is_centered));
            }
            LineType::Ayah => match text_lines.get(state.cursor) {
                Some(block) => {
                    let (words_html, ayah) = render_words(&block.text, state.ayah);
                    content.push_str(&templates::quran_line(meta, &words_html));
                    state = RenderState {
                        cursor: state.cursor + 1,
                        ayah,
                    };
                }
                None => match policy {
                    AlignmentPolicy::Skip => {
                        log::warn!(
                            "page {}: no text found for content line {} ({} text blocks available)",
                            page,
                            meta.line_number,
                            text_lines.len()
                        );
                        alignment_gaps.push(meta.line_number);
                    }
                    AlignmentPolicy::FailPage => {
                        return Err(MushafError::Alignment {
                            page,
                            line: meta.line_number,
                        });
                    }
                },
            },
            LineType::Basmallah => content.push_str(&templates::basmallah(meta.is_centered)),
            LineType::Other(kind) => {
                log::debug!(
                    "page {}: ignoring line {} of type '{}'",
                    page,
                    meta.line_number,
                    kind
                );
            }
        }
    }

    let notes = render_notes(&text_lines[state.cursor..]);

    Ok(RenderedPage {
        content,
        notes,
        consumed: state.cursor,
        alignment_gaps,
    })
}

/// Render the words of one line, starting from verse tag `ayah`.
///
/// Returns the markup and the verse tag in effect after the line.
pub fn render_words(text: &str, ayah: u32) -> (String, u32) {
    let mut ayah = ayah;
    let mut html = String::new();

    for word in split_words(text) {
        let segments = parse_markers(word);

        // Highlighted verse numbers are still verse numbers.
        let bare: String = segments
            .iter()
            .map(|segment| match *segment {
                Segment::Text(t) => t,
                Segment::Marker { text, .. } => text,
            })
            .collect();
        if is_ayah_number(&bare) {
            match segments.iter().find_map(Segment::as_marker) {
                Some((color, _)) => html.push_str(&templates::highlighted_ayah_number(color, &bare)),
                None => html.push_str(&templates::ayah_number(&bare)),
            }
            ayah += 1;
            continue;
        }

        if segments.iter().any(Segment::is_marker) {
            let inner: String = segments
                .iter()
                .map(|segment| match *segment {
                    Segment::Text(t) => templates::escape_html(t),
                    Segment::Marker { color, text } => templates::highlighted_span(color, text),
                })
                .collect();
            html.push_str(&templates::word_span(ayah, &inner));
        } else if !word.trim().is_empty() {
            html.push_str(&templates::plain_word(ayah, word));
        } else {
            html.push_str(word);
        }
    }

    (html, ayah)
}

/// Render trailing blocks as footnote list items.
///
/// Blocks mentioning "note" are editorial comments and are dropped.
pub fn render_notes(blocks: &[TextBlock]) -> String {
    let mut html = String::new();

    for block in blocks {
        if block.text.to_lowercase().contains("note") {
            continue;
        }

        let markers: Vec<(&str, &str)> = parse_markers(&block.text)
            .iter()
            .filter_map(Segment::as_marker)
            .collect();

        if markers.is_empty() {
            html.push_str(&templates::note_item(&block.text));
        } else {
            for (color, text) in markers {
                html.push_str(&templates::colored_note_item(color, text));
            }
        }
    }

    html
}
