//! HTML fragments consumed by the page viewer.
//!
//! Class names and data attributes are part of the viewer's stylesheet and
//! scripts; change them only together with the viewer.

use crate::model::LineMetadata;

pub const CENTERED_CLASS: &str = "text-center flex justify-center";
pub const JUSTIFIED_CLASS: &str = "flex justify-between";

pub fn line_class(is_centered: bool) -> &'static str {
    if is_centered {
        CENTERED_CLASS
    } else {
        JUSTIFIED_CLASS
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn surah_header(surah_number: u32, is_centered: bool) -> String {
    let class = line_class(is_centered);
    format!(
        "<div class='surah-name'>\
         <div class='quran-icon surah-header {class}'>header</div>\
         <div class='surah-icon {class}'>\
         <span class='surah-name-v4 me-2'>surah{surah_number:03}</span>\
         <span class='surah-name-v4'>surah-icon</span>\
         </div></div>"
    )
}

pub fn basmallah(is_centered: bool) -> String {
    format!("<div class='bismillah {}'> \u{FDFD}</div>", line_class(is_centered))
}

/// One rendered content line wrapping already-rendered word markup.
pub fn quran_line(meta: &LineMetadata, words_html: &str) -> String {
    let first = escape_html(meta.first_word_id.as_deref().unwrap_or_default());
    let last = escape_html(meta.last_word_id.as_deref().unwrap_or_default());
    format!(
        "<p class='quran-line {class}' data-pag='{page}' data-line='{line}' \
         data-first-word-id='{first}' data-last-word-id='{last}' \
         id='line-{page}-{line}'>{words_html}</p>",
        class = line_class(meta.is_centered),
        page = meta.page_number,
        line = meta.line_number,
    )
}

pub fn ayah_number(word: &str) -> String {
    format!("<span class=\"arabic-num-marker\">{}</span>", escape_html(word))
}

pub fn highlighted_ayah_number(color: &str, word: &str) -> String {
    format!(
        "<span class=\"arabic-num-marker\" style=\"color: {};\">{}</span>",
        escape_html(color),
        escape_html(word)
    )
}

pub fn highlighted_span(color: &str, text: &str) -> String {
    format!(
        "<span class=\"text\" style=\"color: {};\">{}</span>",
        escape_html(color),
        escape_html(text)
    )
}

pub fn word_span(ayah: u32, inner_html: &str) -> String {
    format!("<span class=\"word ayah-{ayah}\">{inner_html}</span>")
}

pub fn plain_word(ayah: u32, word: &str) -> String {
    word_span(
        ayah,
        &format!("<span class=\"text\">{}</span>", escape_html(word)),
    )
}

pub fn note_item(text: &str) -> String {
    format!("<li class='notes'>{}</li>", escape_html(text))
}

pub fn colored_note_item(color: &str, text: &str) -> String {
    format!(
        "<li class='notes' style=\"color: {};\">{}</li>",
        escape_html(color),
        escape_html(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineType;

    #[test]
    fn surah_number_is_zero_padded() {
        let html = surah_header(2, true);
        assert!(html.contains("surah002"));
        assert!(html.contains(CENTERED_CLASS));
        assert!(surah_header(114, false).contains("surah114"));
    }

    #[test]
    fn quran_line_carries_metadata_attributes() {
        let meta = LineMetadata {
            page_number: 3,
            line_number: 9,
            line_type: LineType::Ayah,
            is_centered: false,
            surah_number: None,
            first_word_id: Some("101".into()),
            last_word_id: None,
        };
        let html = quran_line(&meta, "<span>w</span>");
        assert!(html.starts_with("<p class='quran-line flex justify-between'"));
        assert!(html.contains("data-pag='3' data-line='9'"));
        assert!(html.contains("data-first-word-id='101' data-last-word-id=''"));
        assert!(html.contains("id='line-3-9'><span>w</span></p>"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape_html("a<b>&'\""), "a&lt;b&gt;&amp;&#39;&quot;");
        assert_eq!(
            plain_word(1, "<x>"),
            "<span class=\"word ayah-1\"><span class=\"text\">&lt;x&gt;</span></span>"
        );
    }
}
