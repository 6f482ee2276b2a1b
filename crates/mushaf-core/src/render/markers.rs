//! Lexing of inline highlight markers and word splitting.
//!
//! A marker has the form `~color~[text]`:
//!
//! ```text
//! marker := '~' color '~' '[' inner ']'
//! color  := 1*(any char except '~' '[' ']' and whitespace)
//! inner  := *(any char except ']')
//! ```
//!
//! A `~` that does not open a well-formed marker is ordinary text.

/// A piece of a string after marker lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Marker { color: &'a str, text: &'a str },
}

impl<'a> Segment<'a> {
    pub fn is_marker(&self) -> bool {
        matches!(self, Segment::Marker { .. })
    }

    /// `(color, text)` when this segment is a marker.
    pub fn as_marker(&self) -> Option<(&'a str, &'a str)> {
        match *self {
            Segment::Marker { color, text } => Some((color, text)),
            Segment::Text(_) => None,
        }
    }
}

/// Split `input` into literal text and well-formed markers, in order.
pub fn parse_markers(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while let Some(offset) = input[pos..].find('~') {
        let at = pos + offset;
        match lex_marker(&input[at..]) {
            Some((color, text, len)) => {
                if at > literal_start {
                    segments.push(Segment::Text(&input[literal_start..at]));
                }
                segments.push(Segment::Marker { color, text });
                pos = at + len;
                literal_start = pos;
            }
            None => pos = at + 1,
        }
    }

    if literal_start < input.len() {
        segments.push(Segment::Text(&input[literal_start..]));
    }
    segments
}

/// Lex one marker at the start of `s` (which begins with `~`).
///
/// Returns the color, the inner text and the marker's byte length.
fn lex_marker(s: &str) -> Option<(&str, &str, usize)> {
    let rest = s.strip_prefix('~')?;

    let color_len = rest.find(|c: char| c == '~' || c == '[' || c == ']' || c.is_whitespace())?;
    if color_len == 0 || !rest[color_len..].starts_with("~[") {
        return None;
    }
    let color = &rest[..color_len];

    let inner_start = color_len + 2;
    let inner_len = rest[inner_start..].find(']')?;
    let text = &rest[inner_start..inner_start + inner_len];

    // '~' + color + "~[" + inner + ']'
    let len = 1 + color_len + 2 + inner_len + 1;
    Some((color, text, len))
}

/// Split a line on single spaces without breaking `[...]` spans.
///
/// Consecutive spaces produce empty words, so the number of words is always
/// one more than the number of splitting spaces.
pub fn split_words(line: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '[' => {
                if let Some(close) = line[i..].find(']') {
                    let target = i + close;
                    for (j, _) in chars.by_ref() {
                        if j >= target {
                            break;
                        }
                    }
                }
            }
            ' ' => {
                words.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    words.push(&line[start..]);
    words
}

/// A verse-number glyph: one or more Arabic-Indic digits and nothing else.
pub fn is_ayah_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| ('\u{0660}'..='\u{0669}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_marker() {
        assert_eq!(
            parse_markers("~red~[abc]"),
            vec![Segment::Marker {
                color: "red",
                text: "abc"
            }]
        );
    }

    #[test]
    fn test_markers_with_surrounding_text() {
        let segments = parse_markers("x~red~[a b]y~darkGreen~[c]");
        assert_eq!(
            segments,
            vec![
                Segment::Text("x"),
                Segment::Marker {
                    color: "red",
                    text: "a b"
                },
                Segment::Text("y"),
                Segment::Marker {
                    color: "darkGreen",
                    text: "c"
                },
            ]
        );
    }

    #[test]
    fn test_unmatched_markers_are_literal() {
        for input in ["~red~abc", "~red~[abc", "~~[abc]", "~re d~[x]", "a~b", "~"] {
            assert_eq!(parse_markers(input), vec![Segment::Text(input)], "{input}");
        }
    }

    #[test]
    fn test_literal_tilde_before_marker() {
        assert_eq!(
            parse_markers("~~red~[x]"),
            vec![
                Segment::Text("~"),
                Segment::Marker {
                    color: "red",
                    text: "x"
                }
            ]
        );
    }

    #[test]
    fn test_arabic_inner_text_preserved() {
        let segments = parse_markers("~yellow~[ٱلرَّحْمَٰنِ ٱلرَّحِيمِ]");
        assert_eq!(
            segments[0].as_marker(),
            Some(("yellow", "ٱلرَّحْمَٰنِ ٱلرَّحِيمِ"))
        );
    }

    #[test]
    fn test_split_words_on_single_spaces() {
        assert_eq!(split_words("hello world"), vec!["hello", "world"]);
        assert_eq!(split_words("a  b"), vec!["a", "", "b"]);
        assert_eq!(split_words(""), vec![""]);
    }

    #[test]
    fn test_split_words_keeps_markers_whole() {
        assert_eq!(
            split_words("one ~red~[two three] four"),
            vec!["one", "~red~[two three]", "four"]
        );
        assert_eq!(
            split_words("x~red~[a  b]~blue~[c d]y z"),
            vec!["x~red~[a  b]~blue~[c d]y", "z"]
        );
    }

    #[test]
    fn test_split_words_unclosed_bracket_splits_normally() {
        assert_eq!(split_words("a [b c"), vec!["a", "[b", "c"]);
    }

    #[test]
    fn test_ayah_number_detection() {
        assert!(is_ayah_number("١"));
        assert!(is_ayah_number("٢٨٦"));
        assert!(!is_ayah_number(""));
        assert!(!is_ayah_number("12"));
        assert!(!is_ayah_number("١a"));
        assert!(!is_ayah_number("ٱللَّهِ"));
    }
}
