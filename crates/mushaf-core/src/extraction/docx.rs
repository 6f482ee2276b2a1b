use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::extraction::TextBlock;

/// Containers whose paragraphs are not part of the page's line sequence.
const NESTED_CONTAINERS: &[&[u8]] = &[b"tbl", b"txbxContent"];

/// Extract the body paragraphs and headings of a DOCX file.
///
/// Text of highlighted runs is wrapped as `~<highlight>~[<text>]` when it
/// contains at least one letter or digit (Latin or Arabic block). Empty
/// paragraphs, tables and text boxes produce no blocks.
pub fn extract_docx(bytes: &[u8]) -> Result<Vec<TextBlock>, String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("not a docx archive: {e}"))?;

    let document = read_entry(&mut archive, "word/document.xml")?
        .ok_or_else(|| "missing word/document.xml".to_string())?;
    let styles = match read_entry(&mut archive, "word/styles.xml")? {
        Some(xml) => parse_style_names(&xml)?,
        None => HashMap::new(),
    };

    parse_document_xml(&document, &styles)
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, String> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(format!("{name}: {e}")),
    };
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| format!("{name}: {e}"))?;
    Ok(Some(xml))
}

/// Map style ids (`Heading1`) to display names (`heading 1`).
fn parse_style_names(xml: &str) -> Result<HashMap<String, String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut names = HashMap::new();
    let mut current_id: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"style" => {
                current_id = attr_value(e, b"styleId");
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"name" =>
            {
                if let (Some(id), Some(name)) = (current_id.as_ref(), attr_value(e, b"val")) {
                    names.insert(id.clone(), name);
                }
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"style" => current_id = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("styles.xml: {e}")),
            _ => {}
        }
        buf.clear();
    }

    Ok(names)
}

struct Paragraph {
    depth: usize,
    style: Option<String>,
    text: String,
    has_text: bool,
}

fn parse_document_xml(
    xml: &str,
    styles: &HashMap<String, String>,
) -> Result<Vec<TextBlock>, String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut blocks = Vec::new();

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraph: Option<Paragraph> = None;
    let mut highlight: Option<String> = None;
    let mut in_text = false;
    let mut run_text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = e.local_name().as_ref().to_vec();
                match local.as_slice() {
                    b"p" if paragraph.is_none() && is_body_level(&stack) => {
                        paragraph = Some(Paragraph {
                            depth: stack.len(),
                            style: None,
                            text: String::new(),
                            has_text: false,
                        });
                    }
                    b"r" => highlight = None,
                    b"t" if parent_is(&stack, b"r") => {
                        in_text = true;
                        run_text.clear();
                    }
                    _ => handle_property(e, &stack, &mut paragraph, &mut highlight),
                }
                stack.push(local);
            }
            Ok(Event::Empty(ref e)) => {
                handle_property(e, &stack, &mut paragraph, &mut highlight);
            }
            Ok(Event::Text(ref e)) if in_text => {
                let text = e.unescape().map_err(|err| format!("document.xml: {err}"))?;
                run_text.push_str(&text);
            }
            Ok(Event::End(ref e)) => {
                stack.pop();
                match e.local_name().as_ref() {
                    b"t" if in_text => {
                        in_text = false;
                        if let Some(p) = paragraph.as_mut() {
                            if !in_nested_container(&stack, p.depth) {
                                p.has_text = true;
                                p.text.push_str(&mark_highlight(&run_text, highlight.as_deref()));
                            }
                        }
                    }
                    b"r" => highlight = None,
                    b"p" if paragraph.as_ref().map(|p| p.depth) == Some(stack.len()) => {
                        if let Some(p) = paragraph.take() {
                            if p.has_text {
                                blocks.push(finish_paragraph(p, styles));
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("document.xml: {e}")),
            _ => {}
        }
        buf.clear();
    }

    Ok(blocks)
}

/// Handle elements that may appear either self-closed or as a start tag.
fn handle_property(
    e: &BytesStart,
    stack: &[Vec<u8>],
    paragraph: &mut Option<Paragraph>,
    highlight: &mut Option<String>,
) {
    match e.local_name().as_ref() {
        b"pStyle" if ends_with(stack, &[b"p", b"pPr"]) => {
            if let Some(p) = paragraph.as_mut() {
                if stack.len() == p.depth + 2 {
                    p.style = attr_value(e, b"val");
                }
            }
        }
        b"highlight" if ends_with(stack, &[b"r", b"rPr"]) => {
            *highlight = attr_value(e, b"val").filter(|v| !v.eq_ignore_ascii_case("none"));
        }
        b"tab" if parent_is(stack, b"r") => {
            if let Some(p) = paragraph.as_mut() {
                if !in_nested_container(stack, p.depth) {
                    p.has_text = true;
                    p.text.push('\t');
                }
            }
        }
        _ => {}
    }
}

fn finish_paragraph(p: Paragraph, styles: &HashMap<String, String>) -> TextBlock {
    let text = p.text.trim().to_string();
    match p.style.as_deref().and_then(|id| heading_level(id, styles)) {
        Some(level) => TextBlock::heading(level, text),
        None => TextBlock::paragraph(text),
    }
}

/// Heading level from a style's display name (`heading 2`) or id (`Heading2`).
fn heading_level(style_id: &str, styles: &HashMap<String, String>) -> Option<u8> {
    let name = styles.get(style_id).map(String::as_str).unwrap_or(style_id);
    [name, style_id].iter().find_map(|s| {
        let lower = s.to_lowercase();
        let level: u8 = lower.strip_prefix("heading")?.trim().parse().ok()?;
        (1..=6).contains(&level).then_some(level)
    })
}

/// Wrap highlighted run text in a `~color~[text]` marker.
fn mark_highlight(text: &str, highlight: Option<&str>) -> String {
    match highlight {
        Some(color) if !text.trim().is_empty() && text.chars().any(is_marker_eligible) => {
            format!("~{color}~[{text}]")
        }
        _ => text.to_string(),
    }
}

fn is_marker_eligible(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{0600}'..='\u{06FF}').contains(&c)
}

fn is_body_level(stack: &[Vec<u8>]) -> bool {
    stack.iter().any(|n| n == b"body")
        && !stack
            .iter()
            .any(|n| n == b"p" || is_nested_container(n))
}

fn in_nested_container(stack: &[Vec<u8>], paragraph_depth: usize) -> bool {
    stack
        .iter()
        .skip(paragraph_depth)
        .any(|n| is_nested_container(n))
}

fn is_nested_container(name: &[u8]) -> bool {
    NESTED_CONTAINERS.iter().any(|c| *c == name)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().map(|n| n == name).unwrap_or(false)
}

fn ends_with(stack: &[Vec<u8>], names: &[&[u8]]) -> bool {
    stack.len() >= names.len()
        && stack[stack.len() - names.len()..]
            .iter()
            .zip(names)
            .all(|(a, b)| a == b)
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}
