//! DOCX text extraction: reads `word/document.xml` out of the ZIP container
//! and flattens its paragraphs to plain text.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// One markup tag (name, closing slash, self-closing slash), any other `<...>`
/// construct, or a run of character data.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/)?([A-Za-z_][\w.:-]*)[^>]*?(/)?>|<[^>]*>|[^<]+")
        .expect("token pattern is valid")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("entity pattern is valid")
});

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Unreadable(format!("invalid DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Unreadable(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Unreadable(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    Ok(document_xml_to_text(&xml))
}

/// Non-empty paragraphs are joined by a blank line. Paragraphs nested in a
/// text box stay inside their enclosing paragraph, each on its own line.
fn document_xml_to_text(xml: &str) -> String {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut props_depth = 0usize;
    let mut in_text = false;

    for caps in TOKEN_RE.captures_iter(xml) {
        let Some(name) = caps.get(2).map(|m| m.as_str()) else {
            if in_text && depth > 0 && !caps[0].starts_with('<') {
                current.push_str(&decode_entities(&caps[0]));
            }
            continue;
        };
        let closing = caps.get(1).is_some();
        let self_closing = caps.get(3).is_some();

        if name == "w:pPr" {
            if closing {
                props_depth = props_depth.saturating_sub(1);
            } else if !self_closing {
                props_depth += 1;
            }
            continue;
        }
        if props_depth > 0 {
            continue;
        }

        match (name, closing, self_closing) {
            ("w:p", false, false) => {
                if depth > 0 && !current.is_empty() && !current.ends_with('\n') {
                    current.push('\n');
                }
                depth += 1;
            }
            ("w:p", true, _) => match depth {
                0 => {}
                1 => {
                    depth = 0;
                    let text = current.trim_end_matches('\n');
                    if !text.trim().is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    current.clear();
                }
                _ => {
                    depth -= 1;
                    current.push('\n');
                }
            },
            ("w:t", false, false) => in_text = true,
            ("w:t", true, _) => in_text = false,
            ("w:tab", false, true) if depth > 0 => current.push('\t'),
            ("w:br" | "w:cr", false, true) if depth > 0 => current.push('\n'),
            _ => {}
        }
    }

    paragraphs.join("\n\n").trim().to_string()
}

fn decode_entities(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = match entity.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
