//! Minimal DOCX text reader: unzip `word/document.xml` and collect the `<w:t>` runs.

use std::io::{Cursor, Read};

use regex::Regex;

use super::ExtractError;

const DOCUMENT_XML: &str = "word/document.xml";

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(format!("not a zip container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| ExtractError::Docx(format!("missing {DOCUMENT_XML}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(format!("unreadable {DOCUMENT_XML}: {e}")))?;

    document_xml_to_text(&xml)
}

/// Walks text runs, tabs, breaks and paragraph ends in document order.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractError> {
    let tokens = Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|</w:p>|<w:tab\s*/>|<w:br\s*/>")
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut text = String::new();
    for caps in tokens.captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            text.push_str(&unescape_xml(run.as_str()));
            continue;
        }
        match caps.get(0).map(|m| m.as_str()) {
            Some(tag) if tag.starts_with("<w:tab") => text.push('\t'),
            Some(_) => text.push('\n'),
            None => {}
        }
    }
    Ok(text.trim_end().to_string())
}

fn unescape_xml(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Packs `document_xml` into a stored (uncompressed) DOCX container.
#[cfg(test)]
pub(crate) fn build_docx(document_xml: &str) -> Vec<u8> {
    use std::io::Write;
    use zip::write::FileOptions;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    writer.start_file(DOCUMENT_XML, options).unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
