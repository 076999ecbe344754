//! DOCX extraction backends: structured paragraph walk first, then a
//! tolerant tag-strip over the raw `word/document.xml`.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;

use super::{Backend, BackendError};

pub(super) const BACKENDS: &[Backend] = &[
    ("docx-rs", structured),
    ("zip-tag-strip", tag_strip),
];

/// Walk the parsed document model, joining run text per paragraph.
fn structured(bytes: &[u8]) -> Result<String, BackendError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| BackendError::Parse(e.to_string()))?;

    let mut out = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for pc in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = pc {
                    for rc in run.children {
                        if let docx_rs::RunChild::Text(t) = rc {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    Ok(out)
}

fn xml_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"))
}

/// Read `word/document.xml` out of the zip container and strip markup.
/// Paragraph close tags become newlines so the text keeps its line structure.
fn tag_strip(bytes: &[u8]) -> Result<String, BackendError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| BackendError::Parse(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| BackendError::Parse(e.to_string()))?
        .read_to_string(&mut xml)?;

    let with_breaks = xml.replace("</w:p>", "\n");
    let stripped = xml_tag_re().replace_all(&with_breaks, "");

    Ok(unescape_entities(&stripped))
}

fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_strip_preserves_paragraph_breaks_and_entities() {
        let xml = "<w:document><w:body>\
                   <w:p><w:r><w:t>Fees &amp; Costs</w:t></w:r></w:p>\
                   <w:p><w:r><w:t>Net 30.</w:t></w:r></w:p>\
                   </w:body></w:document>";

        let mut buf = Cursor::new(Vec::new());
        {
            use std::io::Write;
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let text = tag_strip(&buf.into_inner()).unwrap();
        assert!(text.contains("Fees & Costs\n"));
        assert!(text.contains("Net 30."));
    }

    #[test]
    fn tag_strip_rejects_a_zip_without_document_xml() {
        let mut buf = Cursor::new(Vec::new());
        {
            use std::io::Write;
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("other.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"nope").unwrap();
            writer.finish().unwrap();
        }

        assert!(tag_strip(&buf.into_inner()).is_err());
    }
}
