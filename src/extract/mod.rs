//! Text extraction from uploaded contract documents.
//!
//! Each format has an ordered chain of extraction backends, tried from most
//! layout-faithful to most tolerant. A backend that errors or produces only
//! whitespace falls through to the next; the chain stops at the first backend
//! producing real text. An empty result string signals total extraction
//! failure and is terminal for the pipeline.

mod docx;
mod pdf;
mod text;

use crate::model::{Document, DocumentFormat};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse document: {0}")]
    Parse(String),
}

/// A single extraction attempt: full document bytes in, text out.
///
/// Backends always receive the complete byte slice, so a failed attempt can
/// never leave a partially-consumed cursor for the next one.
pub(crate) type Backend = (&'static str, fn(&[u8]) -> Result<String, BackendError>);

/// Run the format's backend chain over the document.
///
/// Returns trimmed text, or an empty string when every backend failed or
/// produced only whitespace. Each attempt is logged with its outcome; the log
/// is diagnostic only and never influences the fallback order.
pub fn extract_text(doc: &Document) -> String {
    let backends: &[Backend] = match doc.format {
        DocumentFormat::Pdf => pdf::BACKENDS,
        DocumentFormat::Docx => docx::BACKENDS,
        DocumentFormat::Txt => text::BACKENDS,
    };

    for (name, backend) in backends {
        match backend(&doc.bytes) {
            Ok(extracted) if !extracted.trim().is_empty() => {
                tracing::info!(
                    document = %doc.name,
                    backend = name,
                    chars = extracted.trim().len(),
                    "Text extraction succeeded"
                );
                return extracted.trim().to_string();
            }
            Ok(_) => {
                tracing::warn!(
                    document = %doc.name,
                    backend = name,
                    "Extraction backend returned empty text"
                );
            }
            Err(e) => {
                tracing::warn!(
                    document = %doc.name,
                    backend = name,
                    error = %e,
                    "Extraction backend failed"
                );
            }
        }
    }

    tracing::error!(
        document = %doc.name,
        format = doc.format.as_str(),
        "All extraction backends failed, no usable text"
    );
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    #[test]
    fn txt_decodes_utf8() {
        let doc = Document::from_bytes("a.txt", "Hello § world".as_bytes().to_vec()).unwrap();
        assert_eq!(extract_text(&doc), "Hello § world");
    }

    #[test]
    fn txt_falls_back_to_latin1_on_invalid_utf8() {
        // 0xE9 is 'é' in Latin-1 but an invalid standalone UTF-8 byte.
        let doc = Document::from_bytes("a.txt", vec![b'c', b'a', b'f', 0xE9]).unwrap();
        assert_eq!(extract_text(&doc), "café");
    }

    #[test]
    fn garbage_pdf_exhausts_the_chain_and_yields_empty_string() {
        let doc = Document::from_bytes("junk.pdf", b"this is not a pdf".to_vec()).unwrap();
        assert_eq!(extract_text(&doc), "");
    }

    #[test]
    fn whitespace_only_txt_counts_as_extraction_failure() {
        let doc = Document::from_bytes("blank.txt", b"  \n\t \n".to_vec()).unwrap();
        assert_eq!(extract_text(&doc), "");
    }

    #[test]
    fn minimal_docx_is_read_via_the_zip_fallback() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        // A bare zip with only word/document.xml: not enough structure for the
        // full parser, but the tolerant fallback handles it.
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer
                .write_all(
                    b"<w:document><w:body>\
                      <w:p><w:r><w:t>TERMINATION</w:t></w:r></w:p>\
                      <w:p><w:r><w:t>Thirty days notice.</w:t></w:r></w:p>\
                      </w:body></w:document>",
                )
                .unwrap();
            writer.finish().unwrap();
        }

        let doc = Document::from_bytes("c.docx", buf.into_inner()).unwrap();
        let extracted = extract_text(&doc);
        assert!(extracted.contains("TERMINATION"));
        assert!(extracted.contains("Thirty days notice."));
    }
}
