//! PDF extraction backends.
//!
//! Ordered by layout fidelity: Poppler's `pdftotext` with layout
//! preservation, then `pdf-extract`'s in-process flat text, then raw
//! per-page text via `lopdf`.

use std::io::Write;
use std::process::Command;

use super::{Backend, BackendError};

pub(super) const BACKENDS: &[Backend] = &[
    ("pdftotext", pdftotext),
    ("pdf-extract", flat_text),
    ("lopdf", page_text),
];

/// Extract via Poppler's `pdftotext -layout`, staging the bytes through a
/// temp file. Unavailable when the binary is not on PATH.
fn pdftotext(bytes: &[u8]) -> Result<String, BackendError> {
    if which::which("pdftotext").is_err() {
        return Err(BackendError::Unavailable("pdftotext not on PATH".into()));
    }

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(bytes)?;
    file.flush()?;

    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg("-q")
        .arg(file.path())
        .arg("-")
        .output()?;

    if !output.status.success() {
        return Err(BackendError::Parse(format!(
            "pdftotext exited with {}",
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn flat_text(bytes: &[u8]) -> Result<String, BackendError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Per-page text straight from the content streams. Loses layout but
/// tolerates documents the stricter extractors reject.
fn page_text(bytes: &[u8]) -> Result<String, BackendError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| BackendError::Parse(e.to_string()))?;
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Err(BackendError::Parse("document has no pages".into()));
    }
    doc.extract_text(&pages)
        .map_err(|e| BackendError::Parse(e.to_string()))
}
