use std::path::Path;

use sha2::{Digest, Sha256};

/// Declared document format, dispatched from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// An uploaded contract document: raw bytes plus declared format and name.
///
/// Immutable once constructed; consumed once by the extraction chain. Each
/// extraction backend receives the full byte slice, so no backend can observe
/// partial consumption by a prior failed attempt.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Build a document from a filename and its raw bytes, dispatching the
    /// format from the extension.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DocumentError> {
        let name = name.into();
        let ext = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let format = DocumentFormat::from_extension(ext)
            .ok_or_else(|| DocumentError::UnsupportedFormat(ext.to_string()))?;
        Ok(Self {
            name,
            format,
            bytes,
        })
    }

    /// Content hash over name + bytes, used as a stable document id in logs
    /// and reports.
    pub fn id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update(&self.bytes);
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_dispatch_is_case_insensitive() {
        let doc = Document::from_bytes("Contract.PDF", vec![1, 2, 3]).unwrap();
        assert_eq!(doc.format, DocumentFormat::Pdf);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = Document::from_bytes("contract.rtf", vec![]).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(ref e) if e == "rtf"));
    }

    #[test]
    fn id_is_stable_for_identical_content() {
        let a = Document::from_bytes("a.txt", b"hello".to_vec()).unwrap();
        let b = Document::from_bytes("a.txt", b"hello".to_vec()).unwrap();
        assert_eq!(a.id(), b.id());
    }
}
