//! Cleanup of raw extracted text into a consistent plain-text form.
//!
//! Paragraph boundaries (blank lines) are captured before whitespace
//! collapse so that they survive normalization; within a paragraph every
//! whitespace run, newlines included, becomes a single space. Two heuristic
//! repairs fix OCR-mangled letter boundaries. The function is pure and
//! idempotent: normalizing already-normalized text is a no-op.

use std::sync::OnceLock;

use regex::Regex;

fn paragraph_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A blank line, possibly containing stray spaces or tabs.
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n[\s]*").expect("static regex"))
}

fn lower_upper_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z])([A-Z])").expect("static regex"))
}

fn period_upper_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.([A-Z])").expect("static regex"))
}

/// Normalize extracted text. Empty input yields empty output.
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    // Form feeds (PDF page breaks) and carriage returns become line breaks
    // before paragraph boundaries are detected.
    let unified = text
        .replace('\u{c}', "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let paragraphs: Vec<String> = paragraph_break_re()
        .split(&unified)
        .map(collapse_and_repair)
        .filter(|p| !p.is_empty())
        .collect();

    paragraphs.join("\n\n")
}

fn collapse_and_repair(paragraph: &str) -> String {
    // Collapse runs of whitespace, including interior newlines, to single
    // spaces.
    let collapsed = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");

    // Re-insert the spaces OCR tends to drop: at a lowercase→uppercase
    // boundary, and after a sentence-ending period glued to the next word.
    let repaired = lower_upper_re().replace_all(&collapsed, "$1 $2");
    period_upper_re()
        .replace_all(&repaired, ". $1")
        .into_owned()
}
