//! Plain-text decoding: strict UTF-8 first, Latin-1 as the tolerant retry.

use super::{Backend, BackendError};

pub(super) const BACKENDS: &[Backend] = &[("utf-8", utf8), ("latin-1", latin1)];

fn utf8(bytes: &[u8]) -> Result<String, BackendError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Latin-1 maps every byte to the code point of the same value, so this
/// decode cannot fail.
fn latin1(bytes: &[u8]) -> Result<String, BackendError> {
    Ok(bytes.iter().map(|&b| b as char).collect())
}
