//! Binary vs ASCII classification of an STL buffer.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::error::{ParseError, Result};

/// Bytes before the first triangle record: 80-byte header plus u32 count.
pub const BINARY_HEADER_SIZE: usize = 84;

/// Size of one binary triangle record: normal, three vertices, attribute.
pub const TRIANGLE_RECORD_SIZE: usize = 50;

/// UTF-8 byte order mark some Windows tools put before `solid`.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Outcome of classifying a buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified<'a> {
    /// Decode as binary records; `triangle_count` is the header value.
    Binary {
        /// Triangle count read at offset 80.
        triangle_count: u32,
    },
    /// Decode as text; carries the UTF-8 decoded body.
    Ascii(Cow<'a, str>),
}

/// Read the little-endian triangle count stored at offset 80.
///
/// The caller must have checked that `bytes` holds the full header.
pub(crate) fn declared_triangle_count(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]])
}

/// Classify a raw STL buffer.
///
/// A buffer whose length exactly matches the size implied by its header
/// count is binary. Otherwise it is ASCII when the decoded text starts with
/// `solid` (after an optional byte order mark and whitespace), and binary in
/// every other case.
pub fn classify(bytes: &[u8]) -> Result<Classified<'_>> {
    if bytes.len() < BINARY_HEADER_SIZE {
        return Err(ParseError::TooSmall { len: bytes.len() });
    }

    let triangle_count = declared_triangle_count(bytes);
    let expected = BINARY_HEADER_SIZE as u64 + TRIANGLE_RECORD_SIZE as u64 * u64::from(triangle_count);

    if expected == bytes.len() as u64 {
        debug!(triangle_count, "size matches binary layout");
        return Ok(Classified::Binary { triangle_count });
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = String::from_utf8_lossy(body);
    if text.trim_start().starts_with("solid") {
        debug!(len = bytes.len(), "text starts with `solid`, treating as ASCII");
        return Ok(Classified::Ascii(text));
    }

    warn!(
        len = bytes.len(),
        expected,
        triangle_count,
        "size does not match header and no `solid` prefix; decoding as binary"
    );
    Ok(Classified::Binary { triangle_count })
}
