//! Encoding of path segments as stored in the path columns.
//!
//! Filter paths use `.` as separator, `*` as glob and `,` as alternative
//! separator, so a key containing one of those characters is written with a
//! backslash in front of it. Path columns hold the unescaped key. Array
//! positions are stored as a bracketed, zero-padded six digit index.

/// Characters that must be escaped inside a filter path segment.
pub const RESERVED_CHARACTERS: [char; 3] = ['.', '*', ','];

/// LIKE pattern matching any encoded array index.
pub const ARRAY_INDEX_PATTERN: &str = "[%]";

/// Width of the zero-padded array index.
pub const ARRAY_INDEX_WIDTH: usize = 6;

/// Largest array length whose every index fits in [`ARRAY_INDEX_WIDTH`] digits.
pub const MAX_ARRAY_LENGTH: usize = 1_000_000;

/// Converts a segment as written in a filter path into the literal stored
/// in the path column, e.g. `a\.b` becomes `a.b`.
///
/// A backslash that does not precede a reserved character is kept as is.
pub fn convert_escaped_characters(segment: &str) -> String {
    let mut converted = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\'
            && let Some(next) = chars.peek().copied()
            && RESERVED_CHARACTERS.contains(&next)
        {
            converted.push(next);
            chars.next();
        } else {
            converted.push(ch);
        }
    }

    converted
}

/// Inverse of [`convert_escaped_characters`]: turns a stored path literal
/// back into the segment form used in filter paths.
pub fn escape_reserved_characters(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if RESERVED_CHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Encodes an array position, e.g. `7` becomes `[000007]`.
///
/// Only indices below [`MAX_ARRAY_LENGTH`] decode back through
/// [`parse_array_index`]; use [`crate::schema::DocumentProperties::array_index`]
/// for a checked encoding.
pub fn format_array_index(index: usize) -> String {
    format!("[{index:0width$}]", width = ARRAY_INDEX_WIDTH)
}

/// Decodes a path literal produced by [`format_array_index`].
pub fn parse_array_index(literal: &str) -> Option<usize> {
    let digits = literal.strip_prefix('[')?.strip_suffix(']')?;
    if digits.len() != ARRAY_INDEX_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn is_array_index(literal: &str) -> bool {
    parse_array_index(literal).is_some()
}
