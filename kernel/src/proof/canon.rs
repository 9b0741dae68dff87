//! Canonical JSON bytes: the one serializer whose output is ever hashed.
//!
//! Graph digests, trace digests and report bundles all route through
//! [`canonical_json_bytes`]. Two values that compare equal as JSON must
//! produce identical bytes, in any process, on any platform.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. Compact form, no whitespace: `{"a":1,"b":[2,3]}`.
//! 3. Strings are escaped per RFC 8259 §7; control characters as `\u00XX`.
//! 4. Numbers are integers. A float is accepted only when it is finite,
//!    integral and exactly representable as `i64` (`6.0` writes as `6`);
//!    every other float is rejected. Fractional and infinite costs must be
//!    rendered with [`crate::cost::format_cost`] before they get here.
//! 5. `null`, `true`, `false` are written literally.

use std::io::Write;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number had a fractional part or was out of integer range.
    NonIntegerNumber { raw: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] for any number that does not
/// satisfy rule 4.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut buf = Vec::with_capacity(256);
    write_value(&mut buf, value)?;
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &serde_json::Value) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Null => buf.extend_from_slice(b"null"),
        serde_json::Value::Bool(true) => buf.extend_from_slice(b"true"),
        serde_json::Value::Bool(false) => buf.extend_from_slice(b"false"),
        serde_json::Value::Number(n) => write_number(buf, n)?,
        serde_json::Value::String(s) => write_string(buf, s),
        serde_json::Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_value(buf, item)?;
            }
            buf.push(b']');
        }
        serde_json::Value::Object(map) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            buf.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_string(buf, key);
                buf.push(b':');
                write_value(buf, item)?;
            }
            buf.push(b'}');
        }
    }
    Ok(())
}

fn write_number(buf: &mut Vec<u8>, n: &serde_json::Number) -> Result<(), CanonError> {
    if let Some(i) = n.as_i64() {
        let _ = write!(buf, "{i}");
        return Ok(());
    }
    if let Some(u) = n.as_u64() {
        let _ = write!(buf, "{u}");
        return Ok(());
    }
    match n.as_f64() {
        // 2^53: beyond this, integral f64 values are no longer exact.
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 => {
            #[allow(clippy::cast_possible_truncation)]
            let whole = f as i64;
            let _ = write!(buf, "{whole}");
            Ok(())
        }
        _ => Err(CanonError::NonIntegerNumber { raw: n.to_string() }),
    }
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    for ch in s.chars() {
        match ch {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            c if c < '\u{0020}' => {
                let _ = write!(buf, "\\u{:04x}", c as u32);
            }
            c => {
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }
    buf.push(b'"');
}
