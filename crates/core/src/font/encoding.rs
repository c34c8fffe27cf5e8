//! Byte string decoding for text-show operands.
//!
//! A font either names a byte-decode scheme (`charmap`, `utf-16-be`,
//! `cp1252`, ...) or carries an explicit byte -> string map built from its
//! `/Encoding` differences. After decoding, the font's glyph map is applied
//! character by character.

use crate::error::{GridError, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Encoding declared for a font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontEncoding {
    /// Named byte-decode scheme
    Named(String),
    /// Explicit byte code -> decoded string map
    Map(HashMap<u8, String>),
}

impl Default for FontEncoding {
    fn default() -> Self {
        FontEncoding::Named("charmap".to_string())
    }
}

impl FontEncoding {
    /// Look up the decoded string for a byte code, explicit maps only.
    pub fn mapped(&self, code: u32) -> Option<&str> {
        match self {
            FontEncoding::Map(map) => u8::try_from(code)
                .ok()
                .and_then(|b| map.get(&b))
                .map(String::as_str),
            FontEncoding::Named(_) => None,
        }
    }

    /// Decode a byte string, failing if any byte is not representable.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            FontEncoding::Named(label) => decode_named(label, bytes),
            FontEncoding::Map(map) => {
                let mut out = String::with_capacity(bytes.len());
                for &b in bytes {
                    match map.get(&b) {
                        Some(s) => out.push_str(s),
                        None if b.is_ascii() => out.push(char::from(b)),
                        None => {
                            return Err(GridError::DecodeError(format!(
                                "byte {b:#04x} has no mapping"
                            )));
                        }
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Single-byte schemes that map every byte to the code point of equal value.
fn is_latin1_label(label: &str) -> bool {
    matches!(
        label,
        "charmap" | "latin-1" | "latin1" | "latin_1" | "iso-8859-1" | "iso8859-1"
    )
}

fn decode_named(label: &str, bytes: &[u8]) -> Result<String> {
    let label = label.trim().to_ascii_lowercase();
    if is_latin1_label(&label) {
        return Ok(bytes.iter().copied().map(char::from).collect());
    }
    let whatwg = match label.as_str() {
        "utf-16-be" | "utf_16_be" => "utf-16be",
        "utf-16-le" | "utf_16_le" => "utf-16le",
        other => other,
    };
    let Some(encoding) = Encoding::for_label(whatwg.as_bytes()) else {
        tracing::debug!(label = %label, "unknown encoding label, passing bytes through");
        return Ok(bytes.iter().copied().map(char::from).collect());
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| GridError::DecodeError(format!("invalid {} sequence", encoding.name())))
}

/// Decode shown bytes into text: the declared encoding first, then the
/// glyph map. Undecodable input degrades to UTF-8 with replacement
/// characters instead of failing.
pub fn decode_text(
    bytes: &[u8],
    encoding: &FontEncoding,
    char_map: &HashMap<char, String>,
) -> String {
    let decoded = encoding.decode(bytes).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "falling back to replacement decoding");
        String::from_utf8_lossy(bytes).into_owned()
    });
    if char_map.is_empty() {
        return decoded;
    }
    let mut out = String::with_capacity(decoded.len());
    for ch in decoded.chars() {
        match char_map.get(&ch) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charmap_passthrough() {
        let enc = FontEncoding::default();
        assert_eq!(enc.decode(b"Hi\xe9").unwrap(), "Hi\u{e9}");
    }

    #[test]
    fn test_utf16be() {
        let enc = FontEncoding::Named("utf-16-be".into());
        assert_eq!(enc.decode(&[0x00, 0x41, 0x00, 0x42]).unwrap(), "AB");
        // odd trailing byte is malformed
        assert!(enc.decode(&[0x00, 0x41, 0x00]).is_err());
    }

    #[test]
    fn test_explicit_map_with_ascii_passthrough() {
        let mut map = HashMap::new();
        map.insert(0x80u8, "\u{2022}".to_string());
        let enc = FontEncoding::Map(map);
        assert_eq!(enc.decode(b"a\x80b").unwrap(), "a\u{2022}b");
        assert!(enc.decode(b"\x81").is_err());
    }

    #[test]
    fn test_decode_text_falls_back_to_replacement() {
        let mut map = HashMap::new();
        map.insert(b'x', "y".to_string());
        let text = decode_text(b"ok\xff", &FontEncoding::Map(map), &HashMap::new());
        assert_eq!(text, "ok\u{fffd}");
    }

    #[test]
    fn test_glyph_map_applied_after_decode() {
        let mut glyphs = HashMap::new();
        glyphs.insert('\u{1}', "T".to_string());
        glyphs.insert('\u{2}', "x".to_string());
        let encoding = FontEncoding::Named("utf-16-be".into());
        let text = decode_text(&[0x00, 0x01, 0x00, 0x02], &encoding, &glyphs);
        assert_eq!(text, "Tx");
    }
}
