//! Font width resolution.
//!
//! Builds, per page, a [`Font`] for every font resource: its encoding,
//! glyph map and a glyph -> width table resolved from (in order) a simple
//! font `/Widths` array, composite font `/W` arrays, or the built-in
//! standard family widths.

use super::encoding::{FontEncoding, decode_text};
use super::metrics::standard_widths;
use crate::model::Operand;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Type alias for resolved width tables: decoded character -> width (1/1000 em).
pub type FontWidthDict = FxHashMap<char, f64>;

/// Space width assumed when the parser supplies none.
pub const DEFAULT_SPACE_WIDTH: f64 = 250.0;

/// The font dictionary fields the document parser supplies for one font
/// resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// `/Subtype` (e.g. `Type1`, `TrueType`, `Type0`)
    pub subtype: String,
    /// `/BaseFont` name, with or without the leading slash
    pub base_font: Option<String>,
    /// Width of the space glyph in 1/1000 em
    pub space_width: f64,
    /// Declared encoding
    pub encoding: FontEncoding,
    /// Glyph map (decoded character -> unicode text), usually from `/ToUnicode`
    pub char_map: HashMap<char, String>,
    /// `/FirstChar` of a simple font
    pub first_char: u32,
    /// `/Widths` of a simple font
    pub widths: Vec<f64>,
    /// `/W` arrays, one per descendant font of a composite font
    pub descendant_widths: Vec<Vec<Operand>>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            subtype: String::new(),
            base_font: None,
            space_width: DEFAULT_SPACE_WIDTH,
            encoding: FontEncoding::default(),
            char_map: HashMap::new(),
            first_char: 0,
            widths: Vec::new(),
            descendant_widths: Vec::new(),
        }
    }
}

impl FontSpec {
    /// Minimal spec with a subtype and base font name.
    pub fn new(subtype: impl Into<String>, base_font: Option<&str>) -> Self {
        Self {
            subtype: subtype.into(),
            base_font: base_font.map(str::to_string),
            ..Self::default()
        }
    }

    /// True when the font is composite (has descendant fonts).
    pub fn is_composite(&self) -> bool {
        !self.descendant_widths.is_empty() || self.subtype.trim_start_matches('/') == "Type0"
    }
}

/// One positional entry of a composite font `/W` array.
#[derive(Debug, Clone, PartialEq)]
pub enum WidthEntry {
    /// `start [w0 w1 ...]`: consecutive CIDs from `start`
    Run { start: u32, widths: Vec<f64> },
    /// `first last w`: every CID in `first..=last`
    Range { first: u32, last: u32, width: f64 },
}

/// Classify a `/W` array into entries by looking ahead at the shape of the
/// next one or two slots. Slots that fit neither shape are skipped.
pub fn parse_width_entries(seq: &[Operand]) -> Vec<WidthEntry> {
    let mut entries = Vec::new();
    let mut idx = 0;
    while idx < seq.len() {
        let Ok(start) = seq[idx].as_num() else {
            tracing::debug!(slot = idx, got = seq[idx].type_name(), "skipping /W slot");
            idx += 1;
            continue;
        };
        match (seq.get(idx + 1), seq.get(idx + 2)) {
            (Some(Operand::Array(list)), _) => {
                entries.push(WidthEntry::Run {
                    start: cid_from(start),
                    widths: list.iter().filter_map(|w| w.as_num().ok()).collect(),
                });
                idx += 2;
            }
            (Some(last), Some(width)) if !last.is_array() && !width.is_array() => {
                if let (Ok(last), Ok(width)) = (last.as_num(), width.as_num()) {
                    entries.push(WidthEntry::Range {
                        first: cid_from(start),
                        last: cid_from(last),
                        width,
                    });
                }
                idx += 3;
            }
            _ => {
                tracing::debug!(slot = idx, "truncated /W entry");
                idx += 1;
            }
        }
    }
    entries
}

/// Upper bound on CIDs covered by one range entry; malformed arrays can
/// name ranges spanning the whole u32 space.
const MAX_RANGE_SPAN: u32 = 0xFFFF;

fn cid_from(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}

/// Parse a `/W` array into a CID -> width mapping.
///
/// Handles two formats, which may be mixed positionally:
/// - Format 1: `[cid, [w1, w2, w3, ...]]` - consecutive widths starting at cid
/// - Format 2: `[cid_start, cid_end, width]` - range with same width
pub fn get_widths(seq: &[Operand]) -> FxHashMap<u32, f64> {
    let mut widths = FxHashMap::default();
    for entry in parse_width_entries(seq) {
        match entry {
            WidthEntry::Run { start, widths: list } => {
                for (cid, w) in (start..=u32::MAX).zip(list) {
                    widths.insert(cid, w);
                }
            }
            WidthEntry::Range { first, last, width } => {
                for cid in first..=last.min(first.saturating_add(MAX_RANGE_SPAN)) {
                    widths.insert(cid, width);
                }
            }
        }
    }
    widths
}

/// A font resolved for one page. Immutable once built.
#[derive(Debug, Clone)]
pub struct Font {
    /// Font subtype tag
    pub subtype: String,
    /// Space glyph width in 1/1000 em
    pub space_width: f64,
    /// Declared encoding
    pub encoding: FontEncoding,
    /// Glyph map applied after decoding
    pub char_map: HashMap<char, String>,
    /// Resolved width table keyed by decoded character
    widths: FontWidthDict,
}

impl Font {
    /// Resolve a font from its dictionary fields.
    pub fn new(spec: &FontSpec) -> Self {
        let mut widths = if spec.is_composite() {
            Self::composite_widths(spec)
        } else {
            Self::simple_widths(spec)
        };
        if widths.is_empty()
            && let Some(standard) = spec.base_font.as_deref().and_then(standard_widths)
        {
            widths = standard;
        }
        Self {
            subtype: spec.subtype.clone(),
            space_width: spec.space_width.max(0.0),
            encoding: spec.encoding.clone(),
            char_map: spec.char_map.clone(),
            widths,
        }
    }

    /// `/FirstChar` + `/Widths`, keyed by the font's own decoding of each code.
    fn simple_widths(spec: &FontSpec) -> FontWidthDict {
        let mut widths = FontWidthDict::default();
        for (code, &w) in (spec.first_char..=u32::MAX).zip(&spec.widths) {
            let key = match spec.encoding.mapped(code) {
                Some(s) => single_char(s),
                None => char::from_u32(code),
            };
            if let Some(ch) = key {
                widths.insert(ch, w.max(0.0));
            }
        }
        widths
    }

    /// Descendant `/W` arrays, with CIDs translated through the glyph map.
    fn composite_widths(spec: &FontSpec) -> FontWidthDict {
        let mut widths = FontWidthDict::default();
        for w in &spec.descendant_widths {
            for (cid, width) in get_widths(w) {
                let Some(raw) = char::from_u32(cid) else {
                    continue;
                };
                let key = match spec.char_map.get(&raw) {
                    Some(mapped) => single_char(mapped),
                    None => Some(raw),
                };
                if let Some(ch) = key {
                    widths.insert(ch, width.max(0.0));
                }
            }
        }
        widths
    }

    /// Width of one character, or twice the space width when unknown.
    pub fn char_width(&self, ch: char) -> f64 {
        self.widths
            .get(&ch)
            .copied()
            .unwrap_or(self.space_width * 2.0)
    }

    /// Sum of character widths for `word` in 1/1000 em. Never fails.
    pub fn word_width(&self, word: &str) -> f64 {
        word.chars().map(|ch| self.char_width(ch)).sum()
    }

    /// The resolved width table.
    pub fn widths(&self) -> &FontWidthDict {
        &self.widths
    }

    /// Decode shown bytes with this font's encoding and glyph map.
    pub fn decode(&self, bytes: &[u8]) -> String {
        decode_text(bytes, &self.encoding, &self.char_map)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Build the font map for one page from the parser's font resources.
pub fn page_fonts<'a, I>(specs: I) -> FxHashMap<String, Arc<Font>>
where
    I: IntoIterator<Item = (&'a String, &'a FontSpec)>,
{
    specs
        .into_iter()
        .map(|(name, spec)| {
            (
                name.trim_start_matches('/').to_string(),
                Arc::new(Font::new(spec)),
            )
        })
        .collect()
}
