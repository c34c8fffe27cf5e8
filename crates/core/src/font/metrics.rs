//! Standard 14 font widths for the printable ASCII range.
//!
//! Used when a font dictionary carries no usable width table but names one
//! of the base families. Widths are in 1/1000 em and cover `' '..='~'`.
//! Bold and oblique variants share the regular widths closely enough for
//! column placement.

use rustc_hash::FxHashMap;

/// First character covered by the tables below.
const FIRST_PRINTABLE: u8 = b' ';

pub const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

pub const TIMES_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

pub const COURIER_WIDTHS: [u16; 95] = [600; 95];

/// Base-font family prefixes with built-in widths.
const FAMILIES: [(&str, &[u16; 95]); 3] = [
    ("Helvetica", &HELVETICA_WIDTHS),
    ("Times", &TIMES_WIDTHS),
    ("Courier", &COURIER_WIDTHS),
];

/// Look up the built-in width table for a base font name such as
/// `Helvetica-Bold` or `/Times-Roman`.
pub fn standard_widths(basefont: &str) -> Option<FxHashMap<char, f64>> {
    let name = basefont.trim_start_matches('/');
    let (_, table) = FAMILIES
        .iter()
        .find(|(family, _)| name.starts_with(family))?;
    Some(
        table
            .iter()
            .zip(FIRST_PRINTABLE..)
            .map(|(&width, code)| (char::from(code), f64::from(width)))
            .collect(),
    )
}
