//! Unicode cleanup applied to every decoded string.

use unicode_normalization::UnicodeNormalization;

const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// NFC-normalise and expand typographic ligatures.
///
/// Replacement characters and private-use glyphs are kept: they are the
/// corruption signal the validator scores.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, expanded)) => out.push_str(expanded),
            None => out.push(c),
        }
    }
    out
}
