//! Term normalization.
//!
//! Both catalog building and lookup go through [`normalize`], so any display
//! label and any user-typed term that differ only in case, whitespace, or
//! (for Spanish) accents map to the same catalog key.

/// Accented characters folded for Spanish languages, paired with their
/// replacements. Source and target alphabets are disjoint, so the fold is
/// order-independent.
const ACCENT_FOLDS: &[(char, char)] = &[
    ('á', 'a'),
    ('é', 'e'),
    ('í', 'i'),
    ('ó', 'o'),
    ('ú', 'u'),
    ('ñ', 'n'),
    ('ç', 'c'),
];

/// Normalize a term for catalog lookup.
///
/// Lowercases the input and collapses runs of whitespace to single spaces.
/// When `fold_accents` is true (Spanish server languages), `á é í ó ú ñ ç`
/// are replaced by their unaccented equivalents so terms can be typed
/// without accents.
///
/// Call sites pass already-trimmed text; leading or trailing whitespace is
/// collapsed but not removed.
pub fn normalize(text: &str, fold_accents: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        for lowered in ch.to_lowercase() {
            out.push(fold_char(lowered, fold_accents));
        }
    }

    out
}

fn fold_char(ch: char, fold_accents: bool) -> char {
    if !fold_accents {
        return ch;
    }
    ACCENT_FOLDS
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
        .unwrap_or(ch)
}
