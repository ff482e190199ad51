use aho_corasick::AhoCorasick;
use lazy_static::lazy_static;

/// Typographic quote and apostrophe variants folded into `'`.
const QUOTE_VARIANTS: &[&str] = &[
    "\u{2019}", // ’
    "\u{2018}", // ‘
    "\u{201A}", // ‚
    "\u{201B}", // ‛
    "\u{201C}", // “
    "\u{201D}", // ”
    "\u{201E}", // „
    "\u{201F}", // ‟
    "\u{2039}", // ‹
    "\u{203A}", // ›
    "\u{00AB}", // «
    "\u{00BB}", // »
    "\u{300C}", // 「
    "\u{300D}", // 」
    "\u{300E}", // 『
    "\u{300F}", // 』
];

lazy_static! {
    static ref QUOTES: AhoCorasick = AhoCorasick::new(QUOTE_VARIANTS).unwrap();
}

/// Normalize a raw token into the key used for cache lookups and
/// dictionary requests.
pub fn sanitize(term: &str) -> String {
    let replacements = vec!["'"; QUOTE_VARIANTS.len()];
    QUOTES.replace_all(term, &replacements)
}
