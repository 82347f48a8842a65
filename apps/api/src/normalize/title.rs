use std::sync::LazyLock;

use regex::Regex;

/// Removal passes for raw titles, applied in order, each to the output of
/// the previous one. Later passes assume currency and location noise is
/// already gone, so the order must not change.
static TITLE_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\$\d+(/hr)?\s*\|?\s*", // "$25/hr | " salary prefix
        r"\s?\([^)]*\)?",        // parenthetical qualifier, possibly unterminated
        r"\$+[\s\d,]",           // stray currency fragment
        r" in .+",               // trailing "in <location>"
        r"[^a-zA-Z\s]",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("title pattern compiles"))
    .collect()
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Cleans a raw title down to uppercase ASCII words separated by single spaces.
pub fn normalize_title(raw: &str) -> String {
    let stripped = TITLE_NOISE
        .iter()
        .fold(raw.to_string(), |text, pattern| {
            pattern.replace_all(&text, "").into_owned()
        });

    WHITESPACE
        .replace_all(&stripped.to_uppercase(), " ")
        .trim()
        .to_string()
}
