//! Noun lemmatizer — reduces plural nouns to their base form.
//!
//! Follows WordNet's noun morphology: irregular forms come from a fixed
//! table, otherwise each detachment rule proposes a stem and only stems found
//! in the bundled noun list are accepted. The shortest accepted form wins.
//! Words with no accepted form are returned unchanged, so proper nouns and
//! tool names (`texas`, `jenkins`, `devops`) survive intact.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const NOUN_LIST: &str = include_str!("../../data/nouns.txt");

/// (suffix, replacement), tried in this order.
const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "people"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("halves", "half"),
    ("leaves", "leaf"),
    ("analyses", "analysis"),
    ("diagnoses", "diagnosis"),
    ("hypotheses", "hypothesis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("data", "data"),
];

static IRREGULAR_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR.iter().copied().collect());

static NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    NOUN_LIST
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
});

pub fn is_known_noun(word: &str) -> bool {
    NOUNS.contains(word)
}

/// Returns the base form of a lowercase token.
pub fn lemmatize(word: &str) -> String {
    if let Some(base) = IRREGULAR_MAP.get(word) {
        return (*base).to_string();
    }

    let detached = DETACHMENT_RULES.iter().filter_map(|&(suffix, replacement)| {
        word.strip_suffix(suffix)
            .filter(|stem| !stem.is_empty())
            .map(|stem| format!("{stem}{replacement}"))
    });

    std::iter::once(word.to_string())
        .chain(detached)
        .filter(|form| is_known_noun(form))
        .min_by_key(String::len)
        .unwrap_or_else(|| word.to_string())
}
