// Filter & Rank Engine
// Implements: progressive-fallback filtering, per-pair TF-IDF similarity,
// stable ranking with top-K selection, selector options and result cards.

pub mod cards;
pub mod dimensions;
pub mod filter;
pub mod handlers;
pub mod ranking;
pub mod similarity;
