//! Semantic Perceiver - language classification for job postings
//!
//! Scores free text against two fixed keyword lexicons and returns the
//! dominant language, falling back to English on ties, empty input or
//! unreadable descriptions. The fallback path is reported separately from
//! a scored result so callers and logs can tell the two apart.
pub mod keywords;
pub mod language;

// Re-exports
pub use keywords::{Lexicon, ENGLISH_MARKERS, SPANISH_MARKERS};
pub use language::{Classification, ClassificationBasis, LexiconClassifier};
