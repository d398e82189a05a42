///! Language classification over the marker lexicons

use crate::keywords::Lexicon;
use jobpilot_core_types::Language;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How a classification was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum ClassificationBasis {
    /// One lexicon strictly outscored the other.
    Scored { spanish: usize, english: usize },
    /// Both lexicons produced the same score (including zero).
    Tie { score: usize },
    /// Input was empty or unreadable; no scoring took place.
    Fallback { reason: String },
}

/// Classifier output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub language: Language,
    #[serde(flatten)]
    pub basis: ClassificationBasis,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        matches!(self.basis, ClassificationBasis::Fallback { .. })
    }
}

/// Lexicon classifier
#[derive(Clone, Debug)]
pub struct LexiconClassifier {
    spanish: Lexicon,
    english: Lexicon,
}

impl LexiconClassifier {
    /// Create a classifier with the built-in lexicons
    pub fn new() -> Self {
        Self::with_lexicons(Lexicon::spanish(), Lexicon::english())
    }

    pub fn with_lexicons(spanish: Lexicon, english: Lexicon) -> Self {
        Self { spanish, english }
    }

    /// Classify free text.
    ///
    /// Spanish wins only on a strictly higher score. Blank input goes
    /// straight to the fallback without scoring.
    pub fn classify(&self, text: &str) -> Classification {
        if text.trim().is_empty() {
            return self.fallback("empty text");
        }

        let lowered = text.to_lowercase();
        let spanish = self.spanish.score(&lowered);
        let english = self.english.score(&lowered);

        if spanish == english {
            debug!(spanish, english, "language scores tied, using default");
            return Classification {
                language: Language::DEFAULT,
                basis: ClassificationBasis::Tie { score: spanish },
            };
        }

        let language = if spanish > english {
            Language::Spanish
        } else {
            Language::English
        };
        info!(%language, spanish, english, "language detected");
        Classification {
            language,
            basis: ClassificationBasis::Scored { spanish, english },
        }
    }

    /// Classify text that may not have been readable at all.
    pub fn classify_optional(&self, text: Option<&str>) -> Classification {
        match text {
            Some(text) => self.classify(text),
            None => self.fallback("description unreadable"),
        }
    }

    /// Produce the fail-safe default for input that could not be scored.
    pub fn fallback(&self, reason: impl Into<String>) -> Classification {
        let reason = reason.into();
        warn!(
            fallback = true,
            language = %Language::DEFAULT,
            reason = %reason,
            "language classification fell back to default"
        );
        Classification {
            language: Language::DEFAULT,
            basis: ClassificationBasis::Fallback { reason },
        }
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}
