///! Marker lexicons used by the language classifier

use jobpilot_core_types::Language;

/// Markers that indicate a Spanish-language posting.
pub const SPANISH_MARKERS: &[&str] = &[
    "requisitos",
    "experiencia",
    "conocimientos",
    "habilidades",
    "responsabilidades",
    "funciones",
    "empresa",
    "trabajo",
    "equipo",
    "desarrollar",
    "años",
    "título",
    "licenciatura",
    "universidad",
    "postgrado",
    "maestría",
    "estudiante",
];

/// Markers that indicate an English-language posting.
pub const ENGLISH_MARKERS: &[&str] = &[
    "requirements",
    "experience",
    "skills",
    "responsibilities",
    "qualifications",
    "bachelor",
    "degree",
    "university",
    "graduate",
    "team",
    "develop",
    "years",
    "knowledge",
    "ability",
    "working",
    "company",
    "role",
    "position",
];

/// A fixed set of lower-case markers for one language.
#[derive(Clone, Debug)]
pub struct Lexicon {
    language: Language,
    markers: Vec<String>,
}

impl Lexicon {
    pub fn new<I, S>(language: Language, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut markers: Vec<String> = markers
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        markers.sort();
        markers.dedup();
        Self { language, markers }
    }

    pub fn spanish() -> Self {
        Self::new(Language::Spanish, SPANISH_MARKERS)
    }

    pub fn english() -> Self {
        Self::new(Language::English, ENGLISH_MARKERS)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Count distinct markers occurring anywhere in `lowered`.
    ///
    /// `lowered` must already be lower-cased. Repeated occurrences of the
    /// same marker count once.
    pub fn score(&self, lowered: &str) -> usize {
        self.markers
            .iter()
            .filter(|marker| lowered.contains(marker.as_str()))
            .count()
    }
}
