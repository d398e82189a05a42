//! Default candidate labels and selectors

/// Buttons that open the application wizard, in priority order.
pub const ENTRY_LABELS: &[&str] = &[
    "Solicitud sencilla",
    "Easy Apply",
    "Aplicar ahora",
    "Apply now",
    "Postularme",
];

/// Buttons that move the wizard to its next page.
pub const ADVANCE_LABELS: &[&str] = &["Siguiente", "Next", "Continuar", "Continue"];

/// Buttons that submit the application.
pub const SUBMIT_LABELS: &[&str] = &[
    "Enviar solicitud",
    "Submit application",
    "Enviar",
    "Submit",
    "Postularme",
];

pub const TITLE_SELECTORS: &[&str] = &[
    "h1.job-title",
    ".job-details-jobs-unified-top-card__job-title",
    "h1[data-test-job-title]",
    ".jobs-unified-top-card__job-title",
];

pub const COMPANY_SELECTORS: &[&str] = &[
    ".job-details-jobs-unified-top-card__company-name",
    "a[data-test-job-company-name]",
    ".jobs-unified-top-card__company-name",
];

/// Primary description panel, then the search-results container.
pub const DESCRIPTION_SELECTORS: &[&str] = &[
    "[data-job-id], .job-details, .jobs-description",
    ".jobs-search__job-details--container",
];

/// Owned copy of a label table, for configuration defaults.
pub fn to_owned_labels(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}
