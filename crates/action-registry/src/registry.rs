//! Dispatch of named actions to their components

use action_flow::{
    apply_filter, detect_job_language, extract_job_info, ApplyFlow, FilterClick,
};
use action_primitives::PageDriver;
use jobpilot_core_types::{ActionId, ElementIndex};
use jobpilot_ledger::{ApplicationRecord, JobListingRecord, Ledger};
use perceiver_semantic::LexiconClassifier;
use perceiver_structural::LinkResolver;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::RegistryError;
use crate::human::{CodePrompt, ConsoleCodePrompt};
use crate::manifest::{
    ActionKind, ActionManifest, ApplyParams, FilterParams, NoParams, ResolveLinkParams,
};
use crate::outcome::ActionOutcome;

/// Default cap on actions per planner run.
pub const DEFAULT_MAX_ACTIONS: usize = 250;

/// Components the registry routes to.
pub struct RegistrySettings {
    pub apply_flow: ApplyFlow,
    pub filter: FilterClick,
    pub resolver: LinkResolver,
    pub applications: Ledger<ApplicationRecord>,
    pub listings: Ledger<JobListingRecord>,
    /// `None` disables the run budget
    pub max_actions: Option<usize>,
}

/// Named operations exposed to the planner.
pub struct ActionRegistry {
    page: Arc<dyn PageDriver>,
    classifier: LexiconClassifier,
    apply_flow: ApplyFlow,
    filter: FilterClick,
    resolver: LinkResolver,
    applications: Ledger<ApplicationRecord>,
    listings: Ledger<JobListingRecord>,
    prompt: Arc<dyn CodePrompt>,
    max_actions: Option<usize>,
    used: AtomicUsize,
}

impl ActionRegistry {
    pub fn new(page: Arc<dyn PageDriver>, settings: RegistrySettings) -> Self {
        for missing in settings.apply_flow.resumes().missing() {
            warn!(resume = %missing.display(), "resume file not found");
        }
        Self {
            page,
            classifier: LexiconClassifier::new(),
            apply_flow: settings.apply_flow,
            filter: settings.filter,
            resolver: settings.resolver,
            applications: settings.applications,
            listings: settings.listings,
            prompt: Arc::new(ConsoleCodePrompt),
            max_actions: settings.max_actions,
            used: AtomicUsize::new(0),
        }
    }

    pub fn with_prompt(mut self, prompt: Arc<dyn CodePrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_classifier(mut self, classifier: LexiconClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn manifests(&self) -> Vec<ActionManifest> {
        ActionKind::ALL.iter().map(ActionKind::manifest).collect()
    }

    /// Dispatches consumed so far, including rejected ones.
    pub fn actions_used(&self) -> usize {
        self.used.load(Ordering::SeqCst)
    }

    /// Run the action called `name` and fold the result into an outcome.
    pub async fn dispatch(&self, name: &str, params: Value) -> ActionOutcome {
        let action_id = ActionId::new();
        match self.try_dispatch(name, params).await {
            Ok(outcome) => {
                info!(%action_id, action = name, "action succeeded");
                outcome
            }
            Err(err) => {
                warn!(%action_id, action = name, error = %err, "action failed");
                err.into()
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch) but keeps the typed error.
    pub async fn try_dispatch(
        &self,
        name: &str,
        params: Value,
    ) -> Result<ActionOutcome, RegistryError> {
        self.consume_budget()?;
        let kind: ActionKind = name.parse()?;

        match kind {
            ActionKind::DetectJobLanguage => {
                parse_params::<NoParams>(kind, params)?;
                let classification =
                    detect_job_language(self.page.as_ref(), &self.classifier).await;
                let value = serde_json::to_value(&classification)
                    .map_err(|err| RegistryError::Encoding(err.to_string()))?;
                Ok(ActionOutcome::extracted(value))
            }
            ActionKind::ApplyToJob => {
                let params: ApplyParams = parse_params(kind, params)?;
                let confirmation = self
                    .apply_flow
                    .apply(params.language, self.page.as_ref())
                    .await?;
                Ok(ActionOutcome::memorable(confirmation.to_string()))
            }
            ActionKind::ExtractJobInfo => {
                parse_params::<NoParams>(kind, params)?;
                let info = extract_job_info(self.page.as_ref()).await?;
                Ok(ActionOutcome::extracted(info.to_string()))
            }
            ActionKind::CountApplications => {
                parse_params::<NoParams>(kind, params)?;
                Ok(ActionOutcome::extracted(self.applications.count()?))
            }
            ActionKind::SaveApplication => {
                let record: ApplicationRecord = parse_params(kind, params)?;
                let confirmation = self.applications.append(&record)?;
                Ok(ActionOutcome::extracted(format!(
                    "Application recorded: '{}'",
                    confirmation.label
                )))
            }
            ActionKind::CountJobListings => {
                parse_params::<NoParams>(kind, params)?;
                Ok(ActionOutcome::extracted(self.listings.count()?))
            }
            ActionKind::SaveJobListing => {
                let record: JobListingRecord = parse_params(kind, params)?;
                let confirmation = self.listings.append(&record)?;
                Ok(ActionOutcome::extracted(format!(
                    "Job listing saved: '{}'",
                    confirmation.label
                )))
            }
            ActionKind::ResolveJobLink => {
                let params: ResolveLinkParams = parse_params(kind, params)?;
                let snapshot = self.page.snapshot().await?;
                let link = self
                    .resolver
                    .resolve_link(ElementIndex(params.index), &snapshot)?;
                Ok(ActionOutcome::extracted(link))
            }
            ActionKind::ApplyFilter => {
                let params: FilterParams = parse_params(kind, params)?;
                apply_filter(self.page.as_ref(), &params.text, self.filter).await?;
                Ok(ActionOutcome::extracted(format!(
                    "Filter '{}' applied",
                    params.text.trim()
                )))
            }
            ActionKind::RequestVerificationCode => {
                parse_params::<NoParams>(kind, params)?;
                let code = self.prompt.request_code()?;
                Ok(ActionOutcome::memorable(code))
            }
        }
    }

    fn consume_budget(&self) -> Result<(), RegistryError> {
        let used = self.used.fetch_add(1, Ordering::SeqCst);
        match self.max_actions {
            Some(limit) if used >= limit => Err(RegistryError::BudgetExhausted { limit }),
            _ => Ok(()),
        }
    }
}

/// Deserialize action parameters, treating `null` as no parameters.
fn parse_params<T: DeserializeOwned>(kind: ActionKind, params: Value) -> Result<T, RegistryError> {
    let params = if params.is_null() { json!({}) } else { params };
    serde_json::from_value(params).map_err(|err| RegistryError::InvalidParams {
        action: kind.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::human::{HumanInputError, LineCodePrompt};
    use action_flow::{ApplyLabels, ApplyTiming, ResumeSet};
    use action_primitives::{PageScript, ScreenScript, ScriptedPage};
    use perceiver_structural::{DomNode, PageSnapshot, DEFAULT_SITE_ORIGIN};
    use std::io::Cursor;
    use std::path::Path;

    fn search_snapshot() -> PageSnapshot {
        let mut snapshot = PageSnapshot::new();
        let card = snapshot.push(DomNode::new("a").with_attr("href", "/jobs/view/3901/"));
        let title = snapshot.push(
            DomNode::new("span")
                .with_text("Data Scientist")
                .with_parent(card),
        );
        let chip = snapshot.push(DomNode::new("button"));
        snapshot.push(DomNode::new("span").with_text("Remoto").with_parent(chip));
        snapshot.index(3, title);
        snapshot.index(8, chip);
        snapshot
    }

    fn page() -> Arc<ScriptedPage> {
        let script = PageScript::new("job")
            .with_url("https://www.linkedin.com/jobs/view/3901/")
            .screen(
                "job",
                ScreenScript::new()
                    .with_button_to("Solicitud sencilla", "form")
                    .with_text(".job-details-jobs-unified-top-card__job-title", "Data Scientist")
                    .with_text(".jobs-unified-top-card__company-name", "Acme")
                    .with_text(".jobs-description", "Requisitos: experiencia en equipo")
                    .with_snapshot(search_snapshot())
                    .with_index_goto(8, "job"),
            )
            .screen(
                "form",
                ScreenScript::new()
                    .with_file_input()
                    .with_button_to("Enviar solicitud", "done"),
            )
            .screen("done", ScreenScript::new());
        Arc::new(ScriptedPage::new(script).unwrap())
    }

    fn registry(dir: &Path, page: Arc<ScriptedPage>, max_actions: Option<usize>) -> ActionRegistry {
        let settings = RegistrySettings {
            apply_flow: ApplyFlow::new(
                ResumeSet::default(),
                ApplyTiming::default(),
                &ApplyLabels::default(),
            ),
            filter: FilterClick::default(),
            resolver: LinkResolver::new(DEFAULT_SITE_ORIGIN).unwrap(),
            applications: Ledger::new(dir.join("applications.csv")),
            listings: Ledger::new(dir.join("listings.csv")),
            max_actions,
        };
        ActionRegistry::new(page, settings)
    }

    #[tokio::test]
    async fn unknown_action_is_an_error_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path(), page(), None);
        let outcome = registry.dispatch("book_flight", Value::Null).await;
        assert_eq!(outcome.error(), Some("unknown action 'book_flight'"));
    }

    #[tokio::test]
    async fn unknown_params_are_rejected_before_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let page = page();
        let registry = registry(dir.path(), page.clone(), None);
        let outcome = registry
            .dispatch("apply_to_job", json!({"language": "spanish", "force": true}))
            .await;
        assert!(outcome.is_error());
        assert!(page.events().is_empty());
    }

    #[tokio::test]
    async fn detects_language_from_description() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path(), page(), None);
        let outcome = registry.dispatch("detect_job_language", json!({})).await;
        let value = outcome.value().unwrap();
        assert_eq!(value["language"], "spanish");
        assert_eq!(value["basis"], "scored");
    }

    #[tokio::test]
    async fn apply_is_memorable() {
        let dir = tempfile::tempdir().unwrap();
        let page = page();
        let registry = registry(dir.path(), page.clone(), None);
        let outcome = registry
            .dispatch("apply_to_job", json!({"language": "es"}))
            .await;
        match outcome {
            ActionOutcome::Extracted {
                extracted,
                memorable,
            } => {
                assert!(memorable);
                assert_eq!(
                    extracted,
                    "Application submitted with resume_es.pdf (1 step(s))"
                );
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(page.current_screen(), "done");
    }

    #[tokio::test]
    async fn extracts_job_info_line() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path(), page(), None);
        let outcome = registry.dispatch("extract_job_info", Value::Null).await;
        assert_eq!(
            outcome.value().unwrap(),
            "Job: Data Scientist | Company: Acme | URL: https://www.linkedin.com/jobs/view/3901/"
        );
    }

    #[tokio::test]
    async fn resolves_link_from_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path(), page(), None);
        let outcome = registry
            .dispatch("resolve_job_link", json!({"index": 3}))
            .await;
        assert_eq!(
            outcome.value().unwrap(),
            "https://www.linkedin.com/jobs/view/3901/"
        );
        let outcome = registry
            .dispatch("resolve_job_link", json!({"index": 99}))
            .await;
        assert!(outcome.error().unwrap().contains("99"));
    }

    #[tokio::test]
    async fn filter_click_goes_through_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let page = page();
        let registry = registry(dir.path(), page.clone(), None);
        let outcome = registry
            .dispatch("apply_filter", json!({"text": "Remoto"}))
            .await;
        assert_eq!(outcome.value().unwrap(), "Filter 'Remoto' applied");
        assert!(page
            .events()
            .iter()
            .any(|event| matches!(event, action_primitives::PageEvent::ClickIndex { index } if index.0 == 8)));
    }

    #[tokio::test]
    async fn save_and_count_listings() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path(), page(), None);
        let saved = registry
            .dispatch(
                "save_job_listing",
                json!({
                    "title": "Data Scientist",
                    "company": "Acme",
                    "description": "Python, SQL",
                    "link": "https://www.linkedin.com/jobs/view/3901/"
                }),
            )
            .await;
        assert_eq!(
            saved.value().unwrap(),
            "Job listing saved: 'Data Scientist - Acme'"
        );
        let count = registry.dispatch("count_job_listings", Value::Null).await;
        assert_eq!(count, ActionOutcome::extracted(1));
        let count = registry.dispatch("count_applications", Value::Null).await;
        assert_eq!(count, ActionOutcome::extracted(0));
    }

    #[tokio::test]
    async fn invalid_record_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path(), page(), None);
        let outcome = registry
            .dispatch(
                "save_application",
                json!({
                    "job_title": "",
                    "company": "Acme",
                    "detected_language": "english",
                    "resume_variant": "resume_en.pdf",
                    "outcome": "failed",
                    "link": "/jobs/view/1/",
                    "notes": ""
                }),
            )
            .await;
        assert!(outcome.error().unwrap().contains("job_title"));
        assert!(!dir.path().join("applications.csv").exists());
    }

    #[tokio::test]
    async fn verification_code_comes_from_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path(), page(), None).with_prompt(Arc::new(
            LineCodePrompt::new(Cursor::new("771204\n"), Vec::new()),
        ));
        let outcome = registry
            .dispatch("request_verification_code", Value::Null)
            .await;
        assert_eq!(outcome, ActionOutcome::memorable("771204"));
    }

    #[tokio::test]
    async fn blank_code_is_no_code_provided() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path(), page(), None).with_prompt(Arc::new(
            LineCodePrompt::new(Cursor::new("\n"), Vec::new()),
        ));
        assert_eq!(
            registry
                .try_dispatch("request_verification_code", Value::Null)
                .await,
            Err(RegistryError::HumanInput(HumanInputError::NoCodeProvided))
        );
    }

    #[tokio::test]
    async fn budget_stops_further_dispatches() {
        let dir = tempfile::tempdir().unwrap();
        let page = page();
        let registry = registry(dir.path(), page.clone(), Some(2));
        assert!(!registry.dispatch("count_applications", Value::Null).await.is_error());
        assert!(registry.dispatch("nope", Value::Null).await.is_error());

        let outcome = registry
            .dispatch("apply_to_job", json!({"language": "english"}))
            .await;
        assert_eq!(
            outcome.error(),
            Some("action budget exhausted after 2 actions")
        );
        assert!(page.events().is_empty());
        assert_eq!(registry.actions_used(), 3);
    }
}
