//! Deterministic in-memory page driver
//!
//! A `ScriptedPage` plays back a script of named screens. Each screen lists
//! the buttons visible on it (optionally moving to another screen when
//! clicked), whether the résumé file input is shown, the text behind CSS
//! selectors, and the element snapshot the planner would see. Every
//! interaction is appended to an event log.
//!
//! Waits and settles run on virtual time: a wait resolves instantly against
//! the current screen and a settle is only logged.

use async_trait::async_trait;
use jobpilot_core_types::ElementIndex;
use parking_lot::Mutex;
use perceiver_structural::PageSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    driver::PageDriver,
    errors::ActionError,
    types::{AnchorDescriptor, FILE_INPUT_SELECTOR},
};

const BLANK_URL: &str = "about:blank";

/// Errors raised while loading a page script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read page script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page script: {0}")]
    Parse(String),

    #[error("screen '{screen}' referenced by {referenced_by} does not exist")]
    UnknownScreen {
        screen: String,
        referenced_by: String,
    },
}

/// A button shown on a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonScript {
    pub label: String,
    /// Screen shown after the button is clicked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goto: Option<String>,
    /// Visible but rejects clicks
    #[serde(default)]
    pub disabled: bool,
}

/// One state of the scripted page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenScript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub buttons: Vec<ButtonScript>,
    #[serde(default)]
    pub file_input: bool,
    /// CSS selector -> text content
    #[serde(default)]
    pub texts: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PageSnapshot>,
    /// Planner index -> screen shown after clicking it
    #[serde(default)]
    pub on_index: BTreeMap<ElementIndex, String>,
}

impl ScreenScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_button(mut self, label: impl Into<String>) -> Self {
        self.buttons.push(ButtonScript {
            label: label.into(),
            goto: None,
            disabled: false,
        });
        self
    }

    pub fn with_button_to(mut self, label: impl Into<String>, goto: impl Into<String>) -> Self {
        self.buttons.push(ButtonScript {
            label: label.into(),
            goto: Some(goto.into()),
            disabled: false,
        });
        self
    }

    pub fn with_file_input(mut self) -> Self {
        self.file_input = true;
        self
    }

    pub fn with_text(mut self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(selector.into(), text.into());
        self
    }

    pub fn with_snapshot(mut self, snapshot: PageSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn with_index_goto(mut self, index: impl Into<ElementIndex>, goto: impl Into<String>) -> Self {
        self.on_index.insert(index.into(), goto.into());
        self
    }
}

/// A complete page script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageScript {
    /// Name of the first screen
    pub start: String,
    /// URL used by screens that do not set their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub screens: BTreeMap<String, ScreenScript>,
}

impl PageScript {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            url: None,
            screens: BTreeMap::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn screen(mut self, name: impl Into<String>, screen: ScreenScript) -> Self {
        self.screens.insert(name.into(), screen);
        self
    }

    /// Check that every screen reference points at a defined screen.
    pub fn validate(&self) -> Result<(), ScriptError> {
        let check = |screen: &str, referenced_by: String| {
            if self.screens.contains_key(screen) {
                Ok(())
            } else {
                Err(ScriptError::UnknownScreen {
                    screen: screen.to_string(),
                    referenced_by,
                })
            }
        };
        check(&self.start, "start".to_string())?;
        for (name, screen) in &self.screens {
            for button in &screen.buttons {
                if let Some(goto) = &button.goto {
                    check(goto, format!("button '{}' on '{}'", button.label, name))?;
                }
            }
            for (index, goto) in &screen.on_index {
                check(goto, format!("index {} on '{}'", index, name))?;
            }
        }
        Ok(())
    }
}

/// One logged interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    Click { target: String },
    ClickIndex { index: ElementIndex },
    Upload { target: String, path: PathBuf },
    Settle { ms: u64 },
    Navigate { from: String, to: String },
}

#[derive(Debug)]
struct ScriptState {
    current: String,
    events: Vec<PageEvent>,
}

/// What an anchor resolved to on the current screen.
enum Hit<'a> {
    Button(&'a ButtonScript),
    Text { selector: &'a str, text: &'a str },
    FileInput,
}

/// Deterministic page driver backed by a [`PageScript`].
#[derive(Debug)]
pub struct ScriptedPage {
    script: PageScript,
    state: Mutex<ScriptState>,
}

impl ScriptedPage {
    pub fn new(script: PageScript) -> Result<Self, ScriptError> {
        script.validate()?;
        let state = ScriptState {
            current: script.start.clone(),
            events: Vec::new(),
        };
        Ok(Self {
            script,
            state: Mutex::new(state),
        })
    }

    /// Parse a YAML (or JSON) script.
    pub fn from_yaml_str(source: &str) -> Result<Self, ScriptError> {
        let script: PageScript =
            serde_yaml::from_str(source).map_err(|err| ScriptError::Parse(err.to_string()))?;
        Self::new(script)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn current_screen(&self) -> String {
        self.state.lock().current.clone()
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.state.lock().events.clone()
    }

    /// Number of file attachments performed so far.
    pub fn uploads(&self) -> usize {
        self.state
            .lock()
            .events
            .iter()
            .filter(|event| matches!(event, PageEvent::Upload { .. }))
            .count()
    }

    /// Targets of every anchor click, in order.
    pub fn clicked(&self) -> Vec<String> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Click { target } => Some(target.clone()),
                _ => None,
            })
            .collect()
    }

    fn screen(&self, name: &str) -> Result<&ScreenScript, ActionError> {
        self.script
            .screens
            .get(name)
            .ok_or_else(|| ActionError::Internal(format!("screen '{}' vanished", name)))
    }

    fn record(&self, event: PageEvent) {
        debug!(?event, "scripted page event");
        self.state.lock().events.push(event);
    }

    fn navigate(&self, to: &str) {
        let mut state = self.state.lock();
        let from = std::mem::replace(&mut state.current, to.to_string());
        info!(from = %from, to = %to, "scripted page navigated");
        state.events.push(PageEvent::Navigate {
            from,
            to: to.to_string(),
        });
    }

    fn find<'a>(screen: &'a ScreenScript, anchor: &AnchorDescriptor) -> Option<Hit<'a>> {
        match anchor {
            AnchorDescriptor::Css(group) => group.split(',').map(str::trim).find_map(|part| {
                if part == FILE_INPUT_SELECTOR && screen.file_input {
                    return Some(Hit::FileInput);
                }
                screen
                    .texts
                    .get_key_value(part)
                    .map(|(selector, text)| Hit::Text { selector, text })
            }),
            AnchorDescriptor::Role { role, name } => {
                if !role.eq_ignore_ascii_case("button") {
                    return None;
                }
                screen
                    .buttons
                    .iter()
                    .find(|button| AnchorDescriptor::name_matches(name, &button.label))
                    .map(Hit::Button)
            }
            AnchorDescriptor::Text { content, exact } => {
                let matches = |candidate: &str| {
                    if *exact {
                        candidate.trim() == content.trim()
                    } else {
                        candidate.contains(content.as_str())
                    }
                };
                screen
                    .buttons
                    .iter()
                    .find(|button| matches(&button.label))
                    .map(Hit::Button)
                    .or_else(|| {
                        screen
                            .texts
                            .iter()
                            .find(|(_, text)| matches(text))
                            .map(|(selector, text)| Hit::Text { selector, text })
                    })
            }
        }
    }
}

#[async_trait]
impl PageDriver for ScriptedPage {
    async fn is_visible(&self, anchor: &AnchorDescriptor) -> Result<bool, ActionError> {
        let current = self.current_screen();
        let screen = self.screen(&current)?;
        Ok(Self::find(screen, anchor).is_some())
    }

    async fn wait_visible(
        &self,
        anchor: &AnchorDescriptor,
        timeout: Duration,
    ) -> Result<(), ActionError> {
        if self.is_visible(anchor).await? {
            Ok(())
        } else {
            Err(ActionError::WaitTimeout(format!(
                "{} not visible within {}ms",
                anchor,
                timeout.as_millis()
            )))
        }
    }

    async fn click(&self, anchor: &AnchorDescriptor) -> Result<(), ActionError> {
        let current = self.current_screen();
        let screen = self.screen(&current)?;
        let goto = match Self::find(screen, anchor) {
            Some(Hit::Button(button)) if button.disabled => {
                return Err(ActionError::NotClickable(anchor.to_string()));
            }
            Some(Hit::Button(button)) => button.goto.clone(),
            Some(_) => None,
            None => return Err(ActionError::AnchorNotFound(anchor.to_string())),
        };
        self.record(PageEvent::Click {
            target: anchor.to_string(),
        });
        if let Some(goto) = goto {
            self.navigate(&goto);
        }
        Ok(())
    }

    async fn click_index(&self, index: ElementIndex) -> Result<(), ActionError> {
        let current = self.current_screen();
        let screen = self.screen(&current)?;
        let known = screen
            .snapshot
            .as_ref()
            .map(|snapshot| snapshot.element(index).is_some())
            .unwrap_or(false);
        if !known {
            return Err(ActionError::UnknownIndex(index.0));
        }
        self.record(PageEvent::ClickIndex { index });
        if let Some(goto) = screen.on_index.get(&index) {
            self.navigate(goto);
        }
        Ok(())
    }

    async fn set_input_files(
        &self,
        anchor: &AnchorDescriptor,
        path: &Path,
    ) -> Result<(), ActionError> {
        let current = self.current_screen();
        let screen = self.screen(&current)?;
        match Self::find(screen, anchor) {
            Some(Hit::FileInput) => {
                self.record(PageEvent::Upload {
                    target: anchor.to_string(),
                    path: path.to_path_buf(),
                });
                Ok(())
            }
            Some(_) => Err(ActionError::Upload(format!("{} is not a file input", anchor))),
            None => Err(ActionError::AnchorNotFound(anchor.to_string())),
        }
    }

    async fn settle(&self, duration: Duration) {
        self.record(PageEvent::Settle {
            ms: duration.as_millis() as u64,
        });
    }

    async fn text_content(&self, anchor: &AnchorDescriptor) -> Result<Option<String>, ActionError> {
        let current = self.current_screen();
        let screen = self.screen(&current)?;
        Ok(match Self::find(screen, anchor) {
            Some(Hit::Text { selector, text }) => {
                debug!(selector, "scripted text read");
                Some(text.to_string())
            }
            Some(Hit::Button(button)) => Some(button.label.clone()),
            Some(Hit::FileInput) | None => None,
        })
    }

    async fn current_url(&self) -> Result<String, ActionError> {
        let current = self.current_screen();
        let screen = self.screen(&current)?;
        Ok(screen
            .url
            .clone()
            .or_else(|| self.script.url.clone())
            .unwrap_or_else(|| BLANK_URL.to_string()))
    }

    async fn snapshot(&self) -> Result<PageSnapshot, ActionError> {
        let current = self.current_screen();
        let screen = self.screen(&current)?;
        let mut snapshot = screen.snapshot.clone().unwrap_or_default();
        if snapshot.url.is_none() {
            snapshot.url = Some(self.current_url().await?);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perceiver_structural::DomNode;

    const WIZARD: &str = r#"
start: job
url: https://www.linkedin.com/jobs/view/42/
screens:
  job:
    buttons:
      - label: Solicitud sencilla
        goto: form
    texts:
      h1.job-title: "  Data Analyst "
      .jobs-description: Requisitos de experiencia
  form:
    file_input: true
    buttons:
      - label: Enviar solicitud
        goto: done
      - label: Guardar
        disabled: true
  done:
    url: https://www.linkedin.com/jobs/view/42/applied
"#;

    #[tokio::test]
    async fn buttons_move_between_screens() {
        let page = ScriptedPage::from_yaml_str(WIZARD).unwrap();
        page.click(&AnchorDescriptor::button("Solicitud sencilla"))
            .await
            .unwrap();
        assert_eq!(page.current_screen(), "form");
        page.click(&AnchorDescriptor::button("enviar")).await.unwrap();
        assert_eq!(page.current_screen(), "done");
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://www.linkedin.com/jobs/view/42/applied"
        );
        assert_eq!(page.clicked().len(), 2);
    }

    #[tokio::test]
    async fn missing_and_disabled_buttons_fail() {
        let page = ScriptedPage::from_yaml_str(WIZARD).unwrap();
        let err = page.click(&AnchorDescriptor::button("Next")).await.unwrap_err();
        assert!(matches!(err, ActionError::AnchorNotFound(_)));

        page.click(&AnchorDescriptor::button("Solicitud sencilla"))
            .await
            .unwrap();
        let err = page
            .click(&AnchorDescriptor::button("Guardar"))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::NotClickable(_)));
        assert_eq!(page.current_screen(), "form");
    }

    #[tokio::test]
    async fn wait_fails_without_sleeping_when_absent() {
        let page = ScriptedPage::from_yaml_str(WIZARD).unwrap();
        let err = page
            .wait_visible(&AnchorDescriptor::button("Next"), Duration::from_secs(3600))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::WaitTimeout(_)));
    }

    #[tokio::test]
    async fn uploads_only_into_file_input() {
        let page = ScriptedPage::from_yaml_str(WIZARD).unwrap();
        let input = AnchorDescriptor::css(FILE_INPUT_SELECTOR);
        assert!(!page.is_visible(&input).await.unwrap());

        page.click(&AnchorDescriptor::button("Solicitud sencilla"))
            .await
            .unwrap();
        page.set_input_files(&input, Path::new("cv_es.pdf"))
            .await
            .unwrap();
        assert_eq!(page.uploads(), 1);
    }

    #[tokio::test]
    async fn selector_groups_match_any_member() {
        let page = ScriptedPage::from_yaml_str(WIZARD).unwrap();
        let text = page
            .text_content(&AnchorDescriptor::css(
                "[data-job-id], .job-details, .jobs-description",
            ))
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("Requisitos de experiencia"));
        assert_eq!(
            page.text_content(&AnchorDescriptor::css(".missing"))
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn index_clicks_require_snapshot_entry() {
        let mut snapshot = PageSnapshot::new();
        let node = snapshot.push(DomNode::new("button").with_text("Remoto"));
        snapshot.index(5, node);
        let script = PageScript::new("search")
            .screen(
                "search",
                ScreenScript::new()
                    .with_snapshot(snapshot)
                    .with_index_goto(5, "filtered"),
            )
            .screen("filtered", ScreenScript::new());
        let page = ScriptedPage::new(script).unwrap();

        assert_eq!(
            page.click_index(ElementIndex(6)).await,
            Err(ActionError::UnknownIndex(6))
        );
        page.click_index(ElementIndex(5)).await.unwrap();
        assert_eq!(page.current_screen(), "filtered");
        assert_eq!(page.snapshot().await.unwrap().url.as_deref(), Some(BLANK_URL));
    }

    #[test]
    fn dangling_goto_is_rejected() {
        let script = PageScript::new("a").screen(
            "a",
            ScreenScript::new().with_button_to("Next", "b"),
        );
        assert!(matches!(
            ScriptedPage::new(script),
            Err(ScriptError::UnknownScreen { .. })
        ));
    }

    #[test]
    fn script_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.yaml");
        std::fs::write(&path, WIZARD).unwrap();
        let page = ScriptedPage::from_path(&path).unwrap();
        assert_eq!(page.current_screen(), "job");
        assert!(matches!(
            ScriptedPage::from_path(&dir.path().join("missing.yaml")),
            Err(ScriptError::Io { .. })
        ));
    }
}
