//! Reading posting details off the current page

use action_locator::{CandidateChain, COMPANY_SELECTORS, DESCRIPTION_SELECTORS, TITLE_SELECTORS};
use action_primitives::{ActionError, AnchorDescriptor, PageDriver};
use perceiver_semantic::{Classification, LexiconClassifier};
use tracing::{debug, info};

use crate::types::JobInfo;

/// Extract title, company and URL of the posting on screen.
///
/// Missing title or company selectors yield empty strings; only a failure
/// to read the page URL is an error.
pub async fn extract_job_info(page: &dyn PageDriver) -> Result<JobInfo, ActionError> {
    let title = CandidateChain::selectors("title", TITLE_SELECTORS)
        .first_text(page)
        .await
        .unwrap_or_default();
    let company = CandidateChain::selectors("company", COMPANY_SELECTORS)
        .first_text(page)
        .await
        .unwrap_or_default();
    let link = page.current_url().await?;

    let info = JobInfo {
        title,
        company,
        link,
    };
    info!(title = %info.title, company = %info.company, link = %info.link, "job info extracted");
    Ok(info)
}

/// Text of the job description panel, or `None` when nothing readable is
/// on screen. Each selector group is read in order and the first non-blank
/// text wins.
pub async fn read_description(page: &dyn PageDriver) -> Option<String> {
    for selector in DESCRIPTION_SELECTORS {
        let anchor = AnchorDescriptor::css(*selector);
        match page.text_content(&anchor).await {
            Ok(Some(text)) if !text.trim().is_empty() => return Some(text),
            Ok(_) => debug!(selector, "description selector empty"),
            Err(err) => debug!(selector, error = %err, "description read failed"),
        }
    }
    None
}

/// Classify the language of the posting currently on screen.
pub async fn detect_job_language(
    page: &dyn PageDriver,
    classifier: &LexiconClassifier,
) -> Classification {
    let description = read_description(page).await;
    classifier.classify_optional(description.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_primitives::{PageScript, ScreenScript, ScriptedPage};
    use jobpilot_core_types::Language;
    use perceiver_semantic::ClassificationBasis;

    fn page(screen: ScreenScript) -> ScriptedPage {
        ScriptedPage::new(PageScript::new("job").screen("job", screen)).unwrap()
    }

    #[tokio::test]
    async fn job_info_uses_first_visible_selectors() {
        let page = page(
            ScreenScript::new()
                .with_url("https://www.linkedin.com/jobs/view/7/")
                .with_text(".jobs-unified-top-card__job-title", "Fallback title")
                .with_text(".job-details-jobs-unified-top-card__job-title", " Data Analyst \n")
                .with_text("a[data-test-job-company-name]", "Acme"),
        );
        let info = extract_job_info(&page).await.unwrap();
        assert_eq!(info.title, "Data Analyst");
        assert_eq!(info.company, "Acme");
        assert_eq!(
            info.to_string(),
            "Job: Data Analyst | Company: Acme | URL: https://www.linkedin.com/jobs/view/7/"
        );
    }

    #[tokio::test]
    async fn job_info_without_selectors_is_blank() {
        let page = page(ScreenScript::new());
        let info = extract_job_info(&page).await.unwrap();
        assert_eq!(info.title, "");
        assert_eq!(info.company, "");
        assert_eq!(info.link, "about:blank");
    }

    #[tokio::test]
    async fn description_falls_back_to_search_container() {
        let page = page(
            ScreenScript::new()
                .with_text(".jobs-description", "   ")
                .with_text(".jobs-search__job-details--container", "Requisitos: experiencia"),
        );
        assert_eq!(
            read_description(&page).await.as_deref(),
            Some("Requisitos: experiencia")
        );
    }

    #[test]
    fn unreadable_description_takes_fallback() {
        let page = page(ScreenScript::new());
        let classification =
            tokio_test::block_on(detect_job_language(&page, &LexiconClassifier::new()));
        assert_eq!(classification.language, Language::English);
        assert!(matches!(
            classification.basis,
            ClassificationBasis::Fallback { .. }
        ));
    }

    #[tokio::test]
    async fn spanish_description_is_detected() {
        let page = page(ScreenScript::new().with_text(
            "[data-job-id]",
            "Buscamos un analista. Requisitos: 2 años de experiencia y trabajo en equipo.",
        ));
        let classification = detect_job_language(&page, &LexiconClassifier::new()).await;
        assert_eq!(classification.language, Language::Spanish);
    }
}
