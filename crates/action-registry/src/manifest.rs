//! Action names, descriptions and parameter schemas

use jobpilot_core_types::Language;
use jobpilot_ledger::{ApplicationRecord, JobListingRecord};
use schemars::gen::SchemaSettings;
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::RegistryError;

/// Parameters of actions that take none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NoParams {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ApplyParams {
    /// Language of the posting: "spanish" or "english".
    pub language: Language,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResolveLinkParams {
    /// Index of the job element in the current page snapshot.
    pub index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FilterParams {
    /// Exact visible text of the filter control.
    pub text: String,
}

/// Every action the planner can call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    DetectJobLanguage,
    ApplyToJob,
    ExtractJobInfo,
    CountApplications,
    SaveApplication,
    CountJobListings,
    SaveJobListing,
    ResolveJobLink,
    ApplyFilter,
    RequestVerificationCode,
}

impl ActionKind {
    pub const ALL: [ActionKind; 10] = [
        ActionKind::DetectJobLanguage,
        ActionKind::ApplyToJob,
        ActionKind::ExtractJobInfo,
        ActionKind::CountApplications,
        ActionKind::SaveApplication,
        ActionKind::CountJobListings,
        ActionKind::SaveJobListing,
        ActionKind::ResolveJobLink,
        ActionKind::ApplyFilter,
        ActionKind::RequestVerificationCode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::DetectJobLanguage => "detect_job_language",
            ActionKind::ApplyToJob => "apply_to_job",
            ActionKind::ExtractJobInfo => "extract_job_info",
            ActionKind::CountApplications => "count_applications",
            ActionKind::SaveApplication => "save_application",
            ActionKind::CountJobListings => "count_job_listings",
            ActionKind::SaveJobListing => "save_job_listing",
            ActionKind::ResolveJobLink => "resolve_job_link",
            ActionKind::ApplyFilter => "apply_filter",
            ActionKind::RequestVerificationCode => "request_verification_code",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActionKind::DetectJobLanguage => {
                "Detect the language of the job posting by analysing the description panel"
            }
            ActionKind::ApplyToJob => {
                "Apply to the open job posting with the résumé matching its language"
            }
            ActionKind::ExtractJobInfo => "Get title, company and URL of the current job posting",
            ActionKind::CountApplications => "Count how many applications have been recorded",
            ActionKind::SaveApplication => "Record one submitted application",
            ActionKind::CountJobListings => "Count how many job listings have been saved",
            ActionKind::SaveJobListing => "Save the information of ONE job listing",
            ActionKind::ResolveJobLink => "Get the URL of an element in the job results list",
            ActionKind::ApplyFilter => "Apply a search filter by clicking the control with the given text",
            ActionKind::RequestVerificationCode => {
                "Ask the human operator for the SMS verification code"
            }
        }
    }

    pub fn parameters(&self) -> RootSchema {
        match self {
            ActionKind::ApplyToJob => parameters_schema::<ApplyParams>(),
            ActionKind::SaveApplication => parameters_schema::<ApplicationRecord>(),
            ActionKind::SaveJobListing => parameters_schema::<JobListingRecord>(),
            ActionKind::ResolveJobLink => parameters_schema::<ResolveLinkParams>(),
            ActionKind::ApplyFilter => parameters_schema::<FilterParams>(),
            ActionKind::DetectJobLanguage
            | ActionKind::ExtractJobInfo
            | ActionKind::CountApplications
            | ActionKind::CountJobListings
            | ActionKind::RequestVerificationCode => parameters_schema::<NoParams>(),
        }
    }

    pub fn manifest(&self) -> ActionManifest {
        ActionManifest {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| RegistryError::UnknownAction(name.to_string()))
    }
}

/// Planner-facing description of one action.
#[derive(Clone, Debug, Serialize)]
pub struct ActionManifest {
    pub name: String,
    pub description: String,
    pub parameters: RootSchema,
}

/// Self-contained schema for `T`; nested types are inlined so the planner
/// never has to follow `$ref` pointers.
fn parameters_schema<T: JsonSchema>() -> RootSchema {
    SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.name().parse::<ActionKind>().unwrap(), kind);
        }
        assert_eq!(
            "book_flight".parse::<ActionKind>(),
            Err(RegistryError::UnknownAction("book_flight".into()))
        );
    }

    #[test]
    fn record_schema_lists_required_fields() {
        let schema = serde_json::to_value(ActionKind::SaveApplication.parameters()).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|field| field == "job_title"));
        assert!(required.iter().any(|field| field == "notes"));
        assert_eq!(
            schema["properties"]["detected_language"]["enum"],
            serde_json::json!(["spanish", "english"])
        );
        assert_eq!(
            schema["properties"]["outcome"]["enum"],
            serde_json::json!(["succeeded", "failed"])
        );
    }

    #[test]
    fn every_action_has_a_description() {
        for kind in ActionKind::ALL {
            let manifest = kind.manifest();
            assert!(!manifest.description.is_empty(), "{}", manifest.name);
        }
    }
}
