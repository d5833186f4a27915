//! Request and response payloads of the insights service.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Fraud analysis of a pasted job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudAnalysisRequest {
    pub description: String,
}

/// Verdict returned by the fraud analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudAnalysis {
    pub status: String,
    pub suggested_role: Option<String>,
    /// Roadmap document for the suggested role, in outline-parser format.
    pub roadmap: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlternativeSearchRequest {
    pub role: String,
    pub location: String,
}

/// A genuine listing suggested as an alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted_date: Option<String>,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantTurnRequest {
    pub user_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub reply_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub role: String,
    pub available_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRoadmap {
    pub roadmap_text: String,
}

/// A résumé file selected for upload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.file_name.to_ascii_lowercase().ends_with(".pdf")
    }
}

impl std::fmt::Debug for ResumeUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeUpload")
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Roles recommended for an uploaded résumé.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleRecommendations {
    pub roles: Vec<String>,
}

impl RoleRecommendations {
    /// Leniently decodes the service's `suggested_roles` field.
    ///
    /// The service hands back model output: usually a JSON document as a
    /// string, sometimes wrapped in a ```` ```json ```` fence, sometimes an
    /// array. Anything undecodable yields no roles rather than an error.
    pub fn from_suggested_roles(value: &Value) -> Self {
        Self {
            roles: decode_roles(value, 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

const MAX_NESTING: usize = 2;

fn decode_roles(value: &Value, depth: usize) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Object(fields) => fields
            .get("suggested_roles")
            .map(|inner| decode_roles(inner, depth + 1))
            .unwrap_or_default(),
        Value::String(text) if depth < MAX_NESTING => {
            match serde_json::from_str::<Value>(strip_code_fence(text)) {
                Ok(inner) => decode_roles(&inner, depth + 1),
                Err(err) => {
                    debug!(error = %err, "suggested_roles is not JSON");
                    Vec::new()
                }
            }
        }
        _ => Vec::new(),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_fenced_json_string() {
        let value = json!("```json\n{\"suggested_roles\": [\"Data Analyst\", \"BI Developer\"]}\n```");
        let recommendations = RoleRecommendations::from_suggested_roles(&value);
        assert_eq!(recommendations.roles, vec!["Data Analyst", "BI Developer"]);
    }

    #[test]
    fn decodes_unfenced_string_and_plain_array() {
        let value = json!("{\"suggested_roles\": [\"QA Engineer\"]}");
        assert_eq!(
            RoleRecommendations::from_suggested_roles(&value).roles,
            vec!["QA Engineer"]
        );

        let value = json!(["SRE", "  ", "Platform Engineer"]);
        assert_eq!(
            RoleRecommendations::from_suggested_roles(&value).roles,
            vec!["SRE", "Platform Engineer"]
        );
    }

    #[test]
    fn garbage_yields_no_roles() {
        for value in [json!("not json"), json!(42), json!({"roles": ["x"]}), json!(null)] {
            assert!(RoleRecommendations::from_suggested_roles(&value).is_empty());
        }
    }

    #[test]
    fn resume_pdf_detection_ignores_case() {
        assert!(ResumeUpload::new("CV.PDF", Vec::new()).is_pdf());
        assert!(!ResumeUpload::new("cv.docx", Vec::new()).is_pdf());
    }

    #[test]
    fn resume_debug_hides_bytes() {
        let upload = ResumeUpload::new("cv.pdf", vec![1, 2, 3]);
        assert_eq!(
            format!("{upload:?}"),
            "ResumeUpload { file_name: \"cv.pdf\", size: 3 }"
        );
    }
}
