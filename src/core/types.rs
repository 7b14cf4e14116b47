//! core::types
//!
//! Strong types for the submission domain.
//!
//! # Types
//!
//! - [`Category`] - The two accepted submission kinds (Rule, Workflow)
//! - [`SubmissionRequest`] - Immutable per-request input, deserialized from JSON
//! - [`SubmissionOutcome`] - Result of a committed submission
//!
//! # Validation
//!
//! `Category` is a closed enum: a request naming any other category fails
//! deserialization and never reaches the handler. Constraints that span
//! fields (a Rule needs a subcategory) are checked by the handler, which
//! rejects before any remote call.

use serde::{Deserialize, Serialize};

/// The kind of customization being submitted.
///
/// # Example
///
/// ```
/// use catalog_intake::core::types::Category;
///
/// let cat: Category = serde_json::from_str("\"Rule\"").unwrap();
/// assert_eq!(cat, Category::Rule);
/// assert_eq!(cat.as_lowercase(), "rule");
///
/// // Anything outside the closed set fails to parse
/// assert!(serde_json::from_str::<Category>("\"Snippet\"").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// A rule: committed under `customizations/{subcategory}/`.
    Rule,
    /// A workflow: committed under `customizations/workflows/`.
    Workflow,
}

impl Category {
    /// Lowercase form used in commit messages and user-facing text.
    pub fn as_lowercase(&self) -> &'static str {
        match self {
            Category::Rule => "rule",
            Category::Workflow => "workflow",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Rule => write!(f, "Rule"),
            Category::Workflow => write!(f, "Workflow"),
        }
    }
}

/// A customization submission, created per call from the HTTP body.
///
/// Field semantics:
/// - `title` derives the file name (slugged)
/// - `description` is embedded verbatim in the frontmatter
/// - `subcategory` is required when `category` is [`Category::Rule`],
///   ignored otherwise
/// - `labels` appear only in the commit message, order preserved
/// - `activation` applies to Rules only; absent means `model_decision`
/// - `instructions` and `examples` append titled sections after the body,
///   in that order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub activation: Option<String>,
    pub content: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub examples: Option<String>,
}

/// Result of a successfully committed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Repository-relative path of the created file.
    pub file_path: String,
    /// Commit identifier returned by the hosting service.
    pub commit_sha: String,
    /// Human-readable confirmation for the caller.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod category {
        use super::*;

        #[test]
        fn lowercase_forms() {
            assert_eq!(Category::Rule.as_lowercase(), "rule");
            assert_eq!(Category::Workflow.as_lowercase(), "workflow");
        }

        #[test]
        fn display_matches_wire_form() {
            assert_eq!(Category::Rule.to_string(), "Rule");
            assert_eq!(Category::Workflow.to_string(), "Workflow");
        }

        #[test]
        fn deserializes_exact_names_only() {
            assert_eq!(
                serde_json::from_str::<Category>("\"Workflow\"").unwrap(),
                Category::Workflow
            );
            assert!(serde_json::from_str::<Category>("\"rule\"").is_err());
            assert!(serde_json::from_str::<Category>("\"Plugin\"").is_err());
        }
    }

    mod submission_request {
        use super::*;

        #[test]
        fn optional_fields_default() {
            let json = r#"{
                "title": "My Rule",
                "description": "does things",
                "category": "Workflow",
                "content": "body"
            }"#;

            let req: SubmissionRequest = serde_json::from_str(json).unwrap();
            assert!(req.subcategory.is_none());
            assert!(req.labels.is_empty());
            assert!(req.activation.is_none());
            assert!(req.instructions.is_none());
            assert!(req.examples.is_none());
        }

        #[test]
        fn labels_preserve_order() {
            let json = r#"{
                "title": "T",
                "description": "d",
                "category": "Rule",
                "subcategory": "testing",
                "labels": ["z", "a", "m"],
                "content": "c"
            }"#;

            let req: SubmissionRequest = serde_json::from_str(json).unwrap();
            assert_eq!(req.labels, vec!["z", "a", "m"]);
        }

        #[test]
        fn unknown_category_rejected() {
            let json = r#"{
                "title": "T",
                "description": "d",
                "category": "Snippet",
                "content": "c"
            }"#;

            assert!(serde_json::from_str::<SubmissionRequest>(json).is_err());
        }
    }
}
