//! core::document
//!
//! Rendering a submission into its repository representation.
//!
//! # Overview
//!
//! A [`SubmissionRequest`] maps deterministically onto four derived values:
//! the target file path, the file content (frontmatter + body + optional
//! sections), the commit message, and the confirmation message returned to
//! the caller. [`render`] computes all four; nothing here touches the
//! network.
//!
//! # Layout
//!
//! - Rules land at `customizations/{subcategory}/{slug}.md`
//! - Workflows land at `customizations/workflows/{slug}.md`

use super::naming::slugify;
use super::types::{Category, SubmissionRequest};

/// Activation mode applied when a Rule does not specify one.
pub const DEFAULT_ACTIVATION: &str = "model_decision";

/// Root directory for all catalog entries.
const CATALOG_ROOT: &str = "customizations";

/// A submission rendered into its repository representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSubmission {
    /// Repository-relative path of the file to create.
    pub file_path: String,
    /// Full file content: frontmatter, body, optional sections.
    pub content: String,
    /// Commit message for the create-file operation.
    pub commit_message: String,
    /// Confirmation message for the caller on success.
    pub success_message: String,
}

/// Render a submission into its file path, content, and commit message.
///
/// The caller is responsible for cross-field validation (a Rule without a
/// subcategory must be rejected before rendering); a missing subcategory
/// here falls back to an empty segment rather than panicking.
///
/// # Example
///
/// ```
/// use catalog_intake::core::document::render;
/// use catalog_intake::core::types::{Category, SubmissionRequest};
///
/// let rendered = render(&SubmissionRequest {
///     title: "My Great Rule!".into(),
///     description: "checks things".into(),
///     category: Category::Rule,
///     subcategory: Some("testing".into()),
///     labels: vec![],
///     activation: None,
///     content: "Always check things.".into(),
///     instructions: None,
///     examples: None,
/// });
///
/// assert_eq!(rendered.file_path, "customizations/testing/my-great-rule.md");
/// assert!(rendered.content.contains("trigger: model_decision"));
/// ```
pub fn render(request: &SubmissionRequest) -> RenderedSubmission {
    let filename = format!("{}.md", slugify(&request.title));

    let file_path = match request.category {
        Category::Rule => {
            let subcategory = request.subcategory.as_deref().unwrap_or("");
            format!("{}/{}/{}", CATALOG_ROOT, subcategory, filename)
        }
        Category::Workflow => format!("{}/workflows/{}", CATALOG_ROOT, filename),
    };

    let frontmatter = match request.category {
        Category::Rule => {
            let activation = request.activation.as_deref().unwrap_or(DEFAULT_ACTIVATION);
            format!(
                "---\ntrigger: {}\ndescription: {}\n---\n\n",
                activation, request.description
            )
        }
        Category::Workflow => format!("---\ndescription: {}\n---\n\n", request.description),
    };

    let mut content = frontmatter + &request.content;

    // Fixed section order: instructions before examples.
    if let Some(instructions) = &request.instructions {
        content.push_str(&format!("\n\n## Usage Instructions\n\n{}", instructions));
    }
    if let Some(examples) = &request.examples {
        content.push_str(&format!("\n\n## Usage Examples\n\n{}", examples));
    }

    let commit_message = format!(
        "Add {}: {} (via web UI)\n\nLabels: {}",
        request.category.as_lowercase(),
        request.title,
        request.labels.join(", ")
    );

    let success_message = format!(
        "Successfully submitted {}: {}",
        request.category.as_lowercase(),
        request.title
    );

    RenderedSubmission {
        file_path,
        content,
        commit_message,
        success_message,
    }
}
