//! submit
//!
//! The submission handler: validate, render, collision-check, commit.
//!
//! # Control Flow
//!
//! [`SubmissionHandler::submit`] is entirely linear:
//!
//! 1. Validate (token configured, Rule has a subcategory, title slugs to
//!    something) — first failure short-circuits with zero remote calls
//! 2. Render the file path, content, and commit message
//! 3. Collision check: read the target path on the configured branch
//! 4. Create the file in a single commit
//!
//! Exactly one remote read and at most one remote write happen per call.
//! There is no retry and no state shared across calls.
//!
//! # Races
//!
//! Two concurrent submissions deriving the same path can both pass the
//! collision check before either writes; the hosting service decides the
//! outcome. A write that fails in that window surfaces as an upstream
//! error, not a conflict.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::core::document::render;
use crate::core::naming::slugify;
use crate::core::types::{Category, SubmissionOutcome, SubmissionRequest};
use crate::forge::{Forge, ForgeError};

/// Errors from submission handling.
///
/// Each variant is terminal: the handler surfaces it to the caller and
/// performs no recovery. The HTTP layer maps variants to status codes.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required secret absent. A server-side fault, not a client error.
    #[error("GitHub token not configured. Please contact the administrator.")]
    Config,

    /// The request violates a validation rule.
    #[error("{0}")]
    InvalidInput(String),

    /// The derived path is already occupied.
    #[error("A file already exists at {path}. Please choose a different title.")]
    Conflict {
        /// The colliding repository-relative path.
        path: String,
    },

    /// The hosting service failed in a way other than "not found" on the
    /// collision check.
    #[error("GitHub API error: {0}")]
    Upstream(#[from] ForgeError),
}

/// The submission handler.
///
/// Stateless across calls: configuration and the forge capability are fixed
/// at construction, and each [`submit`](Self::submit) call is independent.
///
/// # Example
///
/// ```ignore
/// use catalog_intake::submit::SubmissionHandler;
///
/// let handler = SubmissionHandler::new(config, forge);
/// let outcome = handler.submit(request).await?;
/// println!("committed {} as {}", outcome.file_path, outcome.commit_sha);
/// ```
pub struct SubmissionHandler {
    config: ServiceConfig,
    forge: Arc<dyn Forge>,
}

impl SubmissionHandler {
    /// Create a handler over a forge capability.
    pub fn new(config: ServiceConfig, forge: Arc<dyn Forge>) -> Self {
        Self { config, forge }
    }

    /// Validate a submission, commit it to the catalog, and report the result.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Config`] if no hosting token is configured
    /// - [`SubmitError::InvalidInput`] if a Rule lacks a subcategory or the
    ///   title yields an empty slug
    /// - [`SubmitError::Conflict`] if the derived path is already occupied
    /// - [`SubmitError::Upstream`] on any other hosting-service failure
    pub async fn submit(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionOutcome, SubmitError> {
        self.validate(&request)?;

        let rendered = render(&request);

        // Collision check: the only place NotFound is a good outcome.
        match self
            .forge
            .read_file(&rendered.file_path, &self.config.branch)
            .await
        {
            Ok(existing) => {
                info!(path = %existing.path, "submission rejected: path occupied");
                return Err(SubmitError::Conflict {
                    path: rendered.file_path,
                });
            }
            Err(ForgeError::NotFound(_)) => {}
            Err(e) => {
                warn!(path = %rendered.file_path, error = %e, "collision check failed");
                return Err(SubmitError::Upstream(e));
            }
        }

        let commit = self
            .forge
            .create_file(
                &rendered.file_path,
                &rendered.commit_message,
                &rendered.content,
                &self.config.branch,
            )
            .await
            .map_err(|e| {
                warn!(path = %rendered.file_path, error = %e, "create file failed");
                SubmitError::Upstream(e)
            })?;

        info!(
            path = %rendered.file_path,
            commit = %commit.sha,
            category = %request.category,
            "submission committed"
        );

        Ok(SubmissionOutcome {
            file_path: rendered.file_path,
            commit_sha: commit.sha,
            message: rendered.success_message,
        })
    }

    /// Run the ordered validation rules; first failure wins.
    fn validate(&self, request: &SubmissionRequest) -> Result<(), SubmitError> {
        if self.config.github_token.is_none() {
            return Err(SubmitError::Config);
        }

        if request.category == Category::Rule
            && request
                .subcategory
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
        {
            return Err(SubmitError::InvalidInput(
                "Subcategory is required for Rules".to_string(),
            ));
        }

        if slugify(&request.title).is_empty() {
            return Err(SubmitError::InvalidInput(
                "Title must contain at least one alphanumeric character".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFile, EnvOverrides};
    use crate::forge::mock::{FailOn, MockForge};

    fn config_with_token() -> ServiceConfig {
        ServiceConfig::resolve(
            ConfigFile::default(),
            EnvOverrides {
                github_token: Some("ghp_test".into()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn config_without_token() -> ServiceConfig {
        ServiceConfig::resolve(ConfigFile::default(), EnvOverrides::default()).unwrap()
    }

    fn workflow_request() -> SubmissionRequest {
        SubmissionRequest {
            title: "Deploy Helper".into(),
            description: "deploys things".into(),
            category: Category::Workflow,
            subcategory: None,
            labels: vec!["ci".into(), "deploy".into()],
            activation: None,
            content: "do the deploy".into(),
            instructions: None,
            examples: None,
        }
    }

    fn rule_request() -> SubmissionRequest {
        SubmissionRequest {
            title: "My Great Rule!".into(),
            description: "checks things".into(),
            category: Category::Rule,
            subcategory: Some("testing".into()),
            labels: vec![],
            activation: None,
            content: "Always check.".into(),
            instructions: None,
            examples: None,
        }
    }

    mod validation {
        use super::*;

        #[tokio::test]
        async fn missing_token_is_config_error_with_zero_remote_calls() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_without_token(), Arc::new(forge.clone()));

            let result = handler.submit(workflow_request()).await;
            assert!(matches!(result, Err(SubmitError::Config)));
            assert!(forge.operations().is_empty());
        }

        #[tokio::test]
        async fn rule_without_subcategory_rejected_before_remote_calls() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            let mut request = rule_request();
            request.subcategory = None;

            let result = handler.submit(request).await;
            assert!(matches!(result, Err(SubmitError::InvalidInput(_))));
            assert!(forge.operations().is_empty());
        }

        #[tokio::test]
        async fn rule_with_blank_subcategory_rejected() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            let mut request = rule_request();
            request.subcategory = Some("   ".into());

            let result = handler.submit(request).await;
            assert!(matches!(result, Err(SubmitError::InvalidInput(_))));
            assert!(forge.operations().is_empty());
        }

        #[tokio::test]
        async fn workflow_needs_no_subcategory() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge));

            let result = handler.submit(workflow_request()).await;
            assert!(result.is_ok());
        }

        #[tokio::test]
        async fn unsluggable_title_rejected() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            let mut request = workflow_request();
            request.title = "!!!".into();

            let result = handler.submit(request).await;
            assert!(matches!(result, Err(SubmitError::InvalidInput(_))));
            assert!(forge.operations().is_empty());
        }

        #[tokio::test]
        async fn token_checked_before_subcategory() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_without_token(), Arc::new(forge));

            let mut request = rule_request();
            request.subcategory = None;

            // Both rules are violated; the config fault wins.
            let result = handler.submit(request).await;
            assert!(matches!(result, Err(SubmitError::Config)));
        }
    }

    mod collision {
        use super::*;

        #[tokio::test]
        async fn occupied_path_is_conflict_with_zero_writes() {
            let forge = MockForge::with_files(vec![(
                "customizations/workflows/deploy-helper.md".to_string(),
                "already here".to_string(),
            )]);
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            let result = handler.submit(workflow_request()).await;
            match result {
                Err(SubmitError::Conflict { path }) => {
                    assert_eq!(path, "customizations/workflows/deploy-helper.md");
                }
                other => panic!("expected conflict, got {:?}", other.map(|o| o.file_path)),
            }
            assert_eq!(forge.write_count(), 0);
        }

        #[tokio::test]
        async fn second_submission_of_same_title_conflicts() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            handler.submit(workflow_request()).await.unwrap();
            assert_eq!(forge.write_count(), 1);

            let result = handler.submit(workflow_request()).await;
            assert!(matches!(result, Err(SubmitError::Conflict { .. })));
            // No second write happened.
            assert_eq!(forge.write_count(), 1);
        }

        #[tokio::test]
        async fn read_failure_other_than_not_found_is_upstream() {
            let forge = MockForge::new().fail_on(FailOn::ReadFile(ForgeError::RateLimited));
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            let result = handler.submit(workflow_request()).await;
            assert!(matches!(
                result,
                Err(SubmitError::Upstream(ForgeError::RateLimited))
            ));
            assert_eq!(forge.write_count(), 0);
        }
    }

    mod commit {
        use super::*;

        #[tokio::test]
        async fn success_returns_path_sha_and_message() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            let outcome = handler.submit(workflow_request()).await.unwrap();

            assert_eq!(
                outcome.file_path,
                "customizations/workflows/deploy-helper.md"
            );
            assert!(!outcome.commit_sha.is_empty());
            assert_eq!(
                outcome.message,
                "Successfully submitted workflow: Deploy Helper"
            );
        }

        #[tokio::test]
        async fn commit_message_carries_category_title_and_labels() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            handler.submit(workflow_request()).await.unwrap();

            let ops = forge.operations();
            let message = match &ops[1] {
                crate::forge::mock::MockOperation::CreateFile { message, .. } => message.clone(),
                other => panic!("expected create, got {:?}", other),
            };
            assert!(message.contains("Add workflow: Deploy Helper (via web UI)"));
            assert!(message.contains("Labels: ci, deploy"));
        }

        #[tokio::test]
        async fn commits_target_configured_branch() {
            let forge = MockForge::new();
            let config = ServiceConfig::resolve(
                ConfigFile {
                    branch: Some("staging".into()),
                    ..Default::default()
                },
                EnvOverrides {
                    github_token: Some("ghp_test".into()),
                    ..Default::default()
                },
            )
            .unwrap();
            let handler = SubmissionHandler::new(config, Arc::new(forge.clone()));

            handler.submit(workflow_request()).await.unwrap();

            for op in forge.operations() {
                let branch = match op {
                    crate::forge::mock::MockOperation::ReadFile { branch, .. } => branch,
                    crate::forge::mock::MockOperation::CreateFile { branch, .. } => branch,
                };
                assert_eq!(branch, "staging");
            }
        }

        #[tokio::test]
        async fn rule_lands_under_its_subcategory() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            let outcome = handler.submit(rule_request()).await.unwrap();
            assert_eq!(outcome.file_path, "customizations/testing/my-great-rule.md");
            assert!(forge
                .file_content("customizations/testing/my-great-rule.md")
                .unwrap()
                .contains("trigger: model_decision"));
        }

        #[tokio::test]
        async fn write_failure_is_upstream() {
            let forge = MockForge::new().fail_on(FailOn::CreateFile(ForgeError::ApiError {
                status: 500,
                message: "boom".into(),
            }));
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge));

            let result = handler.submit(workflow_request()).await;
            assert!(matches!(result, Err(SubmitError::Upstream(_))));
        }

        #[tokio::test]
        async fn write_race_not_found_is_upstream_not_conflict() {
            // File created between collision check and write: the write's
            // NotFound is surfaced as upstream, per the documented default.
            let forge = MockForge::new()
                .fail_on(FailOn::CreateFile(ForgeError::NotFound("branch gone".into())));
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge));

            let result = handler.submit(workflow_request()).await;
            assert!(matches!(
                result,
                Err(SubmitError::Upstream(ForgeError::NotFound(_)))
            ));
        }

        #[tokio::test]
        async fn exactly_one_read_and_one_write_on_success() {
            let forge = MockForge::new();
            let handler = SubmissionHandler::new(config_with_token(), Arc::new(forge.clone()));

            handler.submit(workflow_request()).await.unwrap();

            let ops = forge.operations();
            assert_eq!(ops.len(), 2);
            assert!(matches!(
                ops[0],
                crate::forge::mock::MockOperation::ReadFile { .. }
            ));
            assert!(matches!(
                ops[1],
                crate::forge::mock::MockOperation::CreateFile { .. }
            ));
        }
    }
}
