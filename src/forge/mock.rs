//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge provides a deterministic implementation of the `Forge`
//! trait for use in tests. It stores files in memory, records every
//! operation for verification, and allows configuring failure scenarios.
//!
//! # Example
//!
//! ```
//! use catalog_intake::forge::mock::MockForge;
//! use catalog_intake::forge::{Forge, ForgeError};
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new();
//!
//! // Empty repo: read misses
//! let result = forge.read_file("customizations/workflows/x.md", "main").await;
//! assert!(matches!(result, Err(ForgeError::NotFound(_))));
//!
//! // Create, then read hits
//! forge
//!     .create_file("customizations/workflows/x.md", "Add workflow: X", "body", "main")
//!     .await
//!     .unwrap();
//! assert!(forge.read_file("customizations/workflows/x.md", "main").await.is_ok());
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{CreatedCommit, Forge, ForgeError, RepoFile};

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockForgeInner {
    /// Stored file contents by path.
    files: HashMap<String, String>,
    /// Next commit number to assign.
    next_commit: u64,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail read_file with the given error.
    ReadFile(ForgeError),
    /// Fail create_file with the given error.
    CreateFile(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone)]
pub enum MockOperation {
    ReadFile {
        path: String,
        branch: String,
    },
    CreateFile {
        path: String,
        message: String,
        content: String,
        branch: String,
    },
}

impl MockForge {
    /// Create a new empty mock forge.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                files: HashMap::new(),
                next_commit: 1,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Create a mock forge with pre-existing files.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_intake::forge::mock::MockForge;
    ///
    /// let forge = MockForge::with_files(vec![(
    ///     "customizations/testing/existing.md".to_string(),
    ///     "existing content".to_string(),
    /// )]);
    /// assert_eq!(forge.file_count(), 1);
    /// ```
    pub fn with_files(files: Vec<(String, String)>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                files: files.into_iter().collect(),
                next_commit: 1,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_intake::forge::mock::{FailOn, MockForge};
    /// use catalog_intake::forge::ForgeError;
    ///
    /// let forge = MockForge::new().fail_on(FailOn::CreateFile(ForgeError::RateLimited));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    ///
    /// Useful for verifying the mock was called correctly (or not at all).
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Number of recorded write operations.
    pub fn write_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::CreateFile { .. }))
            .count()
    }

    /// Get a stored file's content (for test verification).
    pub fn file_content(&self, path: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.files.get(path).cloned()
    }

    /// Get the count of stored files.
    pub fn file_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.files.len()
    }

    /// Record an operation.
    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail<T>(&self, expected: &str) -> Option<Result<T, ForgeError>> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::ReadFile(e)) if expected == "read_file" => Some(Err(e.clone())),
            Some(FailOn::CreateFile(e)) if expected == "create_file" => Some(Err(e.clone())),
            _ => None,
        }
    }
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn read_file(&self, path: &str, branch: &str) -> Result<RepoFile, ForgeError> {
        self.record(MockOperation::ReadFile {
            path: path.to_string(),
            branch: branch.to_string(),
        });

        if let Some(result) = self.check_fail("read_file") {
            return result;
        }

        let inner = self.inner.lock().unwrap();
        match inner.files.get(path) {
            Some(content) => Ok(RepoFile {
                path: path.to_string(),
                sha: format!("blob-{}", path.len()),
                size: content.len() as u64,
            }),
            None => Err(ForgeError::NotFound(path.to_string())),
        }
    }

    async fn create_file(
        &self,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> Result<CreatedCommit, ForgeError> {
        self.record(MockOperation::CreateFile {
            path: path.to_string(),
            message: message.to_string(),
            content: content.to_string(),
            branch: branch.to_string(),
        });

        if let Some(result) = self.check_fail("create_file") {
            return result;
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.files.contains_key(path) {
            // GitHub rejects a create against an occupied path
            return Err(ForgeError::ApiError {
                status: 422,
                message: format!("\"sha\" wasn't supplied. {}", path),
            });
        }

        inner.files.insert(path.to_string(), content.to_string());
        let number = inner.next_commit;
        inner.next_commit += 1;

        Ok(CreatedCommit {
            sha: format!("commit-{:07}", number),
        })
    }
}
