//! forge::traits
//!
//! Forge trait definition for interacting with the remote hosting service.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! All methods return `Result` so callers branch on explicit error kinds:
//! in particular, "the path does not exist" is [`ForgeError::NotFound`], a
//! first-class variant rather than an exception to be type-inspected. The
//! collision check in the submission handler is a plain `match` over it.
//!
//! # Example
//!
//! ```ignore
//! use catalog_intake::forge::{Forge, ForgeError};
//!
//! async fn occupied(forge: &dyn Forge, path: &str) -> Result<bool, ForgeError> {
//!     match forge.read_file(path, "main").await {
//!         Ok(_) => Ok(true),
//!         Err(ForgeError::NotFound(_)) => Ok(false),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors from forge operations.
///
/// These error types map to common failure modes when interacting
/// with remote hosting services like GitHub.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Metadata for an existing repository file.
///
/// Returned by [`Forge::read_file`]; the submission handler only needs the
/// fact that the path is occupied, but the sha and size are part of what
/// the hosting service reports and are useful in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    /// Repository-relative path.
    pub path: String,
    /// Blob sha of the existing content.
    pub sha: String,
    /// Size of the file in bytes.
    pub size: u64,
}

/// Result of a create-file commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCommit {
    /// The commit sha recorded by the hosting service.
    pub sha: String,
}

/// The Forge trait for interacting with the remote hosting service.
///
/// v1 implements GitHub only. Implementations must be `Send + Sync` to
/// allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. Callers should handle:
/// - `NotFound`: the path has no file (expected on a clean collision check)
/// - `AuthRequired` / `AuthFailed`: token missing or rejected
/// - `RateLimited`: API budget exhausted
/// - `ApiError` / `NetworkError`: everything else upstream
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github", "mock").
    fn name(&self) -> &'static str;

    /// Read file metadata at `path` on `branch`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no file exists at the path on that branch
    /// - `AuthFailed` if the token is invalid or lacks read permission
    async fn read_file(&self, path: &str, branch: &str) -> Result<RepoFile, ForgeError>;

    /// Create a new file at `path` on `branch` with a commit carrying `message`.
    ///
    /// The path must be unoccupied; the hosting service rejects the call
    /// otherwise.
    ///
    /// # Errors
    ///
    /// - `AuthFailed` if the token lacks write permission
    /// - `ApiError` with status 422 if the path is already occupied
    async fn create_file(
        &self,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> Result<CreatedCommit, ForgeError>;
}
