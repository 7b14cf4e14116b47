//! forge
//!
//! Abstraction for the remote hosting service (GitHub v1).
//!
//! # Architecture
//!
//! The `Forge` trait defines the two capabilities this service consumes:
//! reading a file at a path (the collision check) and creating a file with a
//! commit message. The handler depends only on `dyn Forge`, so tests run
//! against [`mock::MockForge`] and production against [`github::GitHubForge`].
//!
//! Forge failures never corrupt local state; the handler surfaces them to
//! the caller as the terminal outcome.
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait, `ForgeError`, and value types
//! - [`github`]: GitHub implementation over the REST contents API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
