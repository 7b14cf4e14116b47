//! catalog-intake - An HTTP submission service for a GitHub-hosted catalog
//!
//! catalog-intake accepts structured customization submissions over HTTP and
//! commits the rendered Markdown file to a remote catalog repository,
//! rejecting duplicate paths and validating category-specific constraints.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`server`] - HTTP layer (parses requests, maps errors to status codes)
//! - [`submit`] - The submission handler: validate, render, collide-check, commit
//! - [`core`] - Domain types, slug derivation, and document rendering
//! - [`forge`] - Abstraction for the remote hosting service (GitHub v1)
//! - [`config`] - Service configuration, loaded once at startup
//!
//! # Correctness Invariants
//!
//! catalog-intake maintains the following invariants:
//!
//! 1. Invalid submissions are rejected before any remote call is made
//! 2. Each accepted submission performs exactly one remote read and at most one write
//! 3. An occupied target path is never overwritten
//! 4. No state is shared across requests; every call is independent

pub mod config;
pub mod core;
pub mod forge;
pub mod server;
pub mod submit;
