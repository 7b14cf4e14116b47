//! core
//!
//! Domain types and pure derivation logic.
//!
//! # Modules
//!
//! - [`types`]: Submission request/outcome types and the category enum
//! - [`naming`]: Slug derivation for catalog file names
//! - [`document`]: Path, frontmatter, body, and commit message rendering
//!
//! Everything in this layer is pure: no I/O, no clocks, no remote calls.
//! The [`submit`](crate::submit) handler composes these pieces with the
//! forge capability.

pub mod document;
pub mod naming;
pub mod types;
