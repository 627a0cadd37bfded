//! Shared types, error model, and configuration for IntelScout.
//!
//! This crate is the foundation depended on by all other IntelScout crates.
//! It provides:
//! - [`IntelError`] - the unified error type
//! - Domain types ([`PipelineState`], [`Snippet`], [`Subject`], [`RunId`])
//! - Runtime configuration ([`ScoutConfig`], [`EnrichmentConfig`])

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    DEFAULT_SITE_TEMPLATE, DEFAULT_USER_AGENT, EnrichmentConfig, SUBJECT_PLACEHOLDER, ScoutConfig,
};
pub use error::{IntelError, Result};
pub use types::{
    Category, MAX_SNIPPET_CHARS, MIN_SNIPPET_CHARS, PipelineState, RunId, Snippet, SnippetOrigin,
    Subject,
};
