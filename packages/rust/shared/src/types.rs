//! Core domain types for IntelScout runs.

use serde::Serialize;
use uuid::Uuid;

use crate::error::{IntelError, Result};

/// Source texts must be longer than this many characters to become a snippet.
pub const MIN_SNIPPET_CHARS: usize = 10;

/// Snippet texts are truncated to at most this many characters.
pub const MAX_SNIPPET_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one pipeline run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

/// The competitor identifier a run is about. Never blank; kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Validate and wrap a competitor identifier.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IntelError::validation("competitor name must not be blank"));
        }
        Ok(Self(name))
    }

    /// The identifier exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form interpolated into target URLs.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Subject {
    type Err = IntelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Category / SnippetOrigin
// ---------------------------------------------------------------------------

/// What kind of signal an extraction is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Jobs,
    News,
}

impl Category {
    /// Provenance tag attached to snippets of this category.
    pub fn origin(self) -> SnippetOrigin {
        match self {
            Self::Jobs => SnippetOrigin::CareersPage,
            Self::News => SnippetOrigin::Blog,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jobs => f.write_str("jobs"),
            Self::News => f.write_str("news"),
        }
    }
}

/// Where a snippet was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnippetOrigin {
    CareersPage,
    Blog,
}

// ---------------------------------------------------------------------------
// Snippet
// ---------------------------------------------------------------------------

/// A short extracted text item with its provenance.
///
/// Only constructible through [`Snippet::new`], which applies the length
/// policy, so every value holds at most [`MAX_SNIPPET_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    text: String,
    origin: SnippetOrigin,
}

impl Snippet {
    /// Build a snippet from raw element text.
    ///
    /// Returns `None` when the text has [`MIN_SNIPPET_CHARS`] characters or
    /// fewer; longer texts are cut to [`MAX_SNIPPET_CHARS`] characters.
    pub fn new(raw: &str, origin: SnippetOrigin) -> Option<Self> {
        if raw.chars().count() <= MIN_SNIPPET_CHARS {
            return None;
        }
        Some(Self {
            text: raw.chars().take(MAX_SNIPPET_CHARS).collect(),
            origin,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> SnippetOrigin {
        self.origin
    }
}

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// The record threaded through every pipeline stage.
///
/// Fields are private. Each `with_*` method consumes the state and returns it
/// with exactly one field replaced; the subject has no setter at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineState {
    subject: Subject,
    targets: Vec<String>,
    jobs: Vec<Snippet>,
    news: Vec<Snippet>,
    insight: String,
}

impl PipelineState {
    /// Fresh state for `subject` with every other field empty.
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            targets: Vec::new(),
            jobs: Vec::new(),
            news: Vec::new(),
            insight: String::new(),
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn jobs(&self) -> &[Snippet] {
        &self.jobs
    }

    pub fn news(&self) -> &[Snippet] {
        &self.news
    }

    pub fn insight(&self) -> &str {
        &self.insight
    }

    pub fn with_targets(self, targets: Vec<String>) -> Self {
        Self { targets, ..self }
    }

    pub fn with_jobs(self, jobs: Vec<Snippet>) -> Self {
        Self { jobs, ..self }
    }

    pub fn with_news(self, news: Vec<Snippet>) -> Self {
        Self { news, ..self }
    }

    pub fn with_insight(self, insight: impl Into<String>) -> Self {
        Self {
            insight: insight.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_rejects_blank_input() {
        assert!(Subject::new("").is_err());
        assert!(Subject::new("   \t").is_err());
        assert!("".parse::<Subject>().is_err());
    }

    #[test]
    fn subject_keeps_input_unchanged() {
        let subject = Subject::new(" Acme Corp ").expect("valid subject");
        assert_eq!(subject.as_str(), " Acme Corp ");
        assert_eq!(subject.to_string(), " Acme Corp ");
    }

    #[test]
    fn subject_folding_only_lowercases() {
        let subject = Subject::new("Acme Corp").expect("valid subject");
        assert_eq!(subject.folded(), "acme corp");
        assert_eq!(Subject::new("STRIPE").unwrap().folded(), "stripe");
    }

    #[test]
    fn snippet_filters_short_text() {
        assert!(Snippet::new("", SnippetOrigin::Blog).is_none());
        // Exactly ten characters is still too short.
        assert!(Snippet::new("0123456789", SnippetOrigin::Blog).is_none());
        let snippet = Snippet::new("0123456789A", SnippetOrigin::Blog).expect("eleven chars");
        assert_eq!(snippet.text(), "0123456789A");
        assert_eq!(snippet.origin(), SnippetOrigin::Blog);
    }

    #[test]
    fn snippet_truncates_by_characters() {
        let long = "é".repeat(250);
        let snippet = Snippet::new(&long, SnippetOrigin::CareersPage).expect("long text");
        assert_eq!(snippet.text().chars().count(), MAX_SNIPPET_CHARS);
        assert_eq!(snippet.origin(), SnippetOrigin::CareersPage);
    }

    #[test]
    fn category_maps_to_origin() {
        assert_eq!(Category::Jobs.origin(), SnippetOrigin::CareersPage);
        assert_eq!(Category::News.origin(), SnippetOrigin::Blog);
        assert_eq!(Category::News.to_string(), "news");
    }

    #[test]
    fn state_builders_replace_one_field() {
        let subject = Subject::new("Acme").unwrap();
        let state = PipelineState::new(subject.clone());
        assert!(state.targets().is_empty());
        assert!(state.jobs().is_empty());
        assert!(state.news().is_empty());
        assert!(state.insight().is_empty());

        let job = Snippet::new("Senior Rust Engineer", SnippetOrigin::CareersPage).unwrap();
        let state = state
            .with_targets(vec!["https://www.acme.com/careers".into()])
            .with_jobs(vec![job.clone()])
            .with_insight("done");

        assert_eq!(state.subject(), &subject);
        assert_eq!(state.targets(), ["https://www.acme.com/careers".to_string()]);
        assert_eq!(state.jobs(), [job]);
        assert!(state.news().is_empty());
        assert_eq!(state.insight(), "done");
    }

    #[test]
    fn state_serialization_shape() {
        let job = Snippet::new("Staff Platform Engineer", SnippetOrigin::CareersPage).unwrap();
        let state = PipelineState::new(Subject::new("Acme").unwrap()).with_jobs(vec![job]);

        let json = serde_json::to_value(&state).expect("serialize");
        assert_eq!(json["subject"], "Acme");
        assert_eq!(json["jobs"][0]["origin"], "careers_page");
        assert_eq!(json["jobs"][0]["text"], "Staff Platform Engineer");
        assert_eq!(json["news"], serde_json::json!([]));
        assert_eq!(json["insight"], "");
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }
}
