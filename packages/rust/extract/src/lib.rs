//! Snippet extraction from fetched HTML.
//!
//! This crate provides:
//! - [`Extractor`] - the interface the pipeline consumes
//! - [`HtmlExtractor`] - `scraper`-based implementation using [`rules`]
//! - [`Extraction`] - a bounded snippet list or an explicit empty result

pub mod rules;

use intelscout_shared::{Category, IntelError, Result, Snippet};
use scraper::{ElementRef, Html};
use tracing::{debug, instrument};

pub use rules::{HeadlineRule, JobListingRule, SelectionRule};

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Outcome of a successful extraction.
///
/// A page with no matching elements is a valid, non-exceptional result and is
/// reported as [`Extraction::Empty`] rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// At least one snippet passed the length policy.
    Snippets(Vec<Snippet>),
    /// Nothing on the page qualified.
    Empty,
}

impl Extraction {
    pub fn from_snippets(snippets: Vec<Snippet>) -> Self {
        if snippets.is_empty() {
            Self::Empty
        } else {
            Self::Snippets(snippets)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Snippets(snippets) => snippets.len(),
            Self::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn into_snippets(self) -> Vec<Snippet> {
        match self {
            Self::Snippets(snippets) => snippets,
            Self::Empty => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Turns a raw page body into at most `limit` snippets of `category`.
pub trait Extractor: Send + Sync {
    fn extract(&self, body: &[u8], category: Category, limit: usize) -> Result<Extraction>;
}

// ---------------------------------------------------------------------------
// HtmlExtractor
// ---------------------------------------------------------------------------

/// Holds selection rules and applies the first one matching a category.
pub struct HtmlExtractor {
    rules: Vec<Box<dyn SelectionRule>>,
}

impl HtmlExtractor {
    /// Create an extractor with the built-in job and headline rules.
    pub fn new() -> Self {
        Self::with_rules(vec![Box::new(JobListingRule), Box::new(HeadlineRule)])
    }

    /// Create an extractor from custom rules, tried in order.
    pub fn with_rules(rules: Vec<Box<dyn SelectionRule>>) -> Self {
        Self { rules }
    }

    fn rule_for(&self, category: Category) -> Result<&dyn SelectionRule> {
        self.rules
            .iter()
            .find(|rule| rule.category() == category)
            .map(|rule| rule.as_ref())
            .ok_or_else(|| IntelError::parse(format!("no selection rule for {category}")))
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for HtmlExtractor {
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    fn extract(&self, body: &[u8], category: Category, limit: usize) -> Result<Extraction> {
        let rule = self.rule_for(category)?;
        let doc = Html::parse_document(&String::from_utf8_lossy(body));
        let candidates = rule.candidates(&doc)?;

        // Cap first, then filter: short candidates still use up a slot.
        let snippets: Vec<Snippet> = candidates
            .iter()
            .take(limit)
            .filter_map(|el| Snippet::new(&element_text(*el), category.origin()))
            .collect();

        debug!(
            rule = rule.name(),
            candidates = candidates.len(),
            kept = snippets.len(),
            "extraction complete"
        );

        Ok(Extraction::from_snippets(snippets))
    }
}

/// Visible text of an element: text nodes trimmed, blanks dropped, concatenated.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelscout_shared::{MAX_SNIPPET_CHARS, SnippetOrigin};

    fn load_fixture(name: &str) -> Vec<u8> {
        let path = format!("../../../fixtures/html/{name}");
        std::fs::read(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }

    fn texts(extraction: Extraction) -> Vec<String> {
        extraction
            .into_snippets()
            .iter()
            .map(|s| s.text().to_string())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Jobs
    // -----------------------------------------------------------------------

    #[test]
    fn careers_fixture_caps_candidates_before_filtering() {
        let body = load_fixture("careers.html");
        let extraction = HtmlExtractor::new()
            .extract(&body, Category::Jobs, 3)
            .unwrap();

        // The third candidate ("Intern") is too short and is dropped, not replaced.
        assert_eq!(
            texts(extraction),
            ["Senior Rust EngineerRemote", "Product Designer, Growth"]
        );
    }

    #[test]
    fn careers_fixture_with_room_for_all_candidates() {
        let body = load_fixture("careers.html");
        let extraction = HtmlExtractor::new()
            .extract(&body, Category::Jobs, 10)
            .unwrap();

        assert_eq!(extraction.len(), 3);
        for snippet in extraction.into_snippets() {
            assert_eq!(snippet.origin(), SnippetOrigin::CareersPage);
        }
    }

    #[test]
    fn three_qualifying_jobs_yield_three_snippets() {
        let body = br#"<ul>
            <li class="job">Backend Engineer, Payments</li>
            <li class="job">Frontend Engineer, Design Systems</li>
            <li class="job">Engineering Manager, Platform</li>
            <li class="job">Data Scientist, Forecasting</li>
        </ul>"#;
        let extraction = HtmlExtractor::new()
            .extract(body, Category::Jobs, 3)
            .unwrap();

        assert_eq!(
            texts(extraction),
            [
                "Backend Engineer, Payments",
                "Frontend Engineer, Design Systems",
                "Engineering Manager, Platform"
            ]
        );
    }

    #[test]
    fn long_listing_is_truncated() {
        let title = "Principal Engineer ".repeat(20);
        let body = format!(r#"<div class="position">{title}</div>"#);
        let extraction = HtmlExtractor::new()
            .extract(body.as_bytes(), Category::Jobs, 3)
            .unwrap();

        let snippets = extraction.into_snippets();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].text().chars().count(), MAX_SNIPPET_CHARS);
        assert!(snippets[0].text().starts_with("Principal Engineer"));
    }

    // -----------------------------------------------------------------------
    // News
    // -----------------------------------------------------------------------

    #[test]
    fn blog_fixture_takes_first_three_headings() {
        let body = load_fixture("blog.html");
        let extraction = HtmlExtractor::new()
            .extract(&body, Category::News, 3)
            .unwrap();

        // "Blog" is the first heading and too short to keep.
        let snippets = extraction.into_snippets();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].text(), "Acme raises Series C to expand into Europe");
        assert_eq!(
            snippets[1].text(),
            "Introducing Acme Workflows: automation for every team"
        );
        assert!(snippets.iter().all(|s| s.origin() == SnippetOrigin::Blog));
    }

    // -----------------------------------------------------------------------
    // Empty results
    // -----------------------------------------------------------------------

    #[test]
    fn page_without_matches_is_empty_not_error() {
        let body = b"<html><body><p>Nothing to see here at all.</p></body></html>";
        let extractor = HtmlExtractor::new();

        assert_eq!(
            extractor.extract(body, Category::Jobs, 3).unwrap(),
            Extraction::Empty
        );
        assert_eq!(
            extractor.extract(body, Category::News, 3).unwrap(),
            Extraction::Empty
        );
    }

    #[test]
    fn non_html_bytes_are_tolerated() {
        let body = [0xff, 0xfe, 0x00, 0x41];
        let extraction = HtmlExtractor::new()
            .extract(&body, Category::News, 3)
            .unwrap();
        assert!(extraction.is_empty());
    }

    #[test]
    fn zero_limit_yields_empty() {
        let body = load_fixture("blog.html");
        let extraction = HtmlExtractor::new()
            .extract(&body, Category::News, 0)
            .unwrap();
        assert_eq!(extraction, Extraction::Empty);
    }

    #[test]
    fn missing_rule_is_parse_error() {
        let extractor = HtmlExtractor::with_rules(vec![Box::new(HeadlineRule)]);
        let err = extractor
            .extract(b"<li class='job'>Any job title here</li>", Category::Jobs, 3)
            .unwrap_err();
        assert!(matches!(err, IntelError::Parse { .. }));
    }

    #[test]
    fn element_text_joins_trimmed_pieces() {
        let doc = Html::parse_fragment("<div>  Senior <b>Rust</b>\n   Engineer  </div>");
        let sel = rules::selector("div").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(el), "SeniorRustEngineer");
    }

    #[test]
    fn split_title_is_measured_without_separators() {
        let body = br#"<ul>
            <li class="job"><span>Engineer</span><span>II</span></li>
            <li class="job"><span>Engineer</span> <span>III</span></li>
        </ul>"#;
        let extraction = HtmlExtractor::new()
            .extract(body, Category::Jobs, 3)
            .unwrap();

        // "EngineerII" is exactly ten characters and does not qualify.
        assert_eq!(texts(extraction), ["EngineerIII"]);
    }
}
