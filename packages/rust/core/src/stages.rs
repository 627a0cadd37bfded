//! Network-free stage logic: target planning and insight synthesis.

use intelscout_shared::{Category, IntelError, PipelineState, Result, SUBJECT_PLACEHOLDER, Subject};

/// Insight when neither scouting stage found anything.
pub const NO_DATA_INSIGHT: &str = "No data available for analysis";

/// Insight when at least one snippet was found. Real analysis needs an
/// enrichment backend that is not wired in yet.
pub const PLACEHOLDER_INSIGHT: &str =
    "Basic scraping completed - limited insights available without MCP";

/// The pages probed on a competitor's site, in `targets` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPage {
    Careers,
    Blog,
    Changelog,
}

impl TargetPage {
    pub const ALL: [TargetPage; 3] = [Self::Careers, Self::Blog, Self::Changelog];

    pub fn path(self) -> &'static str {
        match self {
            Self::Careers => "careers",
            Self::Blog => "blog",
            Self::Changelog => "changelog",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl From<Category> for TargetPage {
    fn from(category: Category) -> Self {
        match category {
            Category::Jobs => Self::Careers,
            Category::News => Self::Blog,
        }
    }
}

/// Derive the careers, blog, and changelog URLs for `subject`.
pub fn plan_targets(subject: &Subject, site_template: &str) -> Vec<String> {
    let base = site_template.replace(SUBJECT_PLACEHOLDER, &subject.folded());
    let base = base.trim_end_matches('/');
    TargetPage::ALL
        .iter()
        .map(|page| format!("{base}/{}", page.path()))
        .collect()
}

/// The planned URL a scouting stage for `category` should fetch.
pub fn target_for(state: &PipelineState, category: Category) -> Result<&str> {
    let page = TargetPage::from(category);
    state
        .targets()
        .get(page.index())
        .map(String::as_str)
        .ok_or_else(|| IntelError::validation(format!("no {} target planned", page.path())))
}

/// Fixed insight text; only emptiness of the scouted lists matters.
pub fn synthesize_insight(state: &PipelineState) -> &'static str {
    if state.jobs().is_empty() && state.news().is_empty() {
        NO_DATA_INSIGHT
    } else {
        PLACEHOLDER_INSIGHT
    }
}
