//! Heuristic selection rules, one per snippet category.
//!
//! A rule picks candidate elements out of a parsed document in document
//! order. Capping and length filtering happen in the extractor, not here.

use intelscout_shared::{Category, IntelError, Result};
use scraper::{ElementRef, Html, Selector};

/// Class-name fragments that mark an element as a job listing.
const JOB_CLASS_MARKERS: [&str; 2] = ["job", "position"];

/// Picks candidate elements for one [`Category`].
pub trait SelectionRule: Send + Sync {
    /// Category this rule serves.
    fn category(&self) -> Category;

    /// Matching elements, in document order.
    fn candidates<'a>(&self, doc: &'a Html) -> Result<Vec<ElementRef<'a>>>;

    /// Human-readable rule name for tracing.
    fn name(&self) -> &str;
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| IntelError::parse(format!("invalid selector '{css}': {e:?}")))
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// `div`/`li` elements carrying a class like `job-card` or `open-position`.
pub struct JobListingRule;

impl SelectionRule for JobListingRule {
    fn category(&self) -> Category {
        Category::Jobs
    }

    fn candidates<'a>(&self, doc: &'a Html) -> Result<Vec<ElementRef<'a>>> {
        let sel = selector("div[class], li[class]")?;
        Ok(doc
            .select(&sel)
            .filter(|el| el.value().classes().any(is_job_class))
            .collect())
    }

    fn name(&self) -> &str {
        "job-listing"
    }
}

fn is_job_class(class: &str) -> bool {
    let class = class.to_lowercase();
    JOB_CLASS_MARKERS.iter().any(|marker| class.contains(marker))
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

/// Top-level headings (`h1`–`h3`), treated as article titles.
pub struct HeadlineRule;

impl SelectionRule for HeadlineRule {
    fn category(&self) -> Category {
        Category::News
    }

    fn candidates<'a>(&self, doc: &'a Html) -> Result<Vec<ElementRef<'a>>> {
        let sel = selector("h1, h2, h3")?;
        Ok(doc.select(&sel).collect())
    }

    fn name(&self) -> &str {
        "headline"
    }
}
