//! End-to-end intelligence run: plan → scout-jobs → scout-news →
//! synthesize-insight → report.
//!
//! Stages run strictly in order over one [`PipelineState`]. A scouting stage
//! that fails (fetch or extraction) contributes an empty list and the run
//! carries on, so [`Pipeline::run`] always returns a complete state.

use std::time::Instant;

use tracing::{Span, field, info, instrument, warn};

use intelscout_extract::{Extractor, HtmlExtractor};
use intelscout_fetch::{Fetcher, HttpFetcher};
use intelscout_report::Reporter;
use intelscout_shared::{
    Category, IntelError, PipelineState, Result, RunId, ScoutConfig, Snippet, Subject,
};

use crate::stages;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// One step of the fixed pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Plan,
    ScoutJobs,
    ScoutNews,
    SynthesizeInsight,
    Report,
}

impl Stage {
    /// Execution order.
    pub const ALL: [Stage; 5] = [
        Self::Plan,
        Self::ScoutJobs,
        Self::ScoutNews,
        Self::SynthesizeInsight,
        Self::Report,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::ScoutJobs => "scout-jobs",
            Self::ScoutNews => "scout-news",
            Self::SynthesizeInsight => "synthesize-insight",
            Self::Report => "report",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a stage produced. Each variant carries only the field its stage owns.
#[derive(Debug)]
enum StageOutput {
    Targets(Vec<String>),
    Jobs(Vec<Snippet>),
    News(Vec<Snippet>),
    Insight(String),
    Unchanged,
}

impl StageOutput {
    fn apply(self, state: PipelineState) -> PipelineState {
        match self {
            Self::Targets(targets) => state.with_targets(targets),
            Self::Jobs(jobs) => state.with_jobs(jobs),
            Self::News(news) => state.with_news(news),
            Self::Insight(insight) => state.with_insight(insight),
            Self::Unchanged => state,
        }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress callback for reporting stage transitions.
pub trait StageProgress: Send + Sync {
    /// Called before a stage executes.
    fn stage_started(&self, stage: Stage);
    /// Called when a stage fell back to an empty result.
    fn stage_degraded(&self, stage: Stage, error: &IntelError);
    /// Called after a stage's output has been applied.
    fn stage_finished(&self, stage: Stage);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl StageProgress for SilentProgress {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_degraded(&self, _stage: Stage, _error: &IntelError) {}
    fn stage_finished(&self, _stage: Stage) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// The production pipeline: `reqwest` fetching and `scraper` extraction.
pub type HttpPipeline = Pipeline<HttpFetcher, HtmlExtractor>;

/// Owns the collaborators and drives the stage sequence.
pub struct Pipeline<F, X> {
    config: ScoutConfig,
    fetcher: F,
    extractor: X,
    reporter: Box<dyn Reporter>,
}

impl HttpPipeline {
    /// Validate `config` and wire up the HTTP fetcher and HTML extractor.
    pub fn http(config: ScoutConfig, reporter: Box<dyn Reporter>) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Pipeline::new(config, fetcher, HtmlExtractor::new(), reporter))
    }
}

impl<F: Fetcher, X: Extractor> Pipeline<F, X> {
    pub fn new(config: ScoutConfig, fetcher: F, extractor: X, reporter: Box<dyn Reporter>) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            reporter,
        }
    }

    /// Run every stage for `subject` and return the final state.
    pub async fn run(&self, subject: Subject) -> PipelineState {
        self.run_with_progress(subject, &SilentProgress).await
    }

    /// Like [`run`](Self::run), reporting stage transitions to `progress`.
    #[instrument(skip_all, fields(subject = %subject, run_id = field::Empty))]
    pub async fn run_with_progress(
        &self,
        subject: Subject,
        progress: &dyn StageProgress,
    ) -> PipelineState {
        let start = Instant::now();
        let run_id = RunId::new();
        Span::current().record("run_id", field::display(&run_id));

        info!("starting intelligence run");

        let mut state = PipelineState::new(subject);
        for stage in Stage::ALL {
            progress.stage_started(stage);
            let output = self.execute(stage, &state, progress).await;
            state = output.apply(state);
            progress.stage_finished(stage);
        }

        info!(
            jobs = state.jobs().len(),
            news = state.news().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "intelligence run complete"
        );

        state
    }

    async fn execute(
        &self,
        stage: Stage,
        state: &PipelineState,
        progress: &dyn StageProgress,
    ) -> StageOutput {
        match stage {
            Stage::Plan => {
                let targets = stages::plan_targets(state.subject(), &self.config.site_template);
                info!(targets = targets.len(), "planned intelligence targets");
                StageOutput::Targets(targets)
            }
            Stage::ScoutJobs => {
                StageOutput::Jobs(self.scout_isolated(stage, Category::Jobs, state, progress).await)
            }
            Stage::ScoutNews => {
                StageOutput::News(self.scout_isolated(stage, Category::News, state, progress).await)
            }
            Stage::SynthesizeInsight => {
                StageOutput::Insight(stages::synthesize_insight(state).to_string())
            }
            Stage::Report => {
                self.reporter.render(state);
                StageOutput::Unchanged
            }
        }
    }

    /// Stage boundary: any failure below becomes an empty list plus a warning.
    async fn scout_isolated(
        &self,
        stage: Stage,
        category: Category,
        state: &PipelineState,
        progress: &dyn StageProgress,
    ) -> Vec<Snippet> {
        match self.scout(category, state).await {
            Ok(snippets) => {
                info!(%stage, %category, found = snippets.len(), "scouting complete");
                snippets
            }
            Err(e) => {
                warn!(%stage, %category, error = %e, "scouting failed, continuing with no results");
                progress.stage_degraded(stage, &e);
                Vec::new()
            }
        }
    }

    async fn scout(&self, category: Category, state: &PipelineState) -> Result<Vec<Snippet>> {
        let url = stages::target_for(state, category)?;
        let body = self.fetcher.fetch(url, self.config.timeout()).await?;
        let extraction = self
            .extractor
            .extract(&body, category, self.config.snippet_limit)?;
        Ok(extraction.into_snippets())
    }
}
