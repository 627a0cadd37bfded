//! CLI definition, tracing setup, and the run command.

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use intelscout_core::{HttpPipeline, Stage, StageProgress};
use intelscout_report::{ConsoleReporter, JsonReporter, Reporter};
use intelscout_shared::{DEFAULT_SITE_TEMPLATE, EnrichmentConfig, IntelError, ScoutConfig, Subject};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// IntelScout - scout a competitor's hiring and news signals.
#[derive(Parser)]
#[command(
    name = "intelscout",
    version,
    about = "Scout a competitor's careers page and blog and print an intelligence report.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Competitor name to analyze.
    #[arg(long)]
    pub competitor: Subject,

    /// Report format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Base URL pattern for the competitor's site; must contain {subject}.
    #[arg(long, default_value = DEFAULT_SITE_TEMPLATE)]
    pub site_template: String,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ReportFormat {
    Text,
    Json,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

impl Cli {
    fn scout_config(&self) -> ScoutConfig {
        ScoutConfig {
            timeout_secs: self.timeout_secs,
            site_template: self.site_template.clone(),
            ..ScoutConfig::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is the report.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "intelscout=info",
        1 => "intelscout=debug",
        _ => "intelscout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run one intelligence pass for the requested competitor.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let enrichment = EnrichmentConfig::default();
    if enrichment.credentials_present() {
        debug!(
            env = %enrichment.api_key_env,
            "enrichment credentials found; insight synthesis does not use them yet"
        );
    }

    let reporter: Box<dyn Reporter> = match cli.format {
        ReportFormat::Text => Box::new(ConsoleReporter),
        ReportFormat::Json => Box::new(JsonReporter),
    };
    let pipeline = HttpPipeline::http(cli.scout_config(), reporter)?;

    info!(competitor = %cli.competitor, format = ?cli.format, "starting intelligence gathering");

    let text = cli.format == ReportFormat::Text;
    if text {
        println!("COMPETITIVE INTELLIGENCE AGENT");
        println!("Target: {}", cli.competitor);
        println!();
    }

    let progress = CliProgress::new();
    let state = pipeline.run_with_progress(cli.competitor, &progress).await;
    progress.finish();

    info!(
        jobs = state.jobs().len(),
        news = state.news().len(),
        "intelligence gathering complete"
    );

    if text {
        println!();
        println!("Intelligence gathering complete!");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Stage progress on an indicatif spinner (drawn on stderr).
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl StageProgress for CliProgress {
    fn stage_started(&self, stage: Stage) {
        match stage {
            Stage::Plan => self.spinner.set_message("Planning intelligence targets"),
            Stage::ScoutJobs => self.spinner.set_message("Scouting jobs"),
            Stage::ScoutNews => self.spinner.set_message("Hunting news"),
            Stage::SynthesizeInsight => self.spinner.set_message("Generating insights"),
            // The report goes to stdout; clear the spinner so it does not interleave.
            Stage::Report => self.spinner.finish_and_clear(),
        }
    }

    fn stage_degraded(&self, stage: Stage, error: &IntelError) {
        self.spinner.set_message(format!("{stage} found nothing ({error})"));
    }

    fn stage_finished(&self, _stage: Stage) {}
}
