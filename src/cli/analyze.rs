//! `speedfit analyze`: import → upload → metrics → report.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::args::AnalyzeArgs;
use crate::adapters::{FileVideoSource, ReqwestHttpClient};
use crate::cli_output::{
    icons, print_footer_success, print_footer_warning, print_header, print_progress,
    print_progress_done, print_report, print_step_end, print_step_line, print_step_start,
    print_troubleshoot, SPINNER_CHARS,
};
use crate::client::MetricsOutcome;
use crate::config::{BackendConfig, MetricsFallback};
use crate::error::{SpeedfitError, SpeedfitResult};
use crate::results::render_session;
use crate::traits::HttpClient;
use crate::workflow::{AnalysisWorkflow, SubmissionReport};

const TOTAL_STEPS: u8 = 3;
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Note appended to the report when sample metrics are shown.
pub const PLACEHOLDER_NOTE: &str =
    "NOTE: sample metrics shown; the metrics for this video could not be fetched.";

/// Build the backend configuration for an analyze run.
pub fn analyze_config(args: &AnalyzeArgs) -> SpeedfitResult<BackendConfig> {
    let mut config = BackendConfig::from_env()?;
    if let Some(ref url) = args.url {
        config = config.with_base_url(url.as_str());
    }
    if args.placeholder_metrics {
        config = config.with_metrics_fallback(MetricsFallback::Placeholder);
    }
    config.validate()?;
    Ok(config)
}

/// Handle `speedfit analyze`.
pub fn handle_analyze_command(args: AnalyzeArgs) -> SpeedfitResult<bool> {
    let config = analyze_config(&args)?;
    let http = Arc::new(ReqwestHttpClient::new());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut workflow = AnalysisWorkflow::new(config, http);
        let report = run_analysis(&mut workflow, &args).await?;
        let lines = report_lines(&workflow, &report);
        print_report(&lines);

        if report.metrics.metrics().is_some() && !report.metrics.is_placeholder() {
            print_footer_success("ANALYSIS COMPLETE");
        } else {
            print_footer_warning("ANALYSIS COMPLETE (with warnings)", metrics_note(&report.metrics));
        }

        workflow.acknowledge();
        Ok(true)
    })
}

/// Run import, configure and submit, printing step lines along the way.
pub async fn run_analysis<C: HttpClient>(
    workflow: &mut AnalysisWorkflow<C>,
    args: &AnalyzeArgs,
) -> SpeedfitResult<SubmissionReport> {
    print_header("SPEEDFIT ANALYSIS");

    print_step_start(1, TOTAL_STEPS, "IMPORT VIDEO");
    let source = FileVideoSource::new(&args.video);
    let video = match workflow.import_video(&source).await {
        Ok(video) => video,
        Err(e) => {
            print_step_line(icons::FAILURE, "Import failed");
            return Err(e.into());
        }
    };
    workflow.configure(args.lift_type, args.weight.as_str(), args.plate_size);
    print_step_line(icons::SUCCESS, &format!("Video ready: {}", video));
    print_step_line(
        icons::SUCCESS,
        &format!(
            "{}, plate {}",
            workflow.session().title(),
            workflow.session().plate_size.label()
        ),
    );
    print_step_end();

    print_step_start(2, TOTAL_STEPS, "ANALYZE");
    print_step_line("→", &format!("Uploading to {}", workflow.config().base_url));
    let progress = workflow.progress();
    let renderer = spawn_progress_renderer(progress.clone());
    let submitted = workflow.submit().await;
    renderer.abort();
    let _ = renderer.await;

    let report = match submitted {
        Ok(report) => {
            print_progress(SPINNER_CHARS[0], *progress.borrow(), "Analyzing");
            print_progress_done(icons::SUCCESS, "Analysis complete");
            report
        }
        Err(e) => {
            let err = SpeedfitError::from(e);
            print_progress_done(icons::FAILURE, "Analysis failed");
            if err.is_retryable() {
                print_troubleshoot(&[err.recovery_hint(), "Run 'speedfit health' to check the backend."]);
            }
            return Err(err);
        }
    };
    print_step_end();

    print_step_start(3, TOTAL_STEPS, "METRICS");
    match &report.metrics {
        MetricsOutcome::Fetched(metrics) => print_step_line(
            icons::SUCCESS,
            &format!("Metrics loaded ({} reps)", metrics.total_reps),
        ),
        other => print_step_line(icons::WARNING, metrics_note(other)),
    }
    print_step_end();

    Ok(report)
}

/// Report lines for stdout.
pub fn report_lines<C: HttpClient>(
    workflow: &AnalysisWorkflow<C>,
    report: &SubmissionReport,
) -> Vec<String> {
    let mut lines = render_session(workflow.session());
    if report.metrics.is_placeholder() {
        lines.push(String::new());
        lines.push(PLACEHOLDER_NOTE.to_string());
    }
    lines
}

fn metrics_note(outcome: &MetricsOutcome) -> &'static str {
    match outcome {
        MetricsOutcome::Fetched(_) => "Metrics loaded",
        MetricsOutcome::NotProvided => "Backend did not report a metrics file",
        MetricsOutcome::Failed(_) => "Metrics could not be fetched",
        MetricsOutcome::Placeholder { .. } => "Metrics could not be fetched; showing sample metrics",
    }
}

/// Redraw the progress line whenever the fraction changes, animating the
/// spinner in between.
fn spawn_progress_renderer(mut progress: watch::Receiver<f64>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut frame = 0usize;
        let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
        loop {
            let fraction = *progress.borrow_and_update();
            print_progress(SPINNER_CHARS[frame % SPINNER_CHARS.len()], fraction, "Analyzing");
            frame = frame.wrapping_add(1);

            tokio::select! {
                changed = progress.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {}
            }
        }
    })
}
