//! `content-pipeline run`: one pipeline run without the dashboard.

use clap::Args;
use color_eyre::eyre::{bail, Result, WrapErr};
use colored::{ColoredString, Colorize};
use cp_core::config::models::AppConfig;
use cp_core::engine::PipelineEngine;
use cp_core::export;
use cp_core::form::ResearchForm;
use cp_core::state::run::create_run;
use cp_protocol::ipc::{Event, RunOutcome};
use cp_protocol::research_models::{ResearchConfig, ResearchDepth};
use cp_protocol::run_models::{video_link, Severity, StageStatus};
use tokio::sync::mpsc;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Subject area to research.
    #[arg(long)]
    pub topic: String,

    /// Primary audience for the content.
    #[arg(long)]
    pub audience: String,

    /// Competitor domains, comma separated.
    #[arg(long, default_value = "")]
    pub competitors: String,

    /// basic, standard or comprehensive.
    #[arg(long, default_value_t = ResearchDepth::Standard)]
    pub depth: ResearchDepth,

    /// Save every result file into the reports directory afterwards.
    #[arg(long)]
    pub save: bool,
}

impl RunArgs {
    fn research_config(&self) -> Result<ResearchConfig> {
        let form = ResearchForm {
            topic: self.topic.clone(),
            target_audience: self.audience.clone(),
            competitor_domains: self.competitors.clone(),
            research_depth: self.depth,
        };
        Ok(form.validate()?)
    }
}

pub async fn execute(config: &AppConfig, args: RunArgs) -> Result<()> {
    let research = args.research_config()?;
    let engine = PipelineEngine::from_config(config)?;

    let (events_tx, mut events_rx) = mpsc::channel(64);
    let pipeline = tokio::spawn(async move {
        engine
            .run(create_run(), &research, &events_tx)
            .await
    });

    let mut outcome = None;
    while let Some(event) = events_rx.recv().await {
        if let Event::RunFinished { outcome: o, .. } = &event {
            outcome = Some(*o);
        }
        if let Some(line) = format_event(&event) {
            println!("{line}");
        }
    }

    let run = pipeline.await.wrap_err("pipeline task failed")?;

    if args.save {
        let dir = config.reports_dir();
        let saved = tokio::task::spawn_blocking(move || export::save_run(&dir, &run))
            .await
            .wrap_err("report writer task failed")??;
        for path in saved {
            println!("  saved {}", path.display());
        }
    }

    match outcome {
        Some(RunOutcome::Finished) => Ok(()),
        Some(RunOutcome::Halted { stage }) => {
            bail!("pipeline halted at {}", stage.display_name())
        }
        None => bail!("pipeline ended without reporting an outcome"),
    }
}

/// One printable line per event worth showing.
fn format_event(event: &Event) -> Option<String> {
    let line = match event {
        Event::RunStarted {
            topic,
            target_audience,
            ..
        } => format!(
            "{} {} for {}",
            "Starting pipeline:".bold(),
            topic,
            target_audience
        ),
        Event::StageStatusUpdate { stage, status, .. } => format!(
            "  {:<20} {}",
            stage.display_name(),
            status_label(*status)
        ),
        Event::Notification { notification, .. } => {
            let title = match notification.severity {
                Severity::Info => notification.title.cyan(),
                Severity::Success => notification.title.green(),
                Severity::Destructive => notification.title.red(),
            };
            format!("    {title}: {}", notification.description)
        }
        Event::ResearchReportsReady { reports, .. } => {
            format!("    {} research report(s) received", reports.len())
        }
        Event::ContentPlanReady { plan, .. } => match (plan.state(), plan.short_plan_id()) {
            (Some(state), Some(id)) => format!("    content plan {id} is {state}"),
            (Some(state), None) => format!("    content plan is {state}"),
            _ => "    content plan received".to_string(),
        },
        Event::MediaReady { stage, output, .. } => match video_link(output) {
            Some(link) => format!("    video link: {link}"),
            None => format!("    {} output received", stage.label().to_lowercase()),
        },
        Event::RunFinished { outcome, .. } => match outcome {
            RunOutcome::Finished => format!("{}", "Pipeline finished".green().bold()),
            RunOutcome::Halted { stage } => format!(
                "{} at {}",
                "Pipeline halted".red().bold(),
                stage.display_name()
            ),
        },
        Event::ReportSaved { .. } | Event::ReportSaveFailed { .. } => return None,
    };
    Some(line)
}

fn status_label(status: StageStatus) -> ColoredString {
    match status {
        StageStatus::Pending => status.as_str().dimmed(),
        StageStatus::InProgress => status.as_str().yellow(),
        StageStatus::Completed => status.as_str().green(),
        StageStatus::Failed => status.as_str().red(),
    }
}
