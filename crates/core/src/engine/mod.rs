//! Pipeline execution engine.
//!
//! The PipelineEngine drives one pipeline run through its four stages:
//! research, content planning, then video and podcast generation side by
//! side. It owns no state between runs; the caller passes a
//! [`PipelineRun`] in and gets the updated run back.

use crate::backend::{BackendResult, ContentBackend, HttpBackend};
use crate::config::models::AppConfig;
use crate::generation::{Generators, MediaBrief, MediaGenerator, MediaKind};
use crate::state::run::{
    begin_stage, complete_stage, fail_stage, mark_generated, notify, store_content_plan,
    store_media_output, store_research_reports,
};
use cp_protocol::ipc::{Event, RunOutcome};
use cp_protocol::planning_models::{ContentPlan, ContentStrategy};
use cp_protocol::research_models::ResearchConfig;
use cp_protocol::run_models::{video_link, Notification, PipelineRun, Stage};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;

/// The main pipeline execution engine.
pub struct PipelineEngine {
    backend: Arc<dyn ContentBackend>,
    generators: Generators,
    strategy: ContentStrategy,
}

impl PipelineEngine {
    /// Create a new PipelineEngine.
    ///
    /// # Arguments
    ///
    /// * `backend` - Client for the research and planning endpoints
    /// * `generators` - Video and podcast generators
    /// * `strategy` - Payload sent to the content planning endpoint
    pub fn new(
        backend: Arc<dyn ContentBackend>,
        generators: Generators,
        strategy: ContentStrategy,
    ) -> Self {
        Self {
            backend,
            generators,
            strategy,
        }
    }

    /// Wire the HTTP backend, generators and strategy described by `config`.
    pub fn from_config(config: &AppConfig) -> BackendResult<Self> {
        let backend = Arc::new(HttpBackend::from_config(config)?);
        let generators = Generators::from_config(config, Arc::clone(&backend));
        Ok(Self::new(backend, generators, config.global.strategy.clone()))
    }

    /// Run the pipeline for `config` and return the updated run.
    ///
    /// This is the main entry point. It:
    /// 1. Emits RunStarted
    /// 2. Runs research; halts on failure
    /// 3. Runs content planning; halts on failure
    /// 4. Runs video and podcast generation concurrently
    /// 5. Emits RunFinished with the outcome
    ///
    /// Stage failures never escape as errors. They are recorded on the run,
    /// reported through a notification, and end the chain.
    pub async fn run(
        &self,
        mut run: PipelineRun,
        config: &ResearchConfig,
        events_tx: &Sender<Event>,
    ) -> PipelineRun {
        tracing::info!(
            run_id = %run.id,
            topic = %config.topic,
            depth = %config.research_depth,
            competitors = config.competitor_domains.len(),
            "pipeline run started"
        );

        let _ = events_tx
            .send(Event::RunStarted {
                run_id: run.id,
                topic: config.topic.clone(),
                target_audience: config.target_audience.clone(),
            })
            .await;

        if !self.research(&mut run, config, events_tx).await {
            return finish(run, events_tx, RunOutcome::Halted { stage: Stage::Research }).await;
        }

        let plan = match self.content_planning(&mut run, events_tx).await {
            Some(plan) => plan,
            None => {
                return finish(
                    run,
                    events_tx,
                    RunOutcome::Halted {
                        stage: Stage::ContentPlanning,
                    },
                )
                .await;
            }
        };

        let brief = MediaBrief::new(config, plan);
        let run = self.generate_media(run, &brief, events_tx).await;

        let outcome = match Stage::ALL.into_iter().find(|stage| run.failed.get(*stage)) {
            Some(stage) => RunOutcome::Halted { stage },
            None => RunOutcome::Finished,
        };
        finish(run, events_tx, outcome).await
    }

    /// Research stage. Returns whether it succeeded.
    async fn research(
        &self,
        run: &mut PipelineRun,
        config: &ResearchConfig,
        events_tx: &Sender<Event>,
    ) -> bool {
        let stage = Stage::Research;
        begin_stage(run, events_tx, stage).await;
        notify(
            run,
            events_tx,
            Notification::info(
                "Research Started",
                format!(
                    "Starting research on \"{}\" for {}",
                    config.topic, config.target_audience
                ),
            ),
        )
        .await;

        match self.backend.market_research(config).await {
            Ok(response) => {
                tracing::info!(
                    run_id = %run.id,
                    reports = response.research_reports.len(),
                    "research result received"
                );
                store_research_reports(run, events_tx, response.research_reports).await;
                complete_stage(run, events_tx, stage).await;
                notify(
                    run,
                    events_tx,
                    Notification::success(
                        "Research Completed",
                        "Market research completed. Starting content planning...",
                    ),
                )
                .await;
                true
            }
            Err(e) => {
                fail_stage(run, events_tx, stage, &e.to_string()).await;
                notify(
                    run,
                    events_tx,
                    Notification::destructive(
                        "Research Failed",
                        format!("Failed to complete market research ({e}). Please try again."),
                    ),
                )
                .await;
                false
            }
        }
    }

    /// Content planning stage. Returns the plan on success.
    async fn content_planning(
        &self,
        run: &mut PipelineRun,
        events_tx: &Sender<Event>,
    ) -> Option<ContentPlan> {
        let stage = Stage::ContentPlanning;
        begin_stage(run, events_tx, stage).await;
        notify(
            run,
            events_tx,
            Notification::info(
                "Content Planning Started",
                "Creating content strategy based on research findings...",
            ),
        )
        .await;

        match self.backend.content_planning(&self.strategy).await {
            Ok(plan) => {
                tracing::info!(
                    run_id = %run.id,
                    state = plan.state().unwrap_or("unknown"),
                    "content plan received"
                );
                store_content_plan(run, events_tx, plan.clone()).await;
                complete_stage(run, events_tx, stage).await;
                notify(
                    run,
                    events_tx,
                    Notification::success(
                        "Content Planning Completed",
                        "Content strategy created. Starting video and podcast generation...",
                    ),
                )
                .await;
                Some(plan)
            }
            Err(e) => {
                fail_stage(run, events_tx, stage, &e.to_string()).await;
                notify(
                    run,
                    events_tx,
                    Notification::destructive(
                        "Content Planning Failed",
                        format!("Failed to create content plan ({e}). Please try again."),
                    ),
                )
                .await;
                None
            }
        }
    }

    /// Video and podcast stages, started together.
    ///
    /// Each stage updates the shared run as soon as it finishes, so the
    /// viewer sees completions in whatever order they happen.
    async fn generate_media(
        &self,
        run: PipelineRun,
        brief: &MediaBrief,
        events_tx: &Sender<Event>,
    ) -> PipelineRun {
        let shared = Mutex::new(run);

        tokio::join!(
            generate_one(&shared, self.generators.video.as_ref(), brief, events_tx),
            generate_one(&shared, self.generators.podcast.as_ref(), brief, events_tx),
        );

        shared.into_inner()
    }
}

async fn generate_one(
    run: &Mutex<PipelineRun>,
    generator: &dyn MediaGenerator,
    brief: &MediaBrief,
    events_tx: &Sender<Event>,
) {
    let kind = generator.kind();
    let stage = kind.stage();
    let messages = MediaMessages::for_kind(kind);

    {
        let mut run = run.lock().await;
        begin_stage(&mut run, events_tx, stage).await;
        notify(
            &mut run,
            events_tx,
            Notification::info(messages.started.0, messages.started.1),
        )
        .await;
    }

    let result = generator.generate(brief).await;

    let mut run = run.lock().await;
    match result {
        Ok(output) => {
            let mut description = messages.completed.1.to_string();
            if let Some(link) = output.as_ref().and_then(video_link) {
                description = format!("{description} Watch it at {link}");
            }
            if let Some(output) = output {
                store_media_output(&mut run, events_tx, stage, output).await;
            }
            mark_generated(&mut run, stage);
            complete_stage(&mut run, events_tx, stage).await;
            notify(
                &mut run,
                events_tx,
                Notification::success(messages.completed.0, description),
            )
            .await;
        }
        Err(e) => {
            fail_stage(&mut run, events_tx, stage, &e.to_string()).await;
            notify(
                &mut run,
                events_tx,
                Notification::destructive(
                    messages.failed.0,
                    format!("{} ({e})", messages.failed.1),
                ),
            )
            .await;
        }
    }
}

/// Notification texts for the two media stages.
struct MediaMessages {
    started: (&'static str, &'static str),
    completed: (&'static str, &'static str),
    failed: (&'static str, &'static str),
}

impl MediaMessages {
    fn for_kind(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Video => Self {
                started: ("Video Generation Started", "Creating video content using AI..."),
                completed: (
                    "Video Generation Completed",
                    "Video has been generated successfully.",
                ),
                failed: (
                    "Video Generation Failed",
                    "Failed to generate video. Please try again.",
                ),
            },
            MediaKind::Podcast => Self {
                started: ("Podcast Generation Started", "Creating podcast episode..."),
                completed: (
                    "Podcast Generation Completed",
                    "Podcast episode is ready to play.",
                ),
                failed: (
                    "Podcast Generation Failed",
                    "Failed to generate podcast. Please try again.",
                ),
            },
        }
    }
}

async fn finish(run: PipelineRun, events_tx: &Sender<Event>, outcome: RunOutcome) -> PipelineRun {
    match outcome {
        RunOutcome::Finished => tracing::info!(run_id = %run.id, "pipeline run finished"),
        RunOutcome::Halted { stage } => {
            tracing::warn!(run_id = %run.id, %stage, "pipeline run halted")
        }
    }

    let _ = events_tx
        .send(Event::RunFinished {
            run_id: run.id,
            outcome,
        })
        .await;
    run
}
