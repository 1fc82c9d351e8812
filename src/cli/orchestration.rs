//! Release workflow orchestration
//!
//! Wires configuration into a [`ReleaseCoordinator`] backed by in-memory
//! collaborators and runs single commands against it. Kept apart from
//! `main.rs` so the workflows can be called without clap.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{FormParams, ReleaseRequest};
use crate::project::{Actor, RecordingWrapper, SingleSlotScheduler};
use crate::release::{ReleaseCoordinator, ReleaseState, SubmissionOutcome};
use crate::ui::VersionPreview;

/// Arguments for a single release submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitArgs {
    /// Project to release
    pub project: String,

    /// Display name of the submitting user
    pub user: String,

    /// Form parameters as "key=value" or bare "flag"
    pub params: Vec<String>,

    /// Pretend a build is already queued so the scheduler rejects
    pub pending: bool,
}

/// Result of a submission that passed every validation gate
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    pub outcome: SubmissionOutcome,

    /// Project release state after the submission
    pub state: ReleaseState,

    /// Request carried by the queued build, if one was queued
    pub queued: Option<ReleaseRequest>,

    /// Non-fatal conditions to show the user
    pub warnings: Vec<BoundaryWarning>,
}

/// Coordinator and the collaborators a command needs to inspect afterwards
pub struct Workspace {
    pub coordinator: ReleaseCoordinator,
    pub scheduler: Arc<SingleSlotScheduler>,
    pub wrapper: Arc<RecordingWrapper>,
}

/// Build a coordinator for the configured projects
pub fn build_workspace(config: &Config) -> Workspace {
    let scheduler = Arc::new(SingleSlotScheduler::new());
    let wrapper = Arc::new(RecordingWrapper::new());
    let coordinator = ReleaseCoordinator::new(
        Arc::new(config.registry()),
        Arc::new(config.allow_list()),
        scheduler.clone(),
        wrapper.clone(),
    )
    .with_settings(config.action.clone())
    .with_context_path(config.context_path.clone());

    Workspace {
        coordinator,
        scheduler,
        wrapper,
    }
}

/// Submit one release request
///
/// Validation failures surface as errors wrapping [`crate::ReleaseError`];
/// a scheduler rejection is a normal [`SubmissionOutcome::Rejected`].
pub fn run_submit(args: &SubmitArgs, config: &Config) -> Result<SubmitResult> {
    let workspace = build_workspace(config);
    if args.pending {
        workspace.scheduler.mark_busy(args.project.clone());
    }

    let params = FormParams::from_assignments(&args.params)?;
    let actor = Actor::new(args.user.clone());
    let outcome = workspace
        .coordinator
        .submit(&actor, &args.project, &params)?;

    let mut warnings = Vec::new();
    if let SubmissionOutcome::Rejected { .. } = outcome {
        warnings.push(BoundaryWarning::ReleaseAlreadyPending {
            project: args.project.clone(),
        });
    }

    Ok(SubmitResult {
        state: workspace.coordinator.release_state(&args.project),
        queued: workspace.scheduler.pending(&args.project),
        outcome,
        warnings,
    })
}

/// Compute the release form defaults for a project
pub fn preview_versions(
    project: &str,
    config: &Config,
) -> Result<(VersionPreview, Option<BoundaryWarning>)> {
    let workspace = build_workspace(config);
    let coordinator = &workspace.coordinator;
    let info = coordinator
        .version_info(project)
        .with_context(|| format!("cannot preview versions of '{}'", project))?;

    let preview = VersionPreview {
        project: project.to_string(),
        current_version: info.raw_version().to_string(),
        release_version: coordinator.compute_release_version(project)?,
        next_version: coordinator.compute_next_version(project)?,
        repo_description: coordinator.compute_repo_description(project)?,
        scm_tag: coordinator.compute_scm_tag(project)?,
    };

    Ok((preview, info.degradation()))
}
