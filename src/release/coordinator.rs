use crate::config::ActionSettings;
use crate::domain::{validate_development_version, FormParams, ModuleVersionInfo, ReleaseRequest};
use crate::error::{ReleaseError, Result};
use crate::project::{
    Actor, AdmissionResult, BuildCause, BuildScheduler, ModuleInfo, ModuleRegistry,
    PermissionCheck, ProjectInfo, ReleaseWrapper,
};
use crate::release::permalink::{Permalink, PERMALINKS};
use crate::release::state::ReleaseState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

/// URL segment of the release action below a project
pub const URL_NAME: &str = "mvnrelease";

pub const DISPLAY_NAME: &str = "Perform Maven Release";

pub const ICON_FILE_NAME: &str = "installer.gif";

/// Where the caller should send the user after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Build scheduled; redirect to the project page
    Accepted { redirect: String },
    /// Scheduler declined; redirect to the failure page
    Rejected { redirect: String },
}

impl SubmissionOutcome {
    pub fn redirect(&self) -> &str {
        match self {
            SubmissionOutcome::Accepted { redirect } | SubmissionOutcome::Rejected { redirect } => {
                redirect
            }
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }
}

/// Accepts release submissions and admits at most one build per project at a time
///
/// Submissions run through four gates in order: permission, parsing,
/// development version validation, then scheduling while holding the write
/// lock on the project's [`ReleaseState`]. Readers therefore never observe a
/// build that was accepted but not yet committed. Only an accepted schedule
/// mutates the state; every other path leaves it untouched.
pub struct ReleaseCoordinator {
    registry: Arc<dyn ModuleRegistry>,
    permissions: Arc<dyn PermissionCheck>,
    scheduler: Arc<dyn BuildScheduler>,
    wrapper: Arc<dyn ReleaseWrapper>,
    settings: ActionSettings,
    context_path: String,
    slots: Mutex<HashMap<String, Arc<RwLock<ReleaseState>>>>,
}

impl ReleaseCoordinator {
    pub fn new(
        registry: Arc<dyn ModuleRegistry>,
        permissions: Arc<dyn PermissionCheck>,
        scheduler: Arc<dyn BuildScheduler>,
        wrapper: Arc<dyn ReleaseWrapper>,
    ) -> Self {
        ReleaseCoordinator {
            registry,
            permissions,
            scheduler,
            wrapper,
            settings: ActionSettings::default(),
            context_path: String::new(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Form defaults shown on the release page
    pub fn with_settings(mut self, settings: ActionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Server context prefixed to redirects, e.g. "/jenkins"
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into().trim_end_matches('/').to_string();
        self
    }

    /// Submit a release request for a project
    ///
    /// # Returns
    /// * `Ok(Accepted)` - Build scheduled and state committed
    /// * `Ok(Rejected)` - Scheduler declined, state untouched
    /// * `Err(PermissionDenied | MalformedRequest | InvalidVersion | UnknownProject)` -
    ///   Aborted before scheduling, state untouched
    pub fn submit(
        &self,
        actor: &Actor,
        project_id: &str,
        params: &FormParams,
    ) -> Result<SubmissionOutcome> {
        if !self.permissions.has_release_permission(actor, project_id) {
            tracing::warn!(actor = %actor.name, project = project_id, "release permission denied");
            return Err(ReleaseError::permission_denied(&actor.name, project_id));
        }

        let request = ReleaseRequest::from_params(params, actor.name.clone())?;
        validate_development_version(&request.development_version)?;
        tracing::debug!(
            project = project_id,
            release = %request.release_version,
            development = %request.development_version,
            "release request validated"
        );

        let project = self
            .registry
            .project(project_id)
            .ok_or_else(|| ReleaseError::unknown_project(project_id))?;

        let slot = self.slot(project_id);
        // Held across schedule and commit; a rejection drops it unwritten
        let mut state = slot.write().unwrap_or_else(PoisonError::into_inner);

        let cause = BuildCause::UserInitiated {
            user: actor.name.clone(),
        };
        match self
            .scheduler
            .schedule(project_id, &cause, Duration::ZERO, &request)
        {
            AdmissionResult::Accepted => {
                self.wrapper.enable_release(project_id);
                tracing::info!(
                    project = project_id,
                    actor = %actor.name,
                    release = %request.release_version,
                    "release build scheduled"
                );
                *state = ReleaseState::accepted(request);
                Ok(SubmissionOutcome::Accepted {
                    redirect: self.project_url(&project),
                })
            }
            AdmissionResult::Rejected => {
                tracing::warn!(project = project_id, "scheduler rejected release build");
                Ok(SubmissionOutcome::Rejected {
                    redirect: format!(
                        "{}/{}/failed",
                        self.project_url(&project).trim_end_matches('/'),
                        URL_NAME
                    ),
                })
            }
        }
    }

    /// Snapshot of the project's last accepted release
    pub fn release_state(&self, project_id: &str) -> ReleaseState {
        let slot = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(project_id)
            .cloned();
        match slot {
            Some(slot) => slot
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            None => ReleaseState::default(),
        }
    }

    pub fn is_release_build(&self, project_id: &str) -> bool {
        self.release_state(project_id).is_release_build()
    }

    /// Version info of the project's root module as it is right now
    pub fn version_info(&self, project_id: &str) -> Result<ModuleVersionInfo> {
        Ok(ModuleVersionInfo::new(self.root_module(project_id)?.version))
    }

    pub fn compute_release_version(&self, project_id: &str) -> Result<String> {
        Ok(self.version_info(project_id)?.release_version())
    }

    pub fn compute_next_version(&self, project_id: &str) -> Result<String> {
        Ok(self.version_info(project_id)?.next_development_version())
    }

    /// Default staging repository description: "<module name>:<release version>"
    pub fn compute_repo_description(&self, project_id: &str) -> Result<String> {
        let root = self.root_module(project_id)?;
        let release = ModuleVersionInfo::new(root.version).release_version();
        Ok(format!("{}:{}", root.name, release))
    }

    /// Default SCM tag, Maven's "<artifactId>-<version>"
    pub fn compute_scm_tag(&self, project_id: &str) -> Result<String> {
        let root = self.root_module(project_id)?;
        let release = ModuleVersionInfo::new(root.version).release_version();
        Ok(format!("{}-{}", root.artifact_id, release))
    }

    pub fn root_module(&self, project_id: &str) -> Result<ModuleInfo> {
        Ok(self.project(project_id)?.root_module)
    }

    pub fn modules(&self, project_id: &str) -> Result<Vec<ModuleInfo>> {
        Ok(self.project(project_id)?.modules)
    }

    /// Icon for the sidebar link; `None` hides the link from users who cannot release
    pub fn icon_file_name(&self, actor: &Actor, project_id: &str) -> Option<&'static str> {
        self.permissions
            .has_release_permission(actor, project_id)
            .then_some(ICON_FILE_NAME)
    }

    pub fn url_name(&self) -> &'static str {
        URL_NAME
    }

    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    pub fn settings(&self) -> &ActionSettings {
        &self.settings
    }

    pub fn is_nexus_support_enabled(&self) -> bool {
        false
    }

    pub fn permalinks(&self) -> &'static [Permalink] {
        PERMALINKS
    }

    fn project(&self, project_id: &str) -> Result<ProjectInfo> {
        self.registry
            .project(project_id)
            .ok_or_else(|| ReleaseError::unknown_project(project_id))
    }

    fn project_url(&self, project: &ProjectInfo) -> String {
        format!("{}/{}", self.context_path, project.url.trim_start_matches('/'))
    }

    fn slot(&self, project_id: &str) -> Arc<RwLock<ReleaseState>> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(project_id.to_string())
            .or_default()
            .clone()
    }
}
