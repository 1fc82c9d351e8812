use crate::domain::ReleaseRequest;
use crate::project::{
    Actor, AdmissionResult, BuildCause, BuildScheduler, ModuleRegistry, PermissionCheck,
    ProjectInfo, ReleaseWrapper,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

/// Project metadata held in memory
///
/// Versions can be changed after construction to mimic a project whose
/// POM moved on between two requests.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    projects: RwLock<HashMap<String, ProjectInfo>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a project
    pub fn add_project(&self, project: ProjectInfo) {
        self.projects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(project.id.clone(), project);
    }

    /// Change the root module version of a project; returns false if unknown
    pub fn set_version(&self, project_id: &str, version: impl Into<String>) -> bool {
        let mut projects = self.projects.write().unwrap_or_else(PoisonError::into_inner);
        match projects.get_mut(project_id) {
            Some(project) => {
                project.root_module.version = version.into();
                true
            }
            None => false,
        }
    }
}

impl ModuleRegistry for InMemoryRegistry {
    fn project(&self, project_id: &str) -> Option<ProjectInfo> {
        self.projects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(project_id)
            .cloned()
    }

    fn project_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .projects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

/// Per-project list of users allowed to release
#[derive(Debug, Default)]
pub struct AllowList {
    users: HashMap<String, HashSet<String>>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(&mut self, project_id: impl Into<String>, user: impl Into<String>) {
        self.users
            .entry(project_id.into())
            .or_default()
            .insert(user.into());
    }
}

impl PermissionCheck for AllowList {
    fn has_release_permission(&self, actor: &Actor, project_id: &str) -> bool {
        self.users
            .get(project_id)
            .is_some_and(|users| users.contains(&actor.name))
    }
}

/// Scheduler that admits at most one pending build per project
///
/// A project stays busy until [`SingleSlotScheduler::complete`] is called.
#[derive(Debug, Default)]
pub struct SingleSlotScheduler {
    pending: Mutex<HashMap<String, ReleaseRequest>>,
    busy: Mutex<HashSet<String>>,
}

impl SingleSlotScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a project as having a non-release build queued
    pub fn mark_busy(&self, project_id: impl Into<String>) {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(project_id.into());
    }

    /// Finish whatever build is queued for a project, freeing its slot
    pub fn complete(&self, project_id: &str) -> Option<ReleaseRequest> {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(project_id);
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(project_id)
    }

    /// Request carried by the build queued for a project
    pub fn pending(&self, project_id: &str) -> Option<ReleaseRequest> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(project_id)
            .cloned()
    }
}

impl BuildScheduler for SingleSlotScheduler {
    fn schedule(
        &self,
        project_id: &str,
        cause: &BuildCause,
        quiet_period: Duration,
        request: &ReleaseRequest,
    ) -> AdmissionResult {
        if self
            .busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(project_id)
        {
            return AdmissionResult::Rejected;
        }

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.contains_key(project_id) {
            return AdmissionResult::Rejected;
        }

        tracing::debug!(project = project_id, ?cause, ?quiet_period, "build queued");
        pending.insert(project_id.to_string(), request.clone());
        AdmissionResult::Accepted
    }
}

/// Release wrapper that records which projects were switched to release mode
#[derive(Debug, Default)]
pub struct RecordingWrapper {
    enabled: Mutex<Vec<String>>,
}

impl RecordingWrapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times release mode was enabled for a project
    pub fn enabled_count(&self, project_id: &str) -> usize {
        self.enabled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|p| p.as_str() == project_id)
            .count()
    }
}

impl ReleaseWrapper for RecordingWrapper {
    fn enable_release(&self, project_id: &str) {
        self.enabled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(project_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ModuleInfo;

    fn project(id: &str) -> ProjectInfo {
        ProjectInfo {
            id: id.to_string(),
            name: id.to_string(),
            url: format!("job/{}/", id),
            root_module: ModuleInfo {
                name: "Core".to_string(),
                group_id: "org.example".to_string(),
                artifact_id: "core".to_string(),
                version: "1.0-SNAPSHOT".to_string(),
            },
            modules: vec![],
        }
    }

    fn request() -> ReleaseRequest {
        ReleaseRequest {
            release_version: "1.0".to_string(),
            development_version: "1.1-SNAPSHOT".to_string(),
            append_build_number: false,
            close_staging_repo: false,
            repo_description: None,
            scm_username: None,
            scm_password: None,
            scm_comment_prefix: None,
            append_username_to_comment: false,
            scm_tag: None,
            requested_by: "alice".to_string(),
        }
    }

    fn cause() -> BuildCause {
        BuildCause::UserInitiated {
            user: "alice".to_string(),
        }
    }

    #[test]
    fn test_registry_lookup_and_version_change() {
        let registry = InMemoryRegistry::new();
        registry.add_project(project("core"));
        assert!(registry.project("missing").is_none());
        assert!(registry.set_version("core", "2.0-SNAPSHOT"));
        assert!(!registry.set_version("missing", "2.0-SNAPSHOT"));
        assert_eq!(
            registry.project("core").unwrap().root_module.version,
            "2.0-SNAPSHOT"
        );
    }

    #[test]
    fn test_registry_ids_sorted() {
        let registry = InMemoryRegistry::new();
        registry.add_project(project("web"));
        registry.add_project(project("api"));
        assert_eq!(registry.project_ids(), vec!["api", "web"]);
    }

    #[test]
    fn test_allow_list() {
        let mut allow = AllowList::new();
        allow.allow("core", "alice");
        assert!(allow.has_release_permission(&Actor::new("alice"), "core"));
        assert!(!allow.has_release_permission(&Actor::new("bob"), "core"));
        assert!(!allow.has_release_permission(&Actor::new("alice"), "web"));
    }

    #[test]
    fn test_single_slot_scheduler() {
        let scheduler = SingleSlotScheduler::new();
        let req = request();
        assert_eq!(
            scheduler.schedule("core", &cause(), Duration::ZERO, &req),
            AdmissionResult::Accepted
        );
        assert_eq!(
            scheduler.schedule("core", &cause(), Duration::ZERO, &req),
            AdmissionResult::Rejected
        );
        assert_eq!(
            scheduler.schedule("web", &cause(), Duration::ZERO, &req),
            AdmissionResult::Accepted
        );
        assert_eq!(scheduler.pending("core"), Some(req.clone()));
        assert!(scheduler.complete("core").is_some());
        assert_eq!(
            scheduler.schedule("core", &cause(), Duration::ZERO, &req),
            AdmissionResult::Accepted
        );
    }

    #[test]
    fn test_busy_project_rejects() {
        let scheduler = SingleSlotScheduler::new();
        scheduler.mark_busy("core");
        assert_eq!(
            scheduler.schedule("core", &cause(), Duration::ZERO, &request()),
            AdmissionResult::Rejected
        );
        scheduler.complete("core");
        assert_eq!(
            scheduler.schedule("core", &cause(), Duration::ZERO, &request()),
            AdmissionResult::Accepted
        );
    }

    #[test]
    fn test_recording_wrapper() {
        let wrapper = RecordingWrapper::new();
        wrapper.enable_release("core");
        wrapper.enable_release("core");
        assert_eq!(wrapper.enabled_count("core"), 2);
        assert_eq!(wrapper.enabled_count("web"), 0);
    }
}
