//! Collaborator interfaces for the release coordinator
//!
//! The coordinator knows nothing about how projects are stored, how
//! permissions are decided, or how builds run. Each of those is a trait:
//!
//! - [ModuleRegistry]: read-only project and module metadata
//! - [PermissionCheck]: may this actor release this project
//! - [BuildScheduler]: queue a build, accepted or rejected
//! - [ReleaseWrapper]: switches the next build into release mode
//!
//! [memory] provides in-memory implementations used by the CLI and tests.

pub mod memory;

pub use memory::{AllowList, InMemoryRegistry, RecordingWrapper, SingleSlotScheduler};

use crate::domain::ReleaseRequest;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maven coordinates and current version of one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Human-readable module name
    pub name: String,
    pub group_id: String,
    pub artifact_id: String,
    /// Current version, typically a snapshot
    pub version: String,
}

/// A releasable project and its modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    /// Project URL relative to the server context, e.g. "job/core/"
    pub url: String,
    pub root_module: ModuleInfo,
    pub modules: Vec<ModuleInfo>,
}

/// The authenticated user submitting a request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    pub name: String,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Actor { name: name.into() }
    }
}

/// Why a build was scheduled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildCause {
    /// Started by a user from the release form
    UserInitiated { user: String },
}

/// Outcome of a scheduling attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionResult {
    Accepted,
    /// A build is already queued or running
    Rejected,
}

/// Read-only lookup of project metadata
pub trait ModuleRegistry: Send + Sync {
    /// Look up a project by id
    fn project(&self, project_id: &str) -> Option<ProjectInfo>;

    /// All known project ids
    fn project_ids(&self) -> Vec<String>;
}

/// Decides whether an actor may release a project
pub trait PermissionCheck: Send + Sync {
    fn has_release_permission(&self, actor: &Actor, project_id: &str) -> bool;
}

/// Queues builds for execution
///
/// Implementations decide admission; the coordinator only guarantees that
/// calls for the same project never overlap. The project's release state is
/// write-locked for the duration of the call, so it must not be read from
/// the calling thread.
pub trait BuildScheduler: Send + Sync {
    fn schedule(
        &self,
        project_id: &str,
        cause: &BuildCause,
        quiet_period: Duration,
        request: &ReleaseRequest,
    ) -> AdmissionResult;
}

/// Build preparer that must be told the next build is a release
pub trait ReleaseWrapper: Send + Sync {
    fn enable_release(&self, project_id: &str);
}
