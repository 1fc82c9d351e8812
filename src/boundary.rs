use std::fmt;

/// Non-fatal conditions met while preparing or submitting a release.
/// These are reported to the operator but never abort the flow that found them.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Project version cannot be parsed; derived versions are degraded
    UnparsableVersion { version: String, reason: String },
    /// Scheduler declined the build, usually because one is already queued or running
    ReleaseAlreadyPending { project: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableVersion { version, reason } => {
                write!(
                    f,
                    "Cannot parse version '{}': {} (next development version unavailable)",
                    version, reason
                )
            }
            BoundaryWarning::ReleaseAlreadyPending { project } => {
                write!(
                    f,
                    "A build of project '{}' is already queued or running; release not scheduled",
                    project
                )
            }
        }
    }
}
