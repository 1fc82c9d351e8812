use thiserror::Error;

/// Unified error type for release submissions
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("User '{actor}' is not allowed to release project '{project}'")]
    PermissionDenied { actor: String, project: String },

    #[error("Malformed release request: {0}")]
    MalformedRequest(String),

    #[error("Developer Version ({version}) is not a valid version (it must end with \"-SNAPSHOT\")")]
    InvalidVersion { version: String },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Unknown project: {0}")]
    UnknownProject(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in mvn-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a permission error for an actor and project
    pub fn permission_denied(actor: impl Into<String>, project: impl Into<String>) -> Self {
        ReleaseError::PermissionDenied {
            actor: actor.into(),
            project: project.into(),
        }
    }

    /// Create a malformed request error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        ReleaseError::MalformedRequest(msg.into())
    }

    /// Create an invalid development version error carrying the offending value
    pub fn invalid_version(version: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a version parsing error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create an unknown project error
    pub fn unknown_project(project: impl Into<String>) -> Self {
        ReleaseError::UnknownProject(project.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// True for errors caused by the submitted form rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ReleaseError::MalformedRequest(_) | ReleaseError::InvalidVersion { .. }
        )
    }
}
