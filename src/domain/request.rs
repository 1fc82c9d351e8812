use crate::domain::params::FormParams;
use crate::error::{ReleaseError, Result};
use serde::Serialize;

/// Form keys understood by the release submission
pub mod keys {
    pub const RELEASE_VERSION: &str = "releaseVersion";
    pub const DEVELOPMENT_VERSION: &str = "developmentVersion";
    pub const APPEND_BUILD_NUMBER: &str = "appendHudsonBuildNumber";
    pub const CLOSE_STAGING_REPO: &str = "closeNexusStage";
    pub const REPO_DESCRIPTION: &str = "repoDescription";
    pub const SPECIFY_SCM_CREDENTIALS: &str = "specifyScmCredentials";
    pub const SCM_USERNAME: &str = "scmUsername";
    pub const SCM_PASSWORD: &str = "scmPassword";
    pub const SPECIFY_SCM_COMMENT_PREFIX: &str = "specifyScmCommentPrefix";
    pub const SCM_COMMENT_PREFIX: &str = "scmCommentPrefix";
    pub const APPEND_USER_NAME: &str = "appendHudsonUserName";
    pub const SPECIFY_SCM_TAG: &str = "specifyScmTag";
    pub const SCM_TAG: &str = "scmTag";
}

/// A release request assembled from one form submission
///
/// Optional fields are `None` when their "specify" flag was not submitted,
/// which is distinct from an explicitly submitted empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRequest {
    pub release_version: String,
    pub development_version: String,
    pub append_build_number: bool,
    pub close_staging_repo: bool,
    pub repo_description: Option<String>,
    pub scm_username: Option<String>,
    #[serde(skip_serializing)]
    pub scm_password: Option<String>,
    pub scm_comment_prefix: Option<String>,
    pub append_username_to_comment: bool,
    pub scm_tag: Option<String>,
    pub requested_by: String,
}

impl ReleaseRequest {
    /// Extract a request from submitted form parameters
    ///
    /// Fails with `MalformedRequest` when a required value is missing or a
    /// "specify" flag is set without its companion value.
    pub fn from_params(params: &FormParams, requested_by: impl Into<String>) -> Result<Self> {
        let release_version = required(params, keys::RELEASE_VERSION)?;
        let development_version = required(params, keys::DEVELOPMENT_VERSION)?;

        let close_staging_repo = params.contains(keys::CLOSE_STAGING_REPO);
        let specify_comment_prefix = params.contains(keys::SPECIFY_SCM_COMMENT_PREFIX);

        Ok(ReleaseRequest {
            release_version,
            development_version,
            append_build_number: params.contains(keys::APPEND_BUILD_NUMBER),
            close_staging_repo,
            repo_description: gated(params, keys::CLOSE_STAGING_REPO, keys::REPO_DESCRIPTION)?,
            scm_username: gated(params, keys::SPECIFY_SCM_CREDENTIALS, keys::SCM_USERNAME)?,
            scm_password: gated(params, keys::SPECIFY_SCM_CREDENTIALS, keys::SCM_PASSWORD)?,
            scm_comment_prefix: gated(
                params,
                keys::SPECIFY_SCM_COMMENT_PREFIX,
                keys::SCM_COMMENT_PREFIX,
            )?,
            append_username_to_comment: specify_comment_prefix
                && params.contains(keys::APPEND_USER_NAME),
            scm_tag: gated(params, keys::SPECIFY_SCM_TAG, keys::SCM_TAG)?,
            requested_by: requested_by.into(),
        })
    }
}

fn required(params: &FormParams, key: &str) -> Result<String> {
    params
        .first(key)
        .map(str::to_string)
        .ok_or_else(|| ReleaseError::malformed(format!("missing required parameter '{}'", key)))
}

fn gated(params: &FormParams, flag: &str, key: &str) -> Result<Option<String>> {
    if !params.contains(flag) {
        return Ok(None);
    }
    params.first(key).map(|v| Some(v.to_string())).ok_or_else(|| {
        ReleaseError::malformed(format!(
            "parameter '{}' is required when '{}' is set",
            key, flag
        ))
    })
}
