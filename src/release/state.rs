use crate::domain::ReleaseRequest;
use serde::Serialize;
use std::collections::HashMap;

/// Last accepted release request of a project
///
/// Starts empty. Replaced as a whole on each accepted submission and never
/// cleared afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseState {
    is_release_build: bool,
    request: Option<ReleaseRequest>,
}

impl ReleaseState {
    /// State after a request was admitted
    pub(crate) fn accepted(request: ReleaseRequest) -> Self {
        ReleaseState {
            is_release_build: true,
            request: Some(request),
        }
    }

    pub fn is_release_build(&self) -> bool {
        self.is_release_build
    }

    pub fn request(&self) -> Option<&ReleaseRequest> {
        self.request.as_ref()
    }

    pub fn release_version(&self) -> Option<&str> {
        self.request.as_ref().map(|r| r.release_version.as_str())
    }

    pub fn development_version(&self) -> Option<&str> {
        self.request.as_ref().map(|r| r.development_version.as_str())
    }

    pub fn scm_tag(&self) -> Option<&str> {
        self.request.as_ref().and_then(|r| r.scm_tag.as_deref())
    }

    pub fn requested_by(&self) -> Option<&str> {
        self.request.as_ref().map(|r| r.requested_by.as_str())
    }

    /// Export the accepted request for the downstream build
    ///
    /// Maps fields to MVN_RELEASE_* environment variables. Optional fields
    /// are omitted when not specified; flags are "true"/"false". Empty when
    /// no release was accepted yet.
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        let Some(req) = &self.request else {
            return env;
        };

        env.insert(
            "MVN_RELEASE_IS_RELEASE_BUILD".to_string(),
            self.is_release_build.to_string(),
        );
        env.insert(
            "MVN_RELEASE_VERSION".to_string(),
            req.release_version.clone(),
        );
        env.insert(
            "MVN_RELEASE_DEV_VERSION".to_string(),
            req.development_version.clone(),
        );
        env.insert(
            "MVN_RELEASE_APPEND_BUILD_NUMBER".to_string(),
            req.append_build_number.to_string(),
        );
        env.insert(
            "MVN_RELEASE_CLOSE_STAGING_REPO".to_string(),
            req.close_staging_repo.to_string(),
        );
        env.insert(
            "MVN_RELEASE_APPEND_USER_NAME".to_string(),
            req.append_username_to_comment.to_string(),
        );
        env.insert(
            "MVN_RELEASE_REQUESTED_BY".to_string(),
            req.requested_by.clone(),
        );

        let optional = [
            ("MVN_RELEASE_REPO_DESCRIPTION", &req.repo_description),
            ("MVN_RELEASE_SCM_USERNAME", &req.scm_username),
            ("MVN_RELEASE_SCM_PASSWORD", &req.scm_password),
            ("MVN_RELEASE_SCM_COMMENT_PREFIX", &req.scm_comment_prefix),
            ("MVN_RELEASE_SCM_TAG", &req.scm_tag),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                env.insert(key.to_string(), value.clone());
            }
        }

        env
    }
}
