use mvn_release::boundary::BoundaryWarning;
use mvn_release::cli::orchestration::{build_workspace, preview_versions, run_submit, SubmitArgs};
use mvn_release::config::{load_config, Config};
use mvn_release::release::SubmissionOutcome;
use mvn_release::ReleaseError;

fn config() -> Config {
    load_config(Some(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/mvnrelease.toml"
    )))
    .expect("fixture should load")
}

fn args(user: &str, params: &[&str]) -> SubmitArgs {
    SubmitArgs {
        project: "core".to_string(),
        user: user.to_string(),
        params: params.iter().map(|p| p.to_string()).collect(),
        pending: false,
    }
}

#[test]
fn test_submit_args_creation() {
    let args = args("alice", &["releaseVersion=2.0.0"]);
    assert_eq!(args.project, "core");
    assert_eq!(args.params, vec!["releaseVersion=2.0.0"]);
    assert!(!args.pending);
}

#[test]
fn test_submit_scheduled_release() {
    let result = run_submit(
        &args(
            "alice",
            &[
                "releaseVersion=2.0.0",
                "developmentVersion=2.0.1-SNAPSHOT",
                "specifyScmTag",
                "scmTag=my-tag-2.0.0",
            ],
        ),
        &config(),
    )
    .expect("submission should succeed");

    assert_eq!(
        result.outcome,
        SubmissionOutcome::Accepted {
            redirect: "/jenkins/job/core/".to_string()
        }
    );
    assert!(result.state.is_release_build());
    assert_eq!(result.state.scm_tag(), Some("my-tag-2.0.0"));
    assert_eq!(
        result.queued.map(|r| r.release_version),
        Some("2.0.0".to_string())
    );
    assert!(result.warnings.is_empty());

    let env = result.state.to_env_vars();
    assert_eq!(env.get("MVN_RELEASE_REQUESTED_BY"), Some(&"alice".to_string()));
}

#[test]
fn test_submit_rejected_when_build_pending() {
    let mut submit = args(
        "bob",
        &["releaseVersion=2.0.0", "developmentVersion=2.0.1-SNAPSHOT"],
    );
    submit.pending = true;

    let result = run_submit(&submit, &config()).expect("rejection is not an error");
    assert_eq!(
        result.outcome.redirect(),
        "/jenkins/job/core/mvnrelease/failed"
    );
    assert!(!result.state.is_release_build());
    assert!(result.queued.is_none());
    assert_eq!(
        result.warnings,
        vec![BoundaryWarning::ReleaseAlreadyPending {
            project: "core".to_string()
        }]
    );
}

#[test]
fn test_submit_invalid_version_is_error() {
    let err = run_submit(
        &args("alice", &["releaseVersion=2.0.0", "developmentVersion=2.0.1"]),
        &config(),
    )
    .unwrap_err();

    let release_err = err
        .downcast_ref::<ReleaseError>()
        .expect("submission errors carry a ReleaseError");
    assert!(release_err.is_client_error());
    match release_err {
        ReleaseError::InvalidVersion { version } => assert_eq!(version, "2.0.1"),
        other => panic!("expected InvalidVersion, got {:?}", other),
    }
}

#[test]
fn test_submit_without_permission_is_error() {
    let err = run_submit(
        &args(
            "mallory",
            &["releaseVersion=2.0.0", "developmentVersion=2.0.1-SNAPSHOT"],
        ),
        &config(),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReleaseError>(),
        Some(ReleaseError::PermissionDenied { .. })
    ));
}

#[test]
fn test_preview_versions() {
    let (preview, warning) = preview_versions("core", &config()).unwrap();
    assert_eq!(preview.current_version, "2.0.0-SNAPSHOT");
    assert_eq!(preview.release_version, "2.0.0");
    assert_eq!(preview.next_version, "2.0.1-SNAPSHOT");
    assert_eq!(preview.repo_description, "Example Core:2.0.0");
    assert_eq!(preview.scm_tag, "example-core-2.0.0");
    assert!(warning.is_none());
}

#[test]
fn test_preview_degraded_version_warns() {
    let (preview, warning) = preview_versions("legacy", &config()).unwrap();
    assert_eq!(preview.release_version, "trunk");
    assert_eq!(preview.next_version, "NaN-SNAPSHOT");
    assert!(matches!(
        warning,
        Some(BoundaryWarning::UnparsableVersion { ref version, .. }) if version == "trunk-SNAPSHOT"
    ));
}

#[test]
fn test_preview_unknown_project() {
    let err = preview_versions("nope", &config()).unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[test]
fn test_workspace_carries_settings() {
    let workspace = build_workspace(&config());
    assert!(workspace.coordinator.settings().select_custom_scm_comment_prefix);
    assert!(workspace.coordinator.settings().select_append_user_name);
    assert_eq!(
        workspace.coordinator.modules("core").unwrap()[0].artifact_id,
        "example-core-api"
    );
    assert_eq!(workspace.wrapper.enabled_count("core"), 0);
}
