//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here are pure (no I/O side effects beyond printing) and testable.

use crate::boundary::BoundaryWarning;
use crate::release::SubmissionOutcome;
use console::style;
use std::collections::HashMap;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
///
/// # Arguments
/// * `warning` - The boundary warning to display
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display configured projects.
pub fn display_projects(projects: &[String]) {
    println!("{}", style("Configured projects:").bold());
    for project in projects {
        println!("  - {}", project);
    }
}

/// Defaults shown on the release form for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPreview {
    pub project: String,
    pub current_version: String,
    pub release_version: String,
    pub next_version: String,
    pub repo_description: String,
    pub scm_tag: String,
}

/// Display the release form defaults for a project.
pub fn display_version_preview(preview: &VersionPreview) {
    println!(
        "\n{}",
        style(format!("Release defaults for '{}'", preview.project)).bold()
    );
    println!("  Current version:     {}", preview.current_version);
    println!(
        "  Release version:     {}",
        style(&preview.release_version).green()
    );
    println!("  Development version: {}", preview.next_version);
    println!("  Repo description:    {}", preview.repo_description);
    println!("  SCM tag:             {}", preview.scm_tag);
}

/// Display the outcome of a submission and where the user would be redirected.
pub fn display_outcome(outcome: &SubmissionOutcome) {
    match outcome {
        SubmissionOutcome::Accepted { redirect } => {
            display_success("Release build scheduled");
            println!("  Redirect: {}", style(redirect).cyan());
        }
        SubmissionOutcome::Rejected { redirect } => {
            display_error("Release build was not scheduled");
            println!("  Redirect: {}", style(redirect).cyan());
        }
    }
}

/// Render downstream environment variables as sorted "KEY=value" lines.
///
/// Values of password variables are masked.
pub fn format_env_snapshot(env: &HashMap<String, String>) -> Vec<String> {
    let mut lines: Vec<String> = env
        .iter()
        .map(|(key, value)| {
            if key.ends_with("PASSWORD") {
                format!("{}=********", key)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect();
    lines.sort();
    lines
}

/// Display downstream environment variables.
pub fn display_env_snapshot(env: &HashMap<String, String>) {
    println!("\n{}", style("Release parameters:").bold());
    for line in format_env_snapshot(env) {
        println!("  {}", line);
    }
}
