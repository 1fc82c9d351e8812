use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mvn_release::cli::orchestration::{preview_versions, run_submit, SubmitArgs};
use mvn_release::config;
use mvn_release::ui;
use mvn_release::ReleaseError;

#[derive(Parser)]
#[command(
    name = "mvn-release",
    version,
    about = "Validate and schedule Maven release builds"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List configured projects
    Projects,

    /// Show the release form defaults for a project
    Versions {
        #[arg(short, long)]
        project: String,
    },

    /// Submit a release request
    Submit {
        #[arg(short, long)]
        project: String,

        #[arg(short, long, help = "Submitting user (defaults to $USER)")]
        user: Option<String>,

        #[arg(
            short = 'P',
            long = "param",
            help = "Form parameter as key=value, or a bare flag name"
        )]
        params: Vec<String>,

        #[arg(long, help = "Treat the project as having a build already queued")]
        pending: bool,

        #[arg(short = 'y', long, help = "Skip confirmation prompt")]
        yes: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mvn_release=info".into());

    let log_format =
        std::env::var("MVN_RELEASE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Projects => {
            let ids: Vec<String> = config.projects.iter().map(|p| p.id.clone()).collect();
            if ids.is_empty() {
                ui::display_error("No projects configured in mvnrelease.toml");
                std::process::exit(1);
            }
            ui::display_projects(&ids);
        }
        Command::Versions { project } => {
            let (preview, warning) = preview_versions(&project, &config)?;
            if let Some(warning) = warning {
                ui::display_boundary_warning(&warning);
            }
            ui::display_version_preview(&preview);
        }
        Command::Submit {
            project,
            user,
            params,
            pending,
            yes,
        } => {
            let user = user
                .or_else(|| std::env::var("USER").ok())
                .unwrap_or_else(|| "anonymous".to_string());

            if !yes
                && !ui::confirm_action(&format!(
                    "Submit release of '{}' as '{}'?",
                    project, user
                ))?
            {
                println!("Release cancelled by user.");
                return Ok(());
            }

            ui::display_status(&format!(
                "Submitting release of '{}' as '{}'",
                project, user
            ));
            let submit = SubmitArgs {
                project,
                user,
                params,
                pending,
            };
            let result = match run_submit(&submit, &config) {
                Ok(result) => result,
                Err(e) => {
                    ui::display_error(&e.to_string());
                    let invalid_form = e
                        .downcast_ref::<ReleaseError>()
                        .is_some_and(ReleaseError::is_client_error);
                    std::process::exit(if invalid_form { 3 } else { 1 });
                }
            };

            for warning in &result.warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_outcome(&result.outcome);
            if result.outcome.is_accepted() {
                ui::display_env_snapshot(&result.state.to_env_vars());
            } else {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
