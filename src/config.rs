use crate::error::{ReleaseError, Result};
use crate::project::{AllowList, InMemoryRegistry, ModuleInfo, ProjectInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "mvnrelease.toml";

/// Represents the complete configuration for mvn-release.
///
/// Contains the server context path, release form defaults, and the projects that can be released.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub context_path: String,

    #[serde(default)]
    pub action: ActionSettings,

    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

/// Defaults for the optional sections of the release form.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct ActionSettings {
    #[serde(default)]
    pub select_custom_scm_comment_prefix: bool,

    #[serde(default)]
    pub select_append_user_name: bool,
}

/// One releasable project.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Project URL relative to the context path; defaults to "job/<id>/"
    #[serde(default)]
    pub url: Option<String>,

    pub root_module: ModuleInfo,

    #[serde(default)]
    pub modules: Vec<ModuleInfo>,

    /// Users allowed to trigger a release
    #[serde(default)]
    pub release_users: Vec<String>,
}

impl ProjectConfig {
    pub fn to_project_info(&self) -> ProjectInfo {
        ProjectInfo {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_else(|| self.id.clone()),
            url: self
                .url
                .clone()
                .unwrap_or_else(|| format!("job/{}/", self.id)),
            root_module: self.root_module.clone(),
            modules: self.modules.clone(),
        }
    }
}

impl Config {
    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            if project.id.trim().is_empty() {
                return Err(ReleaseError::config("project id must not be empty"));
            }
            if !seen.insert(project.id.as_str()) {
                return Err(ReleaseError::config(format!(
                    "duplicate project id '{}'",
                    project.id
                )));
            }
            if project.root_module.artifact_id.trim().is_empty() {
                return Err(ReleaseError::config(format!(
                    "project '{}' has an empty root module artifact_id",
                    project.id
                )));
            }
        }
        Ok(())
    }

    pub fn project(&self, id: &str) -> Option<&ProjectConfig> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Build an in-memory registry holding every configured project
    pub fn registry(&self) -> InMemoryRegistry {
        let registry = InMemoryRegistry::new();
        for project in &self.projects {
            registry.add_project(project.to_project_info());
        }
        registry
    }

    /// Build the release permission list from `release_users`
    pub fn allow_list(&self) -> AllowList {
        let mut allow = AllowList::new();
        for project in &self.projects {
            for user in &project.release_users {
                allow.allow(project.id.clone(), user.clone());
            }
        }
        allow
    }
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `mvnrelease.toml` in current directory
/// 3. `~/.config/.mvnrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
