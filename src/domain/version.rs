//! Maven-style module version arithmetic
//!
//! Derives the release version and the next development (snapshot) version
//! from a module's current version string.

use crate::boundary::BoundaryWarning;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Qualifier carried by development versions
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Next development version reported when the current version cannot be parsed
pub const UNKNOWN_NEXT_VERSION: &str = "NaN-SNAPSHOT";

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // digits(.digits)* [sep? letters [sep? digits]]
        Regex::new(r"^(\d+(?:\.\d+)*)(?:([-_]?)([A-Za-z]+)(?:([-_.]?)(\d+))?)?$")
            .expect("version pattern is a valid regex")
    })
}

/// A numeric version component, keeping its textual width so "01" bumps to "02"
#[derive(Debug, Clone, PartialEq, Eq)]
struct Component {
    value: u64,
    width: usize,
}

impl Component {
    fn parse(text: &str) -> Result<Self> {
        let value = text
            .parse::<u64>()
            .map_err(|_| ReleaseError::version(format!("Invalid version component: {}", text)))?;
        Ok(Component {
            value,
            width: text.len(),
        })
    }

    fn bump(&self) -> Result<Self> {
        let value = self.value.checked_add(1).ok_or_else(|| {
            ReleaseError::version(format!("Version component overflow: {}", self.value))
        })?;
        Ok(Component {
            value,
            width: self.width,
        })
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.width)
    }
}

/// Textual annotation such as "-beta" followed by an optional revision ("-2")
#[derive(Debug, Clone, PartialEq, Eq)]
struct Annotation {
    separator: String,
    name: String,
    revision: Option<(String, Component)>,
}

/// Structured form of a version string matching the Maven numbering grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    digits: Vec<Component>,
    annotation: Option<Annotation>,
    snapshot: bool,
}

impl ParsedVersion {
    /// Parse a version such as "1.2.3", "1.0-SNAPSHOT" or "2.1-beta-3-SNAPSHOT"
    pub fn parse(version: &str) -> Result<Self> {
        let (base, snapshot) = match version.strip_suffix(SNAPSHOT_SUFFIX) {
            Some(base) => (base, true),
            None => (version, false),
        };

        let caps = version_pattern().captures(base).ok_or_else(|| {
            ReleaseError::version(format!(
                "Invalid version format: '{}' - expected digits separated by '.'",
                version
            ))
        })?;

        let digits = caps[1]
            .split('.')
            .map(Component::parse)
            .collect::<Result<Vec<_>>>()?;

        let annotation = match (caps.get(2), caps.get(3)) {
            (Some(separator), Some(name)) => {
                let revision = match caps.get(5) {
                    Some(rev) => Some((
                        caps.get(4).map_or("", |m| m.as_str()).to_string(),
                        Component::parse(rev.as_str())?,
                    )),
                    None => None,
                };
                Some(Annotation {
                    separator: separator.as_str().to_string(),
                    name: name.as_str().to_string(),
                    revision,
                })
            }
            _ => None,
        };

        Ok(ParsedVersion {
            digits,
            annotation,
            snapshot,
        })
    }

    /// The same version without the snapshot qualifier
    pub fn release(&self) -> Self {
        ParsedVersion {
            snapshot: false,
            ..self.clone()
        }
    }

    /// Next development version: lowest numeric component bumped, snapshot qualifier set
    ///
    /// The annotation revision is the lowest component when present,
    /// otherwise the last dotted number.
    pub fn next_snapshot(&self) -> Result<Self> {
        let mut next = self.clone();
        next.snapshot = true;

        match next.annotation.as_mut().and_then(|a| a.revision.as_mut()) {
            Some((_, revision)) => *revision = revision.bump()?,
            None => {
                let last = next
                    .digits
                    .last_mut()
                    .ok_or_else(|| ReleaseError::version("Version has no numeric component"))?;
                *last = last.bump()?;
            }
        }

        Ok(next)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: Vec<String> = self.digits.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", digits.join("."))?;
        if let Some(annotation) = &self.annotation {
            write!(f, "{}{}", annotation.separator, annotation.name)?;
            if let Some((separator, revision)) = &annotation.revision {
                write!(f, "{}{}", separator, revision)?;
            }
        }
        if self.snapshot {
            write!(f, "{}", SNAPSHOT_SUFFIX)?;
        }
        Ok(())
    }
}

/// Version information for a module, derived on demand from its raw version
///
/// Never fails: an unparseable version degrades to a text-replaced release
/// version and [`UNKNOWN_NEXT_VERSION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVersionInfo {
    raw_version: String,
}

impl ModuleVersionInfo {
    pub fn new(raw_version: impl Into<String>) -> Self {
        ModuleVersionInfo {
            raw_version: raw_version.into(),
        }
    }

    pub fn raw_version(&self) -> &str {
        &self.raw_version
    }

    /// Strict parse of the raw version
    pub fn parse(&self) -> Result<ParsedVersion> {
        ParsedVersion::parse(&self.raw_version)
    }

    /// Release version, e.g. "1.2.3-SNAPSHOT" -> "1.2.3"
    pub fn release_version(&self) -> String {
        match self.parse() {
            Ok(parsed) => parsed.release().to_string(),
            Err(e) => {
                tracing::warn!(version = %self.raw_version, error = %e, "Failed to compute release version.");
                self.raw_version.replace(SNAPSHOT_SUFFIX, "")
            }
        }
    }

    /// Next development version, e.g. "1.2.3-SNAPSHOT" -> "1.2.4-SNAPSHOT"
    pub fn next_development_version(&self) -> String {
        match self.parse().and_then(|parsed| parsed.next_snapshot()) {
            Ok(next) => next.to_string(),
            Err(e) => {
                tracing::warn!(version = %self.raw_version, error = %e, "Failed to compute next version.");
                UNKNOWN_NEXT_VERSION.to_string()
            }
        }
    }

    /// Warning describing why derivation degraded, if it did
    pub fn degradation(&self) -> Option<BoundaryWarning> {
        self.parse()
            .and_then(|parsed| parsed.next_snapshot())
            .err()
            .map(|e| BoundaryWarning::UnparsableVersion {
                version: self.raw_version.clone(),
                reason: e.to_string(),
            })
    }
}
