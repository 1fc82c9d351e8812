use crate::domain::version::SNAPSHOT_SUFFIX;
use crate::error::{ReleaseError, Result};

/// Enforce that a development version is a snapshot version
///
/// # Returns
/// * `Ok(())` - The version ends with "-SNAPSHOT"
/// * `Err(InvalidVersion)` - Otherwise, carrying the offending version
pub fn validate_development_version(version: &str) -> Result<()> {
    if version.ends_with(SNAPSHOT_SUFFIX) {
        Ok(())
    } else {
        Err(ReleaseError::invalid_version(version))
    }
}
