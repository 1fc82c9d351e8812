//! Domain logic - pure release rules independent of any collaborator

pub mod params;
pub mod request;
pub mod validation;
pub mod version;

pub use params::FormParams;
pub use request::ReleaseRequest;
pub use validation::validate_development_version;
pub use version::{ModuleVersionInfo, ParsedVersion, SNAPSHOT_SUFFIX, UNKNOWN_NEXT_VERSION};
