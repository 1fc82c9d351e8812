//! Release submission: admission, state, and permalinks

pub mod coordinator;
pub mod permalink;
pub mod state;

pub use coordinator::{ReleaseCoordinator, SubmissionOutcome};
pub use permalink::{Permalink, PERMALINKS};
pub use state::ReleaseState;
