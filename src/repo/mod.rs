//! Repository maintenance layer
//!
//! This module touches the filesystem: it lists the image directories for the
//! planner and performs the add/deprecate workflows that copy directories and
//! rewrite the workflow file and README.
//!
//! # Modules
//!
//! - [`layout`]: Lists top-level directories and their Dockerfiles
//! - [`manager`]: Add, deprecate and list workflows
//! - [`rewrite`]: Regex based edits of Dockerfiles, workflow and README
//! - [`error`]: Error type for repository operations

pub mod error;
pub mod layout;
pub mod manager;
pub mod rewrite;

pub use error::RepoError;
pub use layout::Layout;
pub use manager::{AddOutcome, DeprecateOutcome, ListedVersion, VersionManager};
