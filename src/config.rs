use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::repo::error::RepoError;

// =============================================================================
// Repository layout constants
// =============================================================================

/// Image repository tags are published under
pub const DEFAULT_IMAGE_REPOSITORY: &str = "bitcoin/bitcoin";

/// Directory holding versions that are no longer built
pub const DEPRECATED_DIR: &str = "deprecated";

/// Unversioned rolling build directory
pub const MASTER_DIR: &str = "master";

/// Tooling directory living next to the version directories
pub const SCRIPTS_DIR: &str = "scripts";

/// Marks the repository root
pub const GITHUB_DIR: &str = ".github";

/// Buildable marker file of a version directory
pub const DOCKERFILE: &str = "Dockerfile";

/// Subdirectory of a version holding the alpine variant
pub const ALPINE_DIR: &str = "alpine";

pub const WORKFLOW_PATH: &str = ".github/workflows/build.yml";

pub const README_PATH: &str = "README.md";

/// Prefix of the Dockerfile links in the README tag list
pub const DEFAULT_README_LINK_BASE: &str =
    "https://github.com/willcl-ark/bitcoin-core-docker/blob/master/";

/// Tool configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Docker image repository, e.g. `bitcoin/bitcoin`
    pub image_repository: String,
    pub deprecated_dir: String,
    pub master_dir: String,
    /// Directories that are neither versions nor the rolling build
    pub tooling_dirs: Vec<String>,
    /// Workflow file, relative to the repository root
    pub workflow_path: PathBuf,
    /// README file, relative to the repository root
    pub readme_path: PathBuf,
    pub readme_link_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_repository: DEFAULT_IMAGE_REPOSITORY.to_string(),
            deprecated_dir: DEPRECATED_DIR.to_string(),
            master_dir: MASTER_DIR.to_string(),
            tooling_dirs: vec![SCRIPTS_DIR.to_string()],
            workflow_path: PathBuf::from(WORKFLOW_PATH),
            readme_path: PathBuf::from(README_PATH),
            readme_link_base: DEFAULT_README_LINK_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, or use defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, RepoError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| RepoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RepoError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Directories never built when the whole tree is selected
    pub fn build_excluded(&self) -> Vec<String> {
        let mut excluded = vec![self.deprecated_dir.clone()];
        excluded.extend(self.tooling_dirs.iter().cloned());
        excluded
    }

    /// Directories that never count as versions
    pub fn version_excluded(&self) -> Vec<String> {
        let mut excluded = self.build_excluded();
        excluded.push(self.master_dir.clone());
        excluded
    }
}

/// Returns the repository root.
/// Uses the explicit root if given, otherwise the nearest ancestor of
/// `start` that contains a `.github` directory.
pub fn resolve_repo_root(explicit: Option<PathBuf>, start: &Path) -> Result<PathBuf, RepoError> {
    match explicit {
        Some(root) => Ok(root),
        None => find_repo_root(start).ok_or_else(|| RepoError::RepoRootNotFound {
            start: start.to_path_buf(),
        }),
    }
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(GITHUB_DIR).is_dir())
        .map(Path::to_path_buf)
}
