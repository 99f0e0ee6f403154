//! Filesystem view of an image repository
//!
//! ```text
//! <root>/
//!   .github/workflows/build.yml
//!   README.md
//!   30.2/Dockerfile
//!   30.2/alpine/Dockerfile
//!   master/Dockerfile
//!   deprecated/28.1/...
//!   scripts/
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ci::BuildDir;
use crate::config::{ALPINE_DIR, Config, DOCKERFILE};
use crate::repo::error::RepoError;
use crate::version::set::VersionSet;

pub struct Layout {
    root: PathBuf,
    config: Config,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of an active version directory
    pub fn active_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn deprecated_root(&self) -> PathBuf {
        self.root.join(&self.config.deprecated_dir)
    }

    /// Path of a deprecated version directory
    pub fn deprecated_path(&self, name: &str) -> PathBuf {
        self.deprecated_root().join(name)
    }

    pub fn workflow_path(&self) -> PathBuf {
        self.root.join(&self.config.workflow_path)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.config.readme_path)
    }

    /// List visible top-level directories, sorted by name.
    pub fn scan(&self) -> Result<Vec<BuildDir>, RepoError> {
        let mut dirs: Vec<BuildDir> = list_dir_names(&self.root)?
            .into_iter()
            .map(|name| {
                let path = self.root.join(&name);
                BuildDir {
                    has_dockerfile: path.join(DOCKERFILE).is_file(),
                    has_alpine_dockerfile: path.join(ALPINE_DIR).join(DOCKERFILE).is_file(),
                    name,
                }
            })
            .collect();

        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(dirs)
    }

    /// Names inside the deprecated storage directory; empty if it does not exist.
    pub fn deprecated_names(&self) -> Result<Vec<String>, RepoError> {
        let deprecated_root = self.deprecated_root();
        if !deprecated_root.is_dir() {
            return Ok(Vec::new());
        }
        list_dir_names(&deprecated_root)
    }

    /// Every active and deprecated version directory.
    pub fn version_set(&self) -> Result<VersionSet, RepoError> {
        let active = list_dir_names(&self.root)?;
        let deprecated = self.deprecated_names()?;
        Ok(VersionSet::discover(
            active,
            deprecated,
            &self.config.version_excluded(),
        ))
    }

    /// Active version directories that can be built, i.e. contain a Dockerfile.
    pub fn buildable_versions(&self) -> Result<VersionSet, RepoError> {
        let active = self
            .scan()?
            .into_iter()
            .filter(|d| d.has_dockerfile)
            .map(|d| d.name);
        Ok(VersionSet::discover(
            active,
            Vec::new(),
            &self.config.version_excluded(),
        ))
    }
}

/// Directory names directly under `dir`, hidden entries and files skipped
fn list_dir_names(dir: &Path) -> Result<Vec<String>, RepoError> {
    let entries = std::fs::read_dir(dir).map_err(RepoError::io(dir))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(RepoError::io(dir))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!("Skipping non UTF-8 directory name {:?}", path);
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    Ok(names)
}
