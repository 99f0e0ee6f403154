//! Add, deprecate and list version directories
//!
//! Adding a version copies an existing version directory, points its
//! Dockerfiles at the new version and makes it the only workflow matrix entry.
//! When the copied version shares the major of the new one it is deprecated
//! at the same time, so each major keeps a single active directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{ALPINE_DIR, DOCKERFILE};
use crate::repo::error::RepoError;
use crate::repo::layout::Layout;
use crate::repo::rewrite::{
    add_version_to_workflow, remove_version_from_workflow, render_readme_tags,
    replace_readme_tags, update_dockerfile_version,
};
use crate::version::value::Version;

/// Result of [`VersionManager::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub version: String,
    pub source: String,
    pub target_dir: PathBuf,
    /// The source version was moved to the deprecated directory
    pub auto_deprecated: bool,
}

/// Result of [`VersionManager::deprecate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecateOutcome {
    pub version: String,
    /// The deprecated version was the latest stable one
    pub was_latest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedVersion {
    pub name: String,
    pub is_latest: bool,
    pub is_release_candidate: bool,
}

pub struct VersionManager {
    layout: Layout,
}

impl VersionManager {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Add a new version, copying from `from_version` or, when not given, from
    /// the active version of the same major or the latest version.
    pub fn add(&self, version: &str, from_version: Option<&str>) -> Result<AddOutcome, RepoError> {
        let new_version = Version::parse(version)?;

        if self.layout.active_path(version).exists() || self.layout.deprecated_path(version).exists()
        {
            return Err(RepoError::VersionAlreadyExists(version.to_string()));
        }

        let (source_name, source_version, source_dir) = match from_version {
            Some(from) => {
                let from_parsed = Version::parse(from)?;
                let active = self.layout.active_path(from);
                let source_dir = if active.exists() {
                    active
                } else {
                    self.layout.deprecated_path(from)
                };
                if !source_dir.exists() {
                    return Err(RepoError::SourceNotFound(from.to_string()));
                }
                (from.to_string(), from_parsed, source_dir)
            }
            None => {
                let versions = self.layout.version_set()?;
                let source = versions
                    .for_major(new_version.major)
                    .or_else(|| versions.latest())
                    .ok_or(RepoError::NoSourceVersion)?;
                (
                    source.name.clone(),
                    source.version,
                    self.layout.active_path(&source.name),
                )
            }
        };

        let target_dir = self.layout.active_path(version);
        let source_is_active = source_dir.parent() == Some(self.layout.root());
        let auto_deprecate = source_version.major == new_version.major && source_is_active;

        info!("Adding version {} (copying from {})", version, source_name);
        if auto_deprecate {
            info!("Will auto-deprecate {} (same major version)", source_name);
        }

        // Nothing is copied unless the workflow and README can be edited
        let workflow_path = self.layout.workflow_path();
        let workflow = read_file(&workflow_path)?;
        read_file(&self.layout.readme_path())?;

        info!("Copying {:?} -> {:?}", source_dir, target_dir);
        if let Err(e) = populate_version_dir(&source_dir, &target_dir, &source_name, version) {
            if let Err(cleanup) = fs::remove_dir_all(&target_dir) {
                warn!("Failed to remove {:?}: {}", target_dir, cleanup);
            }
            return Err(e);
        }

        info!("Updating {:?}", self.layout.config().workflow_path);
        fs::write(&workflow_path, add_version_to_workflow(&workflow, version))
            .map_err(RepoError::io(&workflow_path))?;

        if auto_deprecate {
            info!("Auto-deprecating {}", source_name);
            self.move_to_deprecated(&source_name)?;
        }

        self.update_readme()?;

        Ok(AddOutcome {
            version: version.to_string(),
            source: source_name,
            target_dir,
            auto_deprecated: auto_deprecate,
        })
    }

    /// Move an active version into the deprecated directory.
    pub fn deprecate(&self, version: &str) -> Result<DeprecateOutcome, RepoError> {
        let parsed = Version::parse(version)?;

        if !self.layout.active_path(version).exists() {
            return Err(RepoError::VersionNotFound(version.to_string()));
        }
        if self.layout.deprecated_path(version).exists() {
            return Err(RepoError::AlreadyDeprecated(
                version.to_string(),
                self.layout.config().deprecated_dir.clone(),
            ));
        }

        read_file(&self.layout.workflow_path())?;
        read_file(&self.layout.readme_path())?;

        let was_latest = self.layout.version_set()?.is_latest(&parsed);
        if was_latest {
            warn!(
                "Deprecating the 'latest' version ({}); the next highest version will become 'latest'",
                version
            );
        }

        info!("Deprecating version {}", version);
        self.move_to_deprecated(version)?;
        self.update_readme()?;

        Ok(DeprecateOutcome {
            version: version.to_string(),
            was_latest,
        })
    }

    /// Active versions in ascending order.
    pub fn list(&self) -> Result<Vec<ListedVersion>, RepoError> {
        let versions = self.layout.version_set()?;
        Ok(versions
            .active()
            .iter()
            .map(|dir| ListedVersion {
                name: dir.name.clone(),
                is_latest: versions.is_latest(&dir.version),
                is_release_candidate: dir.version.is_release_candidate(),
            })
            .collect())
    }

    fn move_to_deprecated(&self, version: &str) -> Result<(), RepoError> {
        let source = self.layout.active_path(version);
        let target = self.layout.deprecated_path(version);

        let deprecated_root = self.layout.deprecated_root();
        fs::create_dir_all(&deprecated_root).map_err(RepoError::io(&deprecated_root))?;
        info!("Moving {:?} -> {:?}", source, target);
        fs::rename(&source, &target).map_err(RepoError::io(&source))?;

        edit_file(&self.layout.workflow_path(), |content| {
            remove_version_from_workflow(content, version)
        })
    }

    fn update_readme(&self) -> Result<(), RepoError> {
        let versions = self.layout.version_set()?;
        let latest = versions.latest().map(|d| d.version);
        let section = render_readme_tags(
            versions.active(),
            latest.as_ref(),
            &self.layout.config().readme_link_base,
        );

        info!("Updating {:?}", self.layout.config().readme_path);
        edit_file(&self.layout.readme_path(), |content| {
            replace_readme_tags(content, &section)
        })
    }
}

fn read_file(path: &Path) -> Result<String, RepoError> {
    fs::read_to_string(path).map_err(RepoError::io(path))
}

fn edit_file(path: &Path, edit: impl FnOnce(&str) -> String) -> Result<(), RepoError> {
    let content = read_file(path)?;
    fs::write(path, edit(&content)).map_err(RepoError::io(path))
}

/// Copy the source version and point its Dockerfiles at the new version
fn populate_version_dir(
    source_dir: &Path,
    target_dir: &Path,
    source_version: &str,
    new_version: &str,
) -> Result<(), RepoError> {
    copy_dir_all(source_dir, target_dir)?;

    for dockerfile in [
        target_dir.join(DOCKERFILE),
        target_dir.join(ALPINE_DIR).join(DOCKERFILE),
    ] {
        if dockerfile.is_file() {
            edit_file(&dockerfile, |content| {
                update_dockerfile_version(content, source_version, new_version)
            })?;
        }
    }
    Ok(())
}

fn copy_dir_all(source: &Path, target: &Path) -> Result<(), RepoError> {
    fs::create_dir_all(target).map_err(RepoError::io(target))?;
    for entry in fs::read_dir(source).map_err(RepoError::io(source))? {
        let entry = entry.map_err(RepoError::io(source))?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if from.is_dir() {
            copy_dir_all(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(RepoError::io(&from))?;
        }
    }
    Ok(())
}
