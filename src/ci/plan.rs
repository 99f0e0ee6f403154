//! Build matrix selection and push authorization
//!
//! Given the git ref a workflow runs for, decide which image directories to
//! build and whether the resulting images may be pushed:
//! - `refs/tags/v30.2` builds `30.2` and pushes it
//! - any other ref builds every directory with a Dockerfile and pushes nothing
//! - an explicit version overrides the ref for both decisions; an empty one
//!   counts as not given

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::ci::Variant;

const TAG_REF_PREFIX: &str = "refs/tags/v";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Directory '{name}' does not exist")]
    DirectoryNotFound { name: String },

    #[error("Directory '{name}' does not exist for tag")]
    TagDirectoryNotFound { name: String },
}

/// The git ref a workflow was triggered for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTrigger {
    /// A pushed `v<version>` tag, holding the text after the `v`
    Tag(String),
    /// A branch or any other ref
    Other(String),
}

impl RefTrigger {
    pub fn parse(git_ref: &str) -> Self {
        match git_ref.strip_prefix(TAG_REF_PREFIX) {
            Some(version) => RefTrigger::Tag(version.to_string()),
            None => RefTrigger::Other(git_ref.to_string()),
        }
    }
}

/// Unset workflow inputs arrive as empty strings
fn given(explicit_version: Option<&str>) -> Option<&str> {
    explicit_version.filter(|version| !version.is_empty())
}

/// A top-level directory of the repository as seen by the planner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDir {
    pub name: String,
    /// `<name>/Dockerfile` exists
    pub has_dockerfile: bool,
    /// `<name>/alpine/Dockerfile` exists
    pub has_alpine_dockerfile: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub version: String,
    pub variant: Variant,
}

/// Matrix in the shape GitHub Actions expects for `strategy.matrix`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildMatrix {
    pub include: Vec<MatrixEntry>,
}

impl BuildMatrix {
    /// Compact JSON, e.g. `{"include":[{"version":"30.2","variant":"debian"}]}`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Select the directories to build.
///
/// `dirs` lists every non-hidden top-level directory; `excluded` names the
/// directories never built when the whole tree is selected.
pub fn plan<E: AsRef<str>>(
    trigger: &RefTrigger,
    explicit_version: Option<&str>,
    dirs: &[BuildDir],
    excluded: &[E],
) -> Result<BuildMatrix, PlanError> {
    let find = |name: &str| dirs.iter().find(|d| d.name == name);

    let mut selected: Vec<&BuildDir> = if let Some(version) = given(explicit_version) {
        let dir = find(version).ok_or_else(|| PlanError::DirectoryNotFound {
            name: version.to_string(),
        })?;
        vec![dir]
    } else if let RefTrigger::Tag(version) = trigger {
        let dir = find(version).ok_or_else(|| PlanError::TagDirectoryNotFound {
            name: version.clone(),
        })?;
        vec![dir]
    } else {
        dirs.iter()
            .filter(|d| d.has_dockerfile)
            .filter(|d| !excluded.iter().any(|e| e.as_ref() == d.name))
            .collect()
    };

    selected.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(
        "Selected directories: {:?}",
        selected.iter().map(|d| d.name.as_str()).collect::<Vec<_>>()
    );

    let include = selected
        .into_iter()
        .flat_map(|dir| {
            let standard = MatrixEntry {
                version: dir.name.clone(),
                variant: Variant::Standard,
            };
            let alpine = dir.has_alpine_dockerfile.then(|| MatrixEntry {
                version: dir.name.clone(),
                variant: Variant::Alpine,
            });
            std::iter::once(standard).chain(alpine)
        })
        .collect();

    Ok(BuildMatrix { include })
}

/// Whether images built for this trigger may be pushed.
///
/// The rolling build directory `rolling_dir` is never pushed, and branch refs
/// never push.
pub fn should_push(
    trigger: &RefTrigger,
    explicit_version: Option<&str>,
    rolling_dir: &str,
) -> bool {
    match (given(explicit_version), trigger) {
        (Some(version), _) => version != rolling_dir,
        (None, RefTrigger::Tag(version)) => version != rolling_dir,
        (None, RefTrigger::Other(_)) => false,
    }
}
