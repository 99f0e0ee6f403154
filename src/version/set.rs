//! Known versions of the repository, split into active and deprecated

use tracing::debug;

use crate::version::value::Version;

/// A version together with the directory name it was discovered under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDir {
    pub version: Version,
    pub name: String,
}

/// Parse directory names into versions, sorted ascending.
///
/// Names listed in `excluded` and names that are not versions are skipped;
/// other directories are allowed to live next to the version directories.
pub fn discover<I, S, E>(names: I, excluded: &[E]) -> Vec<VersionDir>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    E: AsRef<str>,
{
    let mut found: Vec<VersionDir> = names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            if excluded.iter().any(|e| e.as_ref() == name) {
                debug!("Skipping excluded directory {}", name);
                return None;
            }
            Version::parse(name)
                .inspect_err(|e| debug!("Skipping directory {}: {}", name, e))
                .ok()
                .map(|version| VersionDir {
                    version,
                    name: name.to_string(),
                })
        })
        .collect();

    found.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.name.cmp(&b.name)));
    found
}

/// Active and deprecated versions of the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    active: Vec<VersionDir>,
    deprecated: Vec<VersionDir>,
}

impl VersionSet {
    /// Build a set from active and deprecated directory names.
    pub fn discover<A, D, S, E>(active: A, deprecated: D, excluded: &[E]) -> Self
    where
        A: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: AsRef<str>,
    {
        Self {
            active: discover(active, excluded),
            deprecated: discover(deprecated, excluded),
        }
    }

    /// Build a set holding only active versions.
    pub fn from_active<A, S>(active: A) -> Self
    where
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            active: discover(active, &[] as &[&str]),
            deprecated: Vec::new(),
        }
    }

    /// Active versions, ascending
    pub fn active(&self) -> &[VersionDir] {
        &self.active
    }

    /// Deprecated versions, ascending
    pub fn deprecated(&self) -> &[VersionDir] {
        &self.deprecated
    }

    /// Highest active version that is not a release candidate
    pub fn latest(&self) -> Option<&VersionDir> {
        self.active
            .iter()
            .filter(|d| !d.version.is_release_candidate())
            .max_by(|a, b| a.version.cmp(&b.version))
    }

    /// Highest active version of the given major, release candidates included
    pub fn for_major(&self, major: u64) -> Option<&VersionDir> {
        self.active
            .iter()
            .filter(|d| d.version.major == major)
            .max_by(|a, b| a.version.cmp(&b.version))
    }

    pub fn is_latest(&self, version: &Version) -> bool {
        self.latest().is_some_and(|latest| latest.version == *version)
    }
}
