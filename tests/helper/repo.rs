//! Throw-away image repositories on disk

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use docker_versions::config::Config;
use docker_versions::repo::{Layout, VersionManager};

pub const WORKFLOW: &str = "\
name: build
on:
  push:
    paths:
      - '30.2/**'
      - '29.1/**'
jobs:
  build:
    strategy:
      matrix:
        version:
          - '30.2/alpine'
          - '30.2'
      fail-fast: false
";

pub const README: &str = "\
# Bitcoin Core images

## Tags

- placeholder

### Picking the right tag

Pick a version tag.
";

/// A repository rooted in a temporary directory
pub struct TestRepo {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestRepo {
    /// Repository with `.github/workflows/build.yml`, `README.md` and `scripts/`
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::create_dir_all(root.join(".github/workflows")).unwrap();
        fs::write(root.join(".github/workflows/build.yml"), WORKFLOW).unwrap();
        fs::write(root.join("README.md"), README).unwrap();
        fs::create_dir_all(root.join("scripts")).unwrap();

        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add a version directory with a Dockerfile and, optionally, an alpine one
    pub fn with_version(self, name: &str, alpine: bool) -> Self {
        write_dockerfile(&self.root.join(name), "debian", name);
        if alpine {
            write_dockerfile(&self.root.join(name).join("alpine"), "alpine", name);
        }
        self
    }

    /// Add a version directory under `deprecated/`
    pub fn with_deprecated(self, name: &str) -> Self {
        write_dockerfile(&self.root.join("deprecated").join(name), "debian", name);
        self
    }

    /// Add a directory without a Dockerfile
    pub fn with_plain_dir(self, name: &str) -> Self {
        fs::create_dir_all(self.root.join(name)).unwrap();
        self
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.root, Config::default())
    }

    pub fn manager(&self) -> VersionManager {
        VersionManager::new(self.layout())
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).unwrap()
    }

    pub fn remove_file(&self, relative: &str) {
        fs::remove_file(self.root.join(relative)).unwrap();
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }
}

fn write_dockerfile(dir: &Path, base: &str, version: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("Dockerfile"),
        format!("FROM {base}\nENV BITCOIN_VERSION={version}\n"),
    )
    .unwrap();
}
