//! Text edits applied when versions are added or deprecated
//!
//! All functions are pure `&str -> String` transformations; reading and
//! writing the files is up to the caller.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::version::set::VersionDir;
use crate::version::value::Version;

static PATHS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(paths:\n)").expect("paths pattern is valid"));

/// The `version:` matrix list up to the `fail-fast:` key
static MATRIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(version:\n)(?:          - '[^']+'\n)+(\s+fail-fast:)")
        .expect("matrix pattern is valid")
});

static README_TAGS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(## Tags\n\n)(.*?)(### Picking the right tag)")
        .expect("readme pattern is valid")
});

const DOCKERFILE_VERSION_KEY: &str = "ENV BITCOIN_VERSION=";

/// Point `ENV BITCOIN_VERSION=` at the new version.
///
/// Only whole values are replaced: with `old_version` `30.1`, a value of
/// `30.10` or `30.1rc1` is left alone.
pub fn update_dockerfile_version(content: &str, old_version: &str, new_version: &str) -> String {
    let needle = format!("{DOCKERFILE_VERSION_KEY}{old_version}");
    let mut updated = String::with_capacity(content.len());
    let mut copied = 0;

    for (start, _) in content.match_indices(&needle) {
        let end = start + needle.len();
        let continues = content[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.');
        if continues {
            continue;
        }
        updated.push_str(&content[copied..start]);
        updated.push_str(DOCKERFILE_VERSION_KEY);
        updated.push_str(new_version);
        copied = end;
    }

    updated.push_str(&content[copied..]);
    updated
}

/// Add a version to the workflow trigger paths and make it the only matrix entry.
pub fn add_version_to_workflow(content: &str, version: &str) -> String {
    let with_path = PATHS_PATTERN.replace_all(content, |caps: &Captures| {
        format!("{}      - '{}/**'\n", &caps[1], version)
    });

    MATRIX_PATTERN
        .replace_all(&with_path, |caps: &Captures| {
            format!(
                "{}          - '{version}/alpine'\n          - '{version}'\n{}",
                &caps[1], &caps[2]
            )
        })
        .into_owned()
}

/// Drop a version from the workflow trigger paths and matrix.
pub fn remove_version_from_workflow(content: &str, version: &str) -> String {
    [
        format!("      - '{version}/**'\n"),
        format!("          - '{version}/alpine'\n"),
        format!("          - '{version}'\n"),
    ]
    .iter()
    .fold(content.to_string(), |acc, line| acc.replace(line, ""))
}

/// Render the README tag list for the active versions, newest first.
pub fn render_readme_tags(
    active: &[VersionDir],
    latest: Option<&Version>,
    link_base: &str,
) -> String {
    let mut sorted: Vec<&VersionDir> = active.iter().collect();
    sorted.sort_by(|a, b| b.version.cmp(&a.version));

    let mut lines = Vec::with_capacity(sorted.len() * 3);
    for dir in sorted {
        let name = dir.name.as_str();
        let major = dir.version.major;
        let is_latest = latest.is_some_and(|latest| *latest == dir.version);

        let (tags, alpine_tags) = if dir.version.is_release_candidate() {
            (format!("`{name}`"), format!("`{name}-alpine`"))
        } else if is_latest {
            (
                format!("`{name}`, `{major}`, `latest`"),
                format!("`{name}-alpine`, `{major}-alpine`, `alpine`"),
            )
        } else {
            (
                format!("`{name}`, `{major}`"),
                format!("`{name}-alpine`, `{major}-alpine`"),
            )
        };

        lines.push(format!(
            "- {tags} ([{name}/Dockerfile]({link_base}{name}/Dockerfile)) [**multi-platform**]"
        ));
        lines.push(format!(
            "- {alpine_tags} ([{name}/alpine/Dockerfile]({link_base}{name}/alpine/Dockerfile))"
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Replace the README section between `## Tags` and `### Picking the right tag`.
pub fn replace_readme_tags(content: &str, tags_section: &str) -> String {
    README_TAGS_PATTERN
        .replace_all(content, |caps: &Captures| {
            format!("{}{}\n{}", &caps[1], tags_section, &caps[3])
        })
        .into_owned()
}
