//! Matrix and tag decisions over a repository on disk

mod helper;

use docker_versions::ci::{
    BuildDir, MatrixEntry, PlanError, RefTrigger, TagTarget, Variant, derive_tags, plan,
};
use docker_versions::config::DEFAULT_IMAGE_REPOSITORY;

use helper::TestRepo;

fn sample_repo() -> TestRepo {
    TestRepo::new()
        .with_version("30.2", true)
        .with_version("29.1", false)
        .with_version("31.0rc1", true)
        .with_version("master", true)
        .with_deprecated("28.1")
        .with_plain_dir("docs")
}

fn entry(version: &str, variant: Variant) -> MatrixEntry {
    MatrixEntry {
        version: version.to_string(),
        variant,
    }
}

#[test]
fn scan_lists_visible_directories_with_dockerfile_flags() {
    let repo = sample_repo();
    let dirs = repo.layout().scan().unwrap();

    let find = |name: &str| dirs.iter().find(|d| d.name == name).cloned();
    assert_eq!(
        find("30.2"),
        Some(BuildDir {
            name: "30.2".to_string(),
            has_dockerfile: true,
            has_alpine_dockerfile: true,
        })
    );
    assert_eq!(
        find("docs"),
        Some(BuildDir {
            name: "docs".to_string(),
            has_dockerfile: false,
            has_alpine_dockerfile: false,
        })
    );
    assert!(find(".github").is_none());

    let names: Vec<&str> = dirs.iter().map(|d| d.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn branch_push_matrix_covers_all_buildable_directories() {
    let repo = sample_repo();
    let layout = repo.layout();
    let dirs = layout.scan().unwrap();

    let matrix = plan(
        &RefTrigger::parse("refs/heads/master"),
        None,
        &dirs,
        &layout.config().build_excluded(),
    )
    .unwrap();

    assert_eq!(
        matrix.include,
        vec![
            entry("29.1", Variant::Standard),
            entry("30.2", Variant::Standard),
            entry("30.2", Variant::Alpine),
            entry("31.0rc1", Variant::Standard),
            entry("31.0rc1", Variant::Alpine),
            entry("master", Variant::Standard),
            entry("master", Variant::Alpine),
        ]
    );
}

#[test]
fn tag_push_for_deprecated_version_fails() {
    let repo = sample_repo();
    let layout = repo.layout();
    let dirs = layout.scan().unwrap();

    let result = plan(
        &RefTrigger::parse("refs/tags/v28.1"),
        None,
        &dirs,
        &layout.config().build_excluded(),
    );

    assert_eq!(
        result,
        Err(PlanError::TagDirectoryNotFound {
            name: "28.1".to_string()
        })
    );
}

#[test]
fn buildable_versions_ignore_master_deprecated_and_plain_dirs() {
    let repo = sample_repo();
    let known = repo.layout().buildable_versions().unwrap();

    let names: Vec<&str> = known.active().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["29.1", "30.2", "31.0rc1"]);
    assert_eq!(known.latest().map(|d| d.name.as_str()), Some("30.2"));
}

#[test]
fn tags_follow_latest_version_on_disk() {
    let repo = sample_repo();
    let known = repo.layout().buildable_versions().unwrap();
    let tags = |version: &str, variant: Variant| {
        derive_tags(
            TagTarget::parse(version, "master").unwrap(),
            variant,
            &known,
            DEFAULT_IMAGE_REPOSITORY,
        )
    };

    assert_eq!(
        tags("30.2", Variant::Standard),
        ["bitcoin/bitcoin:30.2", "bitcoin/bitcoin:30", "bitcoin/bitcoin:latest"]
    );
    assert_eq!(
        tags("29.1", Variant::Alpine),
        ["bitcoin/bitcoin:29.1-alpine", "bitcoin/bitcoin:29-alpine"]
    );
    assert_eq!(
        tags("31.0rc1", Variant::Standard),
        ["bitcoin/bitcoin:31.0rc1"]
    );
    assert_eq!(
        tags("master", Variant::Alpine),
        ["bitcoin/bitcoin:master-alpine"]
    );
}
