//! Docker tag derivation for a version directory

use indexmap::IndexSet;

use crate::ci::Variant;
use crate::version::error::ParseError;
use crate::version::set::VersionSet;
use crate::version::value::Version;

/// What a tag set is derived for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagTarget {
    /// The unversioned rolling build, holding its directory name
    Master(String),
    Version(Version),
}

impl TagTarget {
    /// `rolling_dir` selects the rolling build, anything else must be a version.
    pub fn parse(input: &str, rolling_dir: &str) -> Result<Self, ParseError> {
        if input == rolling_dir {
            Ok(TagTarget::Master(input.to_string()))
        } else {
            Version::parse(input).map(TagTarget::Version)
        }
    }
}

/// Ordered tag list that drops repeated tags, keeping the first occurrence
struct TagList<'a> {
    image: &'a str,
    suffix: &'a str,
    tags: IndexSet<String>,
}

impl<'a> TagList<'a> {
    fn new(image: &'a str, variant: Variant) -> Self {
        Self {
            image,
            suffix: variant.tag_suffix(),
            tags: IndexSet::new(),
        }
    }

    /// `<image>:<label><suffix>`
    fn push(&mut self, label: impl std::fmt::Display) {
        self.tags
            .insert(format!("{}:{}{}", self.image, label, self.suffix));
    }

    /// `<image>:<label>` with no variant suffix
    fn push_bare(&mut self, label: &str) {
        self.tags.insert(format!("{}:{}", self.image, label));
    }

    fn into_vec(self) -> Vec<String> {
        self.tags.into_iter().collect()
    }
}

/// Derive every Docker tag an image build must receive.
///
/// Release candidates only get their exact tag. Stable versions get the exact
/// tag plus the major-only alias, and the newest stable version additionally
/// gets `latest` (standard) or `alpine` (alpine). When `known` holds no stable
/// version, the version is treated as the newest.
pub fn derive_tags(
    target: TagTarget,
    variant: Variant,
    known: &VersionSet,
    image: &str,
) -> Vec<String> {
    let mut tags = TagList::new(image, variant);

    let version = match target {
        TagTarget::Master(name) => {
            tags.push(name);
            return tags.into_vec();
        }
        TagTarget::Version(version) => version,
    };

    let Version {
        major,
        minor,
        patch,
        release_candidate,
    } = version;

    match (release_candidate, patch) {
        (Some(rc), 0) => tags.push(format_args!("{major}.{minor}rc{rc}")),
        (Some(rc), _) => tags.push(format_args!("{major}.{minor}.{patch}rc{rc}")),
        (None, 0) => {
            tags.push(format_args!("{major}.{minor}"));
            tags.push(major);
        }
        (None, _) => {
            tags.push(format_args!("{major}.{minor}.{patch}"));
            tags.push(major);
        }
    }

    let is_newest = known
        .latest()
        .is_none_or(|latest| version >= latest.version);

    if !version.is_release_candidate() && is_newest {
        match variant {
            Variant::Standard => tags.push_bare("latest"),
            Variant::Alpine => tags.push_bare("alpine"),
        }
        tags.push(major);
    }

    tags.into_vec()
}
