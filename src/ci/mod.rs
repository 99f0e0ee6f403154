//! CI decisions for an image repository
//!
//! # Modules
//!
//! - [`plan`]: Build matrix selection and push authorization from a git ref
//! - [`tags`]: Docker tag derivation for a version and variant

pub mod plan;
pub mod tags;

use serde::Serialize;

pub use plan::{BuildDir, BuildMatrix, MatrixEntry, PlanError, RefTrigger, plan, should_push};
pub use tags::{TagTarget, derive_tags};

/// Build flavor of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    /// Debian based image
    #[serde(rename = "debian")]
    Standard,
    /// musl based minimal image
    #[serde(rename = "alpine")]
    Alpine,
}

impl Variant {
    /// Suffix appended to every tag of this variant
    pub fn tag_suffix(&self) -> &'static str {
        match self {
            Variant::Standard => "",
            Variant::Alpine => "-alpine",
        }
    }

    pub fn from_alpine_flag(alpine: bool) -> Self {
        if alpine {
            Variant::Alpine
        } else {
            Variant::Standard
        }
    }
}
