//! Version model for image directories
//!
//! This module parses directory names such as `30.2`, `29.1.1` or `31.0rc2`
//! into ordered values and answers questions over the set of known versions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │  directory  │────▶│   Version   │
//! │   names     │     │  (parse/ord)│
//! └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │ VersionSet  │
//!                     │(latest/major)│
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`value`]: `Version` parsing, rendering and total ordering
//! - [`set`]: active/deprecated partitions with latest and per-major lookup
//! - [`error`]: Error type for malformed version strings

pub mod error;
pub mod set;
pub mod value;

pub use error::ParseError;
pub use set::{VersionDir, VersionSet};
pub use value::Version;
