//! Artifact verification
//!
//! Checksums recorded in the run summary, plus a quoting-independent
//! content checksum for comparing artifacts written with and without
//! fields enclosure.

pub mod checksum;

pub use checksum::{artifact_checksum, content_checksum};
