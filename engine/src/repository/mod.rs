//! Repository identity: stable short ids for add-on repositories
//!
//! A repository directory is named either by its canonical id (8 lowercase hex
//! characters) or by a human-readable name. Names are lower-cased and hashed
//! with SHA-1; the first 8 hex characters of the digest become the id. The id
//! is used for on-disk identity only and carries no security weight.

use regex::Regex;
use sha1::{Digest, Sha1};
use std::borrow::Cow;
use std::path::{Component, Path};
use std::sync::OnceLock;

/// Length of a canonical repository id
pub const REPOSITORY_ID_LEN: usize = 8;

static REPOSITORY_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn repository_id_pattern() -> &'static Regex {
    REPOSITORY_ID_PATTERN
        .get_or_init(|| Regex::new(r"^[a-f0-9]{8}$").expect("Invalid repository id pattern"))
}

/// Whether `segment` is already a canonical repository id
pub fn is_repository_id(segment: &str) -> bool {
    repository_id_pattern().is_match(segment)
}

/// Hash a repository name into its 8-character id
///
/// Hashing is case-insensitive.
///
/// # Examples
///
/// ```
/// use addon_engine::repository::hash_repository_name;
///
/// let id = hash_repository_name("https://github.com/hassio-addons/repository");
/// assert_eq!(id.len(), 8);
/// assert_eq!(id, hash_repository_name("https://GitHub.com/Hassio-Addons/Repository"));
/// ```
pub fn hash_repository_name(name: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(name.to_lowercase().as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..REPOSITORY_ID_LEN].to_string()
}

/// Extract the repository id from a repository directory path
///
/// Only the final path segment is inspected. Canonical ids pass through
/// unchanged; anything else is hashed as a repository name, including a
/// trailing `..`. A path without a final segment hashes the empty name.
pub fn extract_repository_id(path: &Path) -> String {
    let segment = match path.components().next_back() {
        Some(Component::Normal(name)) => name.to_string_lossy(),
        Some(Component::ParentDir) => Cow::Borrowed(".."),
        _ => Cow::Borrowed(""),
    };

    if is_repository_id(&segment) {
        segment.into_owned()
    } else {
        hash_repository_name(&segment)
    }
}
