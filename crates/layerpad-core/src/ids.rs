//! Opaque id generation for shapes and layers.

use uuid::Uuid;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of the random suffix.
const RANDOM_SUFFIX_LEN: usize = 9;

/// Build an id of the form `{prefix}-{millis}-{random}`.
///
/// The random suffix is lowercase hex taken from a v4 UUID, so it never
/// contains a `-`.
pub(crate) fn unique_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let random = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{millis}-{}", &random[..RANDOM_SUFFIX_LEN])
}
