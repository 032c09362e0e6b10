//! UUID v7 utilities for time-ordered identifiers.
//!
//! Identifiers are store-assigned UUIDv7 values (RFC 9562). UUIDv7
//! embeds a millisecond Unix timestamp in the first 48 bits, so ids
//! generated later sort lexicographically greater. Listings ordered by
//! creation time can therefore break timestamp ties on id.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Check whether a UUID is version 7.
pub fn is_v7(id: &Uuid) -> bool {
    id.get_version_num() == 7
}
