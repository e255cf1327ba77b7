//! Gallery ("in action") posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GalleryPostId;

/// A customer photo featured in the gallery, credited to a social handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPost {
    pub id: GalleryPostId,
    pub image: String,
    pub handle: String,
    pub created_at: DateTime<Utc>,
}

/// Order posts newest first. Ties keep their existing relative order.
pub fn sort_newest_first(posts: &mut [GalleryPost]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
