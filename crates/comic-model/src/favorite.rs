use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ComicId, UserId};

/// Membership row linking a user to a favorited comic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRow {
    pub user_id: UserId,
    pub comic_id: ComicId,
    pub created_at: DateTime<Utc>,
}

impl FavoriteRow {
    pub fn new(user_id: UserId, comic_id: ComicId) -> Self {
        Self {
            user_id,
            comic_id,
            created_at: Utc::now(),
        }
    }

    /// Whether this row belongs to the `(user, comic)` pair.
    pub fn matches(&self, user_id: &UserId, comic_id: &ComicId) -> bool {
        &self.user_id == user_id && &self.comic_id == comic_id
    }
}
