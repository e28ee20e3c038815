//! Content store interface.

use async_trait::async_trait;
use comic_model::{Comic, ComicId, FavoriteRow, UserId};

use crate::error::Result;
use crate::query::ComicQuery;

/// Asynchronous access to comic records and favorite membership.
///
/// `add_favorite` and `remove_favorite` must be idempotent: adding a pair that
/// is already present, or removing one that is absent, succeeds without
/// changing anything.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// List comics matching `query`, newest first.
    async fn list_comics(&self, query: &ComicQuery) -> Result<Vec<Comic>>;

    /// Fetch one comic by id.
    async fn get_comic(&self, id: &ComicId) -> Result<Comic>;

    /// Whether `(user, comic)` is a favorite.
    async fn is_favorite(&self, user: &UserId, comic: &ComicId) -> Result<bool>;

    /// Insert the favorite row for `(user, comic)`.
    async fn add_favorite(&self, user: &UserId, comic: &ComicId) -> Result<()>;

    /// Delete the favorite row for `(user, comic)`.
    async fn remove_favorite(&self, user: &UserId, comic: &ComicId) -> Result<()>;

    /// Favorite rows of `user`, newest first.
    async fn list_favorites(&self, user: &UserId) -> Result<Vec<FavoriteRow>>;

    /// Comics favorited by `user`, in favorite order. Rows whose comic no
    /// longer exists are skipped.
    async fn favorite_comics(&self, user: &UserId) -> Result<Vec<Comic>> {
        let rows = self.list_favorites(user).await?;
        let mut comics = Vec::with_capacity(rows.len());
        for row in rows {
            match self.get_comic(&row.comic_id).await {
                Ok(comic) => comics.push(comic),
                Err(crate::StoreError::NotFound { id }) => {
                    tracing::debug!(%user, comic = %id, "skipping favorite of removed comic");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(comics)
    }
}
