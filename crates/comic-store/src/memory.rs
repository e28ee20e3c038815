//! In-process content store backed by a JSON catalog.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use comic_model::{Comic, ComicId, FavoriteRow, UserId};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::query::ComicQuery;
use crate::store::ContentStore;

/// Catalog file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub comics: Vec<Comic>,
    #[serde(default)]
    pub favorites: Vec<FavoriteRow>,
}

/// Content store holding every record in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    comics: RwLock<BTreeMap<ComicId, Comic>>,
    favorites: RwLock<Vec<FavoriteRow>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an already parsed catalog.
    ///
    /// Duplicate favorite rows collapse into one.
    pub fn from_catalog(catalog: Catalog) -> Self {
        let comics = catalog
            .comics
            .into_iter()
            .map(|comic| (comic.id().clone(), comic))
            .collect();
        let mut favorites: Vec<FavoriteRow> = Vec::with_capacity(catalog.favorites.len());
        for row in catalog.favorites {
            if !favorites
                .iter()
                .any(|existing| existing.matches(&row.user_id, &row.comic_id))
            {
                favorites.push(row);
            }
        }
        Self {
            comics: RwLock::new(comics),
            favorites: RwLock::new(favorites),
        }
    }

    /// Load a store from a JSON catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog: Catalog =
            serde_json::from_str(&content).map_err(|e| StoreError::Catalog {
                path: path.to_path_buf(),
                source: e,
            })?;
        tracing::info!(
            comics = catalog.comics.len(),
            favorites = catalog.favorites.len(),
            "Loaded catalog from {}",
            path.display()
        );
        Ok(Self::from_catalog(catalog))
    }

    /// Insert or replace a comic.
    pub async fn insert_comic(&self, comic: Comic) {
        self.comics.write().await.insert(comic.id().clone(), comic);
    }

    /// Current contents as a catalog.
    pub async fn catalog(&self) -> Catalog {
        Catalog {
            comics: self.comics.read().await.values().cloned().collect(),
            favorites: self.favorites.read().await.clone(),
        }
    }

    /// Write the current contents back to a JSON catalog file.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let catalog = self.catalog().await;
        let content = serde_json::to_string_pretty(&catalog).map_err(|e| StoreError::Catalog {
            path: path.to_path_buf(),
            source: e,
        })?;
        tokio::fs::write(path, content).await.map_err(|e| StoreError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!("Saved catalog to {}", path.display());
        Ok(())
    }

    /// Number of favorite rows currently stored.
    pub async fn favorite_count(&self) -> usize {
        self.favorites.read().await.len()
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn list_comics(&self, query: &ComicQuery) -> Result<Vec<Comic>> {
        let comics = self.comics.read().await;
        Ok(query.apply(comics.values()))
    }

    async fn get_comic(&self, id: &ComicId) -> Result<Comic> {
        self.comics
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })
    }

    async fn is_favorite(&self, user: &UserId, comic: &ComicId) -> Result<bool> {
        Ok(self
            .favorites
            .read()
            .await
            .iter()
            .any(|row| row.matches(user, comic)))
    }

    async fn add_favorite(&self, user: &UserId, comic: &ComicId) -> Result<()> {
        let mut favorites = self.favorites.write().await;
        if favorites.iter().any(|row| row.matches(user, comic)) {
            tracing::trace!(%user, %comic, "favorite already present");
            return Ok(());
        }
        favorites.push(FavoriteRow::new(user.clone(), comic.clone()));
        Ok(())
    }

    async fn remove_favorite(&self, user: &UserId, comic: &ComicId) -> Result<()> {
        self.favorites
            .write()
            .await
            .retain(|row| !row.matches(user, comic));
        Ok(())
    }

    async fn list_favorites(&self, user: &UserId) -> Result<Vec<FavoriteRow>> {
        let mut rows: Vec<FavoriteRow> = self
            .favorites
            .read()
            .await
            .iter()
            .filter(|row| &row.user_id == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (UserId, ComicId) {
        (UserId::new("u-1").unwrap(), ComicId::new("c-1").unwrap())
    }

    #[tokio::test]
    async fn add_favorite_is_idempotent() {
        let store = InMemoryStore::new();
        let (user, comic) = ids();

        store.add_favorite(&user, &comic).await.unwrap();
        store.add_favorite(&user, &comic).await.unwrap();

        assert_eq!(store.favorite_count().await, 1);
        assert!(store.is_favorite(&user, &comic).await.unwrap());
    }

    #[tokio::test]
    async fn remove_favorite_is_idempotent() {
        let store = InMemoryStore::new();
        let (user, comic) = ids();

        store.remove_favorite(&user, &comic).await.unwrap();
        assert_eq!(store.favorite_count().await, 0);

        store.add_favorite(&user, &comic).await.unwrap();
        store.remove_favorite(&user, &comic).await.unwrap();
        store.remove_favorite(&user, &comic).await.unwrap();
        assert!(!store.is_favorite(&user, &comic).await.unwrap());
    }

    #[tokio::test]
    async fn missing_comic_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .get_comic(&ComicId::new("nope").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn duplicate_catalog_favorites_collapse() {
        let (user, comic) = ids();
        let catalog = Catalog {
            comics: Vec::new(),
            favorites: vec![
                FavoriteRow::new(user.clone(), comic.clone()),
                FavoriteRow::new(user, comic),
            ],
        };
        let store = InMemoryStore::from_catalog(catalog);
        assert_eq!(store.favorites.blocking_read().len(), 1);
    }
}
