//! Shared fixtures for viewer integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use comic_model::{Comic, ComicId, FavoriteRow, Identity, UserId};
use comic_store::{ComicQuery, ContentStore, InMemoryStore, StoreError};

pub const PERIOD: Duration = Duration::from_millis(2_000);

pub fn comic(id: &str, frames: u32) -> Comic {
    Comic::builder(
        ComicId::new(id).unwrap(),
        format!("Comic {id}"),
        UserId::new("u-admin").unwrap(),
    )
    .image_url(format!("https://cdn.example/{id}"))
    .frame_count(frames)
    .build()
    .unwrap()
}

pub fn user(id: &str) -> Identity {
    Identity::new(UserId::new(id).unwrap())
}

/// Sleep past `n` auto-advance periods.
pub async fn elapse_periods(n: u32) {
    tokio::time::sleep(PERIOD * n + Duration::from_millis(10)).await;
}

/// Store double that delays every call and can fail reads or writes.
#[derive(Debug, Default)]
pub struct ScriptedStore {
    pub inner: InMemoryStore,
    pub delay: Duration,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub writes: AtomicUsize,
}

impl ScriptedStore {
    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn failing_writes(delay: Duration) -> Self {
        Self {
            delay,
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    async fn write(&self) -> comic_store::Result<()> {
        self.pause().await;
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(StoreError::Unavailable("connection reset".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for ScriptedStore {
    async fn list_comics(&self, query: &ComicQuery) -> comic_store::Result<Vec<Comic>> {
        self.inner.list_comics(query).await
    }

    async fn get_comic(&self, id: &ComicId) -> comic_store::Result<Comic> {
        self.inner.get_comic(id).await
    }

    async fn is_favorite(&self, user: &UserId, comic: &ComicId) -> comic_store::Result<bool> {
        self.pause().await;
        if self.fail_reads {
            return Err(StoreError::Timeout { after_ms: 5_000 });
        }
        self.inner.is_favorite(user, comic).await
    }

    async fn add_favorite(&self, user: &UserId, comic: &ComicId) -> comic_store::Result<()> {
        self.write().await?;
        self.inner.add_favorite(user, comic).await
    }

    async fn remove_favorite(&self, user: &UserId, comic: &ComicId) -> comic_store::Result<()> {
        self.write().await?;
        self.inner.remove_favorite(user, comic).await
    }

    async fn list_favorites(&self, user: &UserId) -> comic_store::Result<Vec<FavoriteRow>> {
        self.inner.list_favorites(user).await
    }
}
