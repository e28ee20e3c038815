//! Favorite flag synchronization for one (identity, comic) pair.
//!
//! Toggles are optimistic: the local state flips before the store call and
//! is rolled back if the call fails. A small `{Idle, InFlight}` phase guards
//! the await point so a second toggle cannot race the first one. A
//! synchronizer that has been retired (identity or comic changed, session
//! closed) ignores every store result that arrives afterwards.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use comic_model::{ComicId, Identity};
use comic_store::ContentStore;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Favorite membership as known locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteState {
    /// Not reconciled with the store yet.
    #[default]
    Unknown,
    Absent,
    Present,
}

impl FavoriteState {
    /// Value to show in the UI; unknown displays as not favorited.
    pub fn displayed(&self) -> bool {
        matches!(self, Self::Present)
    }

    fn toggled(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent | Self::Unknown => Self::Present,
        }
    }
}

impl fmt::Display for FavoriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Absent => "absent",
            Self::Present => "present",
        })
    }
}

/// Result of a [`FavoriteSynchronizer::toggle`] call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The store accepted the change; this is the new state.
    Confirmed(FavoriteState),
    /// Nothing was sent.
    Ignored(IgnoreReason),
    /// The store call settled after the synchronizer was retired.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SignedOut,
    InFlight,
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    InFlight { previous: FavoriteState },
}

#[derive(Debug)]
struct FavoriteCell {
    state: FavoriteState,
    phase: Phase,
    retired: bool,
}

fn lock(cell: &Mutex<FavoriteCell>) -> MutexGuard<'_, FavoriteCell> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Rolls an optimistic flip back if the toggle future is dropped before the
/// store call settles.
struct PendingToggle<'a> {
    cell: &'a Mutex<FavoriteCell>,
    previous: FavoriteState,
    armed: bool,
}

impl PendingToggle<'_> {
    fn settle(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut cell = lock(self.cell);
        if !matches!(cell.phase, Phase::InFlight { .. }) {
            return;
        }
        cell.phase = Phase::Idle;
        if !cell.retired {
            cell.state = self.previous;
        }
        tracing::debug!(restored = %cell.state, "favorite toggle cancelled");
    }
}

/// Keeps the favorite flag of one (identity, comic) pair in step with the
/// content store.
///
/// Clones share state, so a toggle can run on a spawned task while the
/// owner keeps reading [`state`](Self::state).
#[derive(Clone)]
pub struct FavoriteSynchronizer {
    cell: Arc<Mutex<FavoriteCell>>,
    store: Arc<dyn ContentStore>,
    identity: Option<Identity>,
    comic_id: ComicId,
}

impl fmt::Debug for FavoriteSynchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoriteSynchronizer")
            .field("comic_id", &self.comic_id)
            .field("user", &self.identity.as_ref().map(|i| &i.id))
            .field("cell", &*self.lock())
            .finish()
    }
}

impl FavoriteSynchronizer {
    pub fn new(store: Arc<dyn ContentStore>, identity: Option<Identity>, comic_id: ComicId) -> Self {
        Self {
            cell: Arc::new(Mutex::new(FavoriteCell {
                state: FavoriteState::Unknown,
                phase: Phase::Idle,
                retired: false,
            })),
            store,
            identity,
            comic_id,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FavoriteCell> {
        lock(&self.cell)
    }

    pub fn comic_id(&self) -> &ComicId {
        &self.comic_id
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn state(&self) -> FavoriteState {
        self.lock().state
    }

    /// Whether a toggle is waiting on the store.
    pub fn is_busy(&self) -> bool {
        matches!(self.lock().phase, Phase::InFlight { .. })
    }

    pub fn is_retired(&self) -> bool {
        self.lock().retired
    }

    /// Make every pending and future store result inert.
    pub fn retire(&self) {
        self.lock().retired = true;
    }

    /// Reconcile with the store.
    ///
    /// Without an identity there is nothing to ask and the state stays
    /// unknown. On failure the state is left as it was. A result that lands
    /// while a toggle is in flight is dropped; the toggle settles the state.
    pub async fn initialize(&self) -> Result<FavoriteState> {
        let Some(identity) = &self.identity else {
            return Ok(self.state());
        };

        let present = match self.store.is_favorite(&identity.id, &self.comic_id).await {
            Ok(present) => present,
            Err(err) => {
                tracing::warn!(
                    user = %identity.id,
                    comic = %self.comic_id,
                    error = %err,
                    "favorite lookup failed"
                );
                return Err(err.into());
            }
        };

        let mut cell = self.lock();
        if cell.retired || cell.phase != Phase::Idle {
            return Ok(cell.state);
        }
        cell.state = if present {
            FavoriteState::Present
        } else {
            FavoriteState::Absent
        };
        tracing::debug!(user = %identity.id, comic = %self.comic_id, state = %cell.state, "favorite reconciled");
        Ok(cell.state)
    }

    /// Run [`initialize`](Self::initialize) again after a failed lookup.
    pub async fn retry_initialize(&self) -> Result<FavoriteState> {
        self.initialize().await
    }

    /// Flip the favorite flag.
    ///
    /// Signed-out visitors and overlapping calls are ignored. On store
    /// failure the state is restored to its value before the call and the
    /// error is returned. Dropping the future before it completes restores
    /// the state the same way.
    pub async fn toggle(&self) -> Result<ToggleOutcome> {
        let Some(identity) = &self.identity else {
            return Ok(ToggleOutcome::Ignored(IgnoreReason::SignedOut));
        };

        let (target, pending) = {
            let mut cell = self.lock();
            if cell.retired {
                return Ok(ToggleOutcome::Ignored(IgnoreReason::Retired));
            }
            if cell.phase != Phase::Idle {
                tracing::debug!(comic = %self.comic_id, "favorite toggle already in flight");
                return Ok(ToggleOutcome::Ignored(IgnoreReason::InFlight));
            }
            let previous = cell.state;
            cell.state = previous.toggled();
            cell.phase = Phase::InFlight { previous };
            let pending = PendingToggle {
                cell: &self.cell,
                previous,
                armed: true,
            };
            (cell.state, pending)
        };

        let result = match target {
            FavoriteState::Present => self.store.add_favorite(&identity.id, &self.comic_id).await,
            _ => self.store.remove_favorite(&identity.id, &self.comic_id).await,
        };
        pending.settle();

        let mut cell = self.lock();
        let Phase::InFlight { previous } = cell.phase else {
            return Ok(ToggleOutcome::Discarded);
        };
        cell.phase = Phase::Idle;
        if cell.retired {
            tracing::debug!(comic = %self.comic_id, "favorite result arrived after retirement");
            return Ok(ToggleOutcome::Discarded);
        }

        match result {
            Ok(()) => {
                tracing::debug!(user = %identity.id, comic = %self.comic_id, state = %target, "favorite toggled");
                Ok(ToggleOutcome::Confirmed(target))
            }
            Err(err) => {
                cell.state = previous;
                tracing::warn!(
                    user = %identity.id,
                    comic = %self.comic_id,
                    restored = %previous,
                    error = %err,
                    "favorite toggle failed, rolled back"
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use comic_model::UserId;
    use comic_store::InMemoryStore;

    use super::*;

    fn signed_in(store: Arc<InMemoryStore>) -> FavoriteSynchronizer {
        FavoriteSynchronizer::new(
            store,
            Some(Identity::new(UserId::new("u-1").unwrap())),
            ComicId::new("c-1").unwrap(),
        )
    }

    #[test]
    fn unknown_displays_as_not_favorited() {
        assert!(!FavoriteState::Unknown.displayed());
        assert!(FavoriteState::Present.displayed());
        assert_eq!(FavoriteState::Unknown.toggled(), FavoriteState::Present);
    }

    #[tokio::test]
    async fn initialize_reads_store() {
        let store = Arc::new(InMemoryStore::new());
        let sync = signed_in(store.clone());
        assert_eq!(sync.initialize().await.unwrap(), FavoriteState::Absent);

        store
            .add_favorite(&UserId::new("u-1").unwrap(), sync.comic_id())
            .await
            .unwrap();
        assert_eq!(sync.initialize().await.unwrap(), FavoriteState::Present);
    }

    #[tokio::test]
    async fn toggle_round_trip_mirrors_store() {
        let store = Arc::new(InMemoryStore::new());
        let sync = signed_in(store.clone());
        sync.initialize().await.unwrap();

        assert_eq!(
            sync.toggle().await.unwrap(),
            ToggleOutcome::Confirmed(FavoriteState::Present)
        );
        assert_eq!(store.favorite_count().await, 1);

        assert_eq!(
            sync.toggle().await.unwrap(),
            ToggleOutcome::Confirmed(FavoriteState::Absent)
        );
        assert_eq!(store.favorite_count().await, 0);
        assert!(!sync.is_busy());
    }

    #[tokio::test]
    async fn signed_out_toggle_is_ignored() {
        let store = Arc::new(InMemoryStore::new());
        let sync = FavoriteSynchronizer::new(store.clone(), None, ComicId::new("c-1").unwrap());
        assert_eq!(sync.initialize().await.unwrap(), FavoriteState::Unknown);
        assert_eq!(
            sync.toggle().await.unwrap(),
            ToggleOutcome::Ignored(IgnoreReason::SignedOut)
        );
        assert_eq!(store.favorite_count().await, 0);
    }

    #[tokio::test]
    async fn retired_synchronizer_ignores_toggles() {
        let store = Arc::new(InMemoryStore::new());
        let sync = signed_in(store.clone());
        sync.retire();
        assert_eq!(
            sync.toggle().await.unwrap(),
            ToggleOutcome::Ignored(IgnoreReason::Retired)
        );
        assert_eq!(sync.state(), FavoriteState::Unknown);
    }
}
