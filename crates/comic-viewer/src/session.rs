//! Viewer session: one open comic view.
//!
//! A session owns exactly one scheduler (which owns the frame navigator) and
//! one favorite synchronizer. Mode, comic, and identity changes rebuild the
//! parts they affect; everything else is left alone.

use std::fmt;
use std::sync::Arc;

use comic_model::{Comic, ComicId, Identity};
use comic_store::{AssetResolver, ContentStore, FrameAsset, load_frame_asset};
use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::favorite::{FavoriteState, FavoriteSynchronizer, ToggleOutcome};
use crate::mode::{ModePolicy, ViewMode, ViewModeRegistry};
use crate::navigator::{FrameNavigator, FramePosition};
use crate::scheduler::AutoAdvanceScheduler;

/// Presentation-ready view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerSnapshot {
    pub comic_id: ComicId,
    pub title: String,
    pub mode: ViewMode,
    pub mode_label: String,
    pub position: FramePosition,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub playing: bool,
    pub favorite: FavoriteState,
    pub favorited: bool,
    pub favorite_busy: bool,
    pub signed_in: bool,
}

/// One open comic view.
pub struct ViewerSession {
    comic: Comic,
    policy: ModePolicy,
    scheduler: AutoAdvanceScheduler,
    favorites: FavoriteSynchronizer,
    store: Arc<dyn ContentStore>,
    last_error: Option<ViewerError>,
}

impl fmt::Debug for ViewerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerSession")
            .field("comic", self.comic.id())
            .field("policy", &self.policy)
            .field("scheduler", &self.scheduler)
            .field("favorites", &self.favorites)
            .finish_non_exhaustive()
    }
}

impl ViewerSession {
    /// Open `comic` in the mode named by `mode_id`.
    ///
    /// A failed favorite lookup does not fail the open; the state stays
    /// unknown and the error is kept for [`take_error`](Self::take_error).
    pub async fn open(
        comic: Comic,
        mode_id: &str,
        identity: Option<Identity>,
        store: Arc<dyn ContentStore>,
        config: &ViewerConfig,
    ) -> Result<Self> {
        let policy = ViewModeRegistry::resolve(mode_id);
        let scheduler = AutoAdvanceScheduler::new(
            FrameNavigator::new(comic.frame_count()),
            policy,
            config.tick_period(),
        );
        let favorites = FavoriteSynchronizer::new(store.clone(), identity, comic.id().clone());

        let mut session = Self {
            comic,
            policy,
            scheduler,
            favorites,
            store,
            last_error: None,
        };
        tracing::info!(
            comic = %session.comic.id(),
            mode = %policy.mode,
            signed_in = session.favorites.identity().is_some(),
            "viewer session opened"
        );

        session.reconcile_favorite().await;
        if policy.auto_advance_enabled {
            session.scheduler.set_playing(true)?;
        }
        Ok(session)
    }

    pub fn comic(&self) -> &Comic {
        &self.comic
    }

    pub fn policy(&self) -> ModePolicy {
        self.policy
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.favorites.identity()
    }

    pub fn position(&self) -> FramePosition {
        self.scheduler.position()
    }

    pub fn current_frame(&self) -> u32 {
        self.position().current
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    /// Whether the auto-advance timer is alive.
    pub fn is_auto_advancing(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn favorite_state(&self) -> FavoriteState {
        self.favorites.state()
    }

    /// Handle for running favorite toggles off the session, e.g. on a
    /// spawned task. Retired when the session rebuilds or closes.
    pub fn favorites(&self) -> FavoriteSynchronizer {
        self.favorites.clone()
    }

    /// Take the last non-fatal error, if any.
    pub fn take_error(&mut self) -> Option<ViewerError> {
        self.last_error.take()
    }

    /// Switch mode. The frame always restarts at 1; playback restarts when
    /// the new mode auto-advances.
    pub fn change_mode(&mut self, mode_id: &str) -> Result<()> {
        let policy = ViewModeRegistry::resolve(mode_id);
        tracing::debug!(from = %self.policy.mode, to = %policy.mode, "changing view mode");
        self.policy = policy;
        self.scheduler.rebind(policy);
        if policy.auto_advance_enabled {
            self.scheduler.set_playing(true)?;
        }
        Ok(())
    }

    /// Show a different comic in the current mode.
    pub async fn change_comic(&mut self, comic: Comic) -> Result<()> {
        tracing::debug!(from = %self.comic.id(), to = %comic.id(), "changing comic");
        self.scheduler
            .replace_navigator(FrameNavigator::new(comic.frame_count()));
        let identity = self.favorites.identity().cloned();
        self.comic = comic;
        self.rebuild_favorites(identity).await;
        if self.policy.auto_advance_enabled {
            self.scheduler.set_playing(true)?;
        }
        Ok(())
    }

    /// Apply a sign-in, sign-out, or account switch.
    pub async fn change_identity(&mut self, identity: Option<Identity>) {
        tracing::debug!(
            user = ?identity.as_ref().map(|i| i.id.as_str()),
            "changing identity"
        );
        self.rebuild_favorites(identity).await;
    }

    /// Manual forward step; no-op unless the mode allows manual navigation.
    pub fn next(&mut self) -> u32 {
        if self.policy.allows_manual_navigation {
            self.scheduler.with_navigator(FrameNavigator::next)
        } else {
            self.current_frame()
        }
    }

    /// Manual backward step; no-op unless the mode allows manual navigation.
    pub fn previous(&mut self) -> u32 {
        if self.policy.allows_manual_navigation {
            self.scheduler.with_navigator(FrameNavigator::previous)
        } else {
            self.current_frame()
        }
    }

    pub fn set_playing(&mut self, playing: bool) -> Result<()> {
        self.scheduler.set_playing(playing)
    }

    pub fn toggle_playing(&mut self) -> Result<bool> {
        self.scheduler.toggle_playing()
    }

    /// Toggle the favorite flag of the current (identity, comic) pair.
    ///
    /// For overlapping toggles use [`favorites`](Self::favorites) and run
    /// the returned handle's `toggle` concurrently; the in-flight guard
    /// rejects the overlap.
    pub async fn toggle_favorite(&self) -> Result<ToggleOutcome> {
        self.favorites.toggle().await
    }

    /// Retry the favorite lookup after a failure.
    pub async fn retry_favorite(&mut self) -> FavoriteState {
        if let Err(err) = self.favorites.retry_initialize().await {
            self.last_error = Some(err);
        }
        self.favorites.state()
    }

    /// Resolve the image for the current frame; failures become placeholders.
    pub async fn frame_asset<R>(&self, resolver: &R) -> FrameAsset
    where
        R: AssetResolver + ?Sized,
    {
        load_frame_asset(resolver, self.comic.image_url(), self.current_frame()).await
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        let position = self.position();
        let favorite = self.favorites.state();
        let manual = self.policy.allows_manual_navigation;
        ViewerSnapshot {
            comic_id: self.comic.id().clone(),
            title: self.comic.title().to_string(),
            mode: self.policy.mode,
            mode_label: self.policy.label().to_string(),
            position,
            can_go_previous: manual && position.current > 1,
            can_go_next: manual && position.current < position.total,
            playing: self.scheduler.is_playing(),
            favorite,
            favorited: favorite.displayed(),
            favorite_busy: self.favorites.is_busy(),
            signed_in: self.favorites.identity().is_some(),
        }
    }

    /// Stop playback and release the session.
    pub fn close(self) {
        tracing::info!(comic = %self.comic.id(), "viewer session closed");
    }

    async fn rebuild_favorites(&mut self, identity: Option<Identity>) {
        self.favorites.retire();
        self.favorites =
            FavoriteSynchronizer::new(self.store.clone(), identity, self.comic.id().clone());
        self.reconcile_favorite().await;
    }

    async fn reconcile_favorite(&mut self) {
        if let Err(err) = self.favorites.initialize().await {
            self.last_error = Some(err);
        }
    }
}

impl Drop for ViewerSession {
    fn drop(&mut self) {
        self.scheduler.stop();
        self.favorites.retire();
    }
}
