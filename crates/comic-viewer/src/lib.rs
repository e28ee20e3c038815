//! Presentation core of the comic viewer.
//!
//! Given a comic, a mode identifier, and an optional signed-in identity, a
//! [`ViewerSession`] decides which frame is visible, whether frames advance
//! on a timer, and whether the comic shows as a favorite.
//!
//! # Architecture
//!
//! - `mode` - [`ViewModeRegistry`] maps mode ids (including legacy aliases)
//!   to a [`ModePolicy`]
//! - `navigator` - [`FrameNavigator`], the 1-indexed frame cursor
//! - `scheduler` - [`AutoAdvanceScheduler`], the cancellable tick timer
//! - `favorite` - [`FavoriteSynchronizer`], optimistic toggles with rollback
//! - `session` - [`ViewerSession`], which owns one of each
//! - `config` - [`ViewerConfig`], TOML settings
//!
//! Auto-advance spawns onto the ambient Tokio runtime, so sessions that
//! auto-play must be opened inside one.
//!
//! # Example
//!
//! ```ignore
//! let store: Arc<dyn ContentStore> = Arc::new(InMemoryStore::load(path)?);
//! let comic = store.get_comic(&ComicId::new("c-1")?).await?;
//! let mut session =
//!     ViewerSession::open(comic, "paged", None, store, &ViewerConfig::default()).await?;
//! session.next();
//! println!("{}", session.position()); // 2 / 4
//! ```

mod config;
mod error;
mod favorite;
mod mode;
mod navigator;
mod scheduler;
mod session;

pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use favorite::{FavoriteState, FavoriteSynchronizer, IgnoreReason, ToggleOutcome};
pub use mode::{ModePolicy, ViewMode, ViewModeRegistry};
pub use navigator::{FrameNavigator, FramePosition};
pub use scheduler::{AutoAdvanceScheduler, DEFAULT_TICK_PERIOD};
pub use session::{ViewerSession, ViewerSnapshot};
