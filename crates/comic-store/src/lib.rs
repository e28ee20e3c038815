//! Content store and asset delivery for the comic viewer.
//!
//! The viewer core talks to its collaborators only through the traits in
//! this crate:
//!
//! - [`ContentStore`] - comic records and favorite membership
//! - [`AssetResolver`] - frame image locations
//!
//! [`InMemoryStore`] is a complete in-process implementation loaded from a
//! JSON catalog; it backs the CLI and the test suites.
//!
//! # Catalog format
//!
//! ```json
//! {
//!   "comics": [
//!     {
//!       "id": "c-1",
//!       "title": "Out Of Paper",
//!       "image_url": "https://cdn.example/c-1",
//!       "creator_id": "u-admin",
//!       "frame_count": 4,
//!       "tags": ["supplies"],
//!       "created_at": "2024-05-01T12:00:00Z"
//!     }
//!   ],
//!   "favorites": [
//!     { "user_id": "u-1", "comic_id": "c-1", "created_at": "2024-05-02T08:00:00Z" }
//!   ]
//! }
//! ```

mod asset;
mod error;
mod memory;
mod query;
mod store;

pub use asset::{
    AssetError, AssetResolver, FrameAsset, PlaceholderReason, UrlAssetResolver, frame_url,
    load_frame_asset,
};
pub use error::{Result, StoreError};
pub use memory::{Catalog, InMemoryStore};
pub use query::ComicQuery;
pub use store::ContentStore;
