use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};

use comic_model::{Comic, ComicId, Identity, UserId};
use comic_store::{ComicQuery, ContentStore, FrameAsset, InMemoryStore, UrlAssetResolver};
use comic_viewer::{
    IgnoreReason, ModePolicy, ToggleOutcome, ViewModeRegistry, ViewerConfig, ViewerSession,
    ViewerSnapshot,
};

use crate::cli::{FavoritesArgs, ListArgs, ViewArgs};

/// Outcome of a `view` command.
#[derive(Debug, Clone, Serialize)]
pub struct ViewReport {
    pub snapshot: ViewerSnapshot,
    pub asset: FrameAsset,
    /// Whether a `--favorite` toggle was confirmed and saved.
    pub favorite_toggled: bool,
    /// Non-fatal problems worth showing to the user.
    pub notes: Vec<String>,
}

pub fn load_store(catalog: &Path) -> Result<Arc<InMemoryStore>> {
    let store = InMemoryStore::load(catalog)
        .with_context(|| format!("load catalog {}", catalog.display()))?;
    Ok(Arc::new(store))
}

pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let config = match path {
        Some(path) => ViewerConfig::load_from(path)?,
        None => ViewerConfig::load()?,
    };
    Ok(config)
}

pub async fn run_list(store: &dyn ContentStore, args: &ListArgs) -> Result<Vec<Comic>> {
    let mut query = ComicQuery::all();
    if let Some(term) = &args.search {
        query = query.with_search(term.as_str());
    }
    if let Some(limit) = args.limit {
        query = query.with_limit(limit);
    }
    store.list_comics(&query).await.context("list comics")
}

pub async fn run_show(store: &dyn ContentStore, id: &str) -> Result<Comic> {
    let id = ComicId::new(id)?;
    store
        .get_comic(&id)
        .await
        .with_context(|| format!("load comic {id}"))
}

pub async fn run_favorites(store: &dyn ContentStore, args: &FavoritesArgs) -> Result<Vec<Comic>> {
    let user = UserId::new(args.user.as_str())?;
    store
        .favorite_comics(&user)
        .await
        .with_context(|| format!("list favorites of {user}"))
}

pub fn run_modes() -> Vec<ModePolicy> {
    ViewModeRegistry::modes().collect()
}

/// Open a session, apply the requested interactions, and report the state
/// the viewer would render.
#[instrument(name = "view", skip_all, fields(comic = %args.id))]
pub async fn run_view(
    store: Arc<InMemoryStore>,
    catalog: &Path,
    args: &ViewArgs,
    config: &ViewerConfig,
) -> Result<ViewReport> {
    let comic_id = ComicId::new(args.id.as_str())?;
    let comic = store
        .get_comic(&comic_id)
        .await
        .with_context(|| format!("load comic {comic_id}"))?;
    let identity = args
        .user
        .as_deref()
        .map(UserId::new)
        .transpose()?
        .map(Identity::new);
    let mode = args.mode.as_deref().unwrap_or(&config.default_mode);

    let shared: Arc<dyn ContentStore> = store.clone();
    let mut session = ViewerSession::open(comic, mode, identity, shared, config).await?;
    let mut notes = Vec::new();
    if let Some(err) = session.take_error() {
        warn!(error = %err, "favorite state unavailable");
        notes.push(err.user_message());
    }

    for _ in 0..args.next {
        session.next();
    }
    for _ in 0..args.prev {
        session.previous();
    }
    if (args.next > 0 || args.prev > 0) && !session.policy().allows_manual_navigation {
        notes.push(format!(
            "{} mode has no manual navigation; --next/--prev ignored",
            session.policy().label()
        ));
    }

    if args.ticks > 0 {
        if session.is_playing() {
            let period = config.tick_period();
            tokio::time::sleep(period * args.ticks + period / 2).await;
        } else {
            notes.push(format!(
                "{} mode does not auto-advance; --ticks ignored",
                session.policy().label()
            ));
        }
    }

    let mut favorite_toggled = false;
    if args.favorite {
        match session.toggle_favorite().await.context("toggle favorite")? {
            ToggleOutcome::Confirmed(state) => {
                store.save(catalog).await.context("save catalog")?;
                info!(%state, "favorite saved");
                favorite_toggled = true;
            }
            ToggleOutcome::Ignored(IgnoreReason::SignedOut) => {
                notes.push("Sign in with --user to manage favorites".to_string());
            }
            ToggleOutcome::Ignored(reason) => {
                notes.push(format!("Favorite toggle skipped ({reason:?})"));
            }
            ToggleOutcome::Discarded => {
                notes.push("Favorite toggle discarded".to_string());
            }
        }
    }

    let asset = session.frame_asset(&UrlAssetResolver).await;
    let snapshot = session.snapshot();
    session.close();

    Ok(ViewReport {
        snapshot,
        asset,
        favorite_toggled,
        notes,
    })
}
