//! Integration tests for viewer sessions: mode changes, auto-advance
//! lifecycle, comic switches, and asset degradation.

mod support;

use std::sync::Arc;

use comic_model::ComicId;
use comic_store::{ContentStore, FrameAsset, InMemoryStore, PlaceholderReason, UrlAssetResolver};
use comic_viewer::{FavoriteState, ViewMode, ViewerConfig, ViewerError, ViewerSession};

use support::{ScriptedStore, comic, elapse_periods, user};

fn empty_store() -> Arc<dyn ContentStore> {
    Arc::new(InMemoryStore::new())
}

async fn open(frames: u32, mode: &str) -> ViewerSession {
    ViewerSession::open(
        comic("c-1", frames),
        mode,
        None,
        empty_store(),
        &ViewerConfig::default(),
    )
    .await
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_unknown_mode_falls_back_to_single_view() {
    let session = open(4, "sideways").await;
    assert_eq!(session.policy().mode, ViewMode::SingleView);
    assert!(!session.is_playing());
}

#[tokio::test(start_paused = true)]
async fn test_legacy_mode_ids_open_matching_modes() {
    assert_eq!(open(2, "stall").await.policy().mode, ViewMode::Paged);
    assert_eq!(open(2, "Handicapped").await.policy().mode, ViewMode::AutoPlay);
}

#[tokio::test(start_paused = true)]
async fn test_auto_play_advances_and_wraps() {
    let session = open(3, "auto-play").await;
    assert_eq!(session.current_frame(), 1);

    elapse_periods(1).await;
    assert_eq!(session.current_frame(), 2);
    elapse_periods(1).await;
    assert_eq!(session.current_frame(), 3);
    elapse_periods(1).await;
    assert_eq!(session.current_frame(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_switching_to_auto_play_restarts_at_first_frame() {
    let mut session = open(5, "paged").await;
    session.next();
    session.next();
    assert_eq!(session.current_frame(), 3);

    session.change_mode("auto-play").unwrap();
    assert_eq!(session.current_frame(), 1);
    assert!(session.is_playing());
    assert!(session.is_auto_advancing());

    elapse_periods(1).await;
    assert_eq!(session.current_frame(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_leaving_auto_play_stops_the_timer() {
    let mut session = open(5, "auto-play").await;
    elapse_periods(2).await;
    assert_eq!(session.current_frame(), 3);

    session.change_mode("single-view").unwrap();
    assert_eq!(session.current_frame(), 1);
    assert!(!session.is_playing());
    assert!(!session.is_auto_advancing());

    elapse_periods(5).await;
    assert_eq!(session.current_frame(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pause_freezes_position() {
    let mut session = open(6, "auto-play").await;
    elapse_periods(1).await;

    assert!(!session.toggle_playing().unwrap());
    let frozen = session.current_frame();
    elapse_periods(4).await;
    assert_eq!(session.current_frame(), frozen);

    assert!(session.toggle_playing().unwrap());
    elapse_periods(1).await;
    assert_eq!(session.current_frame(), frozen + 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_steps_ignored_outside_paged() {
    let mut session = open(4, "auto-play").await;
    assert_eq!(session.next(), 1);
    assert_eq!(session.previous(), 1);

    session.change_mode("paged").unwrap();
    assert_eq!(session.next(), 2);
    assert_eq!(session.previous(), 1);
    assert_eq!(session.previous(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_paged_mode_never_auto_advances() {
    let mut session = open(4, "paged").await;
    session.set_playing(true).unwrap();
    elapse_periods(3).await;
    assert_eq!(session.current_frame(), 1);
    assert!(!session.is_playing());
}

#[tokio::test(start_paused = true)]
async fn test_change_comic_rebinds_navigator() {
    let mut session = open(5, "auto-play").await;
    elapse_periods(3).await;
    assert_eq!(session.current_frame(), 4);

    session.change_comic(comic("c-2", 2)).await.unwrap();
    assert_eq!(session.comic().id().as_str(), "c-2");
    assert_eq!(session.position().total, 2);
    assert_eq!(session.current_frame(), 1);
    assert!(session.is_auto_advancing());

    elapse_periods(1).await;
    assert_eq!(session.current_frame(), 2);
    elapse_periods(1).await;
    assert_eq!(session.current_frame(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_reflects_session() {
    let mut session = open(3, "stall").await;
    session.next();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.comic_id, ComicId::new("c-1").unwrap());
    assert_eq!(snapshot.mode, ViewMode::Paged);
    assert_eq!(snapshot.position.to_string(), "2 / 3");
    assert!(snapshot.can_go_previous);
    assert!(snapshot.can_go_next);
    assert!(!snapshot.signed_in);
    assert_eq!(snapshot.favorite, FavoriteState::Unknown);
    assert!(!snapshot.favorited);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["mode"], "paged");
    assert_eq!(json["favorite"], "unknown");
}

#[tokio::test(start_paused = true)]
async fn test_frame_asset_follows_current_frame() {
    let mut session = open(3, "paged").await;
    session.next();
    assert_eq!(
        session.frame_asset(&UrlAssetResolver).await,
        FrameAsset::Ready {
            url: "https://cdn.example/c-1/frame-2".into()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_missing_image_degrades_to_placeholder() {
    let bare = comic_model::Comic::builder(
        ComicId::new("c-bare").unwrap(),
        "No Art Yet",
        comic_model::UserId::new("u-admin").unwrap(),
    )
    .frame_count(2)
    .build()
    .unwrap();
    let session = ViewerSession::open(bare, "paged", None, empty_store(), &ViewerConfig::default())
        .await
        .unwrap();

    let asset = session.frame_asset(&UrlAssetResolver).await;
    assert_eq!(
        asset,
        FrameAsset::Placeholder {
            reason: PlaceholderReason::NoImage
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_favorite_lookup_failure_does_not_fail_open() {
    let store = ScriptedStore::failing_reads().shared();
    let mut session = ViewerSession::open(
        comic("c-1", 2),
        "paged",
        Some(user("u-1")),
        store,
        &ViewerConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(session.favorite_state(), FavoriteState::Unknown);
    let err = session.take_error().expect("lookup error recorded");
    assert!(matches!(err, ViewerError::Store(_)));
    assert!(err.is_retryable());
    assert!(session.take_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_configured_period_drives_ticks() {
    let config = ViewerConfig {
        tick_period_ms: 500,
        ..ViewerConfig::default()
    };
    let session = ViewerSession::open(comic("c-1", 10), "auto-play", None, empty_store(), &config)
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(1_010)).await;
    assert_eq!(session.current_frame(), 3);
}

#[test]
fn test_auto_play_outside_runtime_is_an_error() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let mut session = runtime.block_on(open(3, "paged"));
    drop(runtime);

    assert!(matches!(
        session.change_mode("auto-play"),
        Err(ViewerError::NoRuntime)
    ));
}
