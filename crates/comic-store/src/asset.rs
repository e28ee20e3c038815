//! Asset delivery: turning an image reference into a fetchable frame.
//!
//! Resolution failures never propagate to the viewer. [`load_frame_asset`]
//! degrades every failure to a [`FrameAsset::Placeholder`] and logs it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by an [`AssetResolver`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The image reference is not something the resolver understands.
    #[error("unsupported image reference: {0}")]
    Unsupported(String),

    /// The asset exists in principle but could not be delivered.
    #[error("asset unavailable: {0}")]
    Unavailable(String),
}

/// Why a placeholder is shown instead of the frame image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    /// The comic has no image reference.
    NoImage,
    /// Resolving or fetching the image failed.
    LoadFailed,
}

impl PlaceholderReason {
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoImage => "No image available",
            Self::LoadFailed => "Image could not be loaded",
        }
    }
}

/// Render-ready state of one frame image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FrameAsset {
    Ready { url: String },
    Placeholder { reason: PlaceholderReason },
}

impl FrameAsset {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Resolves an image reference and frame number into a fetchable location.
#[async_trait]
pub trait AssetResolver: Send + Sync {
    async fn resolve(&self, image_url: &str, frame: u32) -> Result<String, AssetError>;
}

/// Frame URL for a comic image following the `<base>/frame-<n>` convention.
pub fn frame_url(base: &str, frame: u32) -> String {
    format!("{}/frame-{}", base.trim_end_matches('/'), frame)
}

/// Resolver for image references that are plain HTTP(S) URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlAssetResolver;

#[async_trait]
impl AssetResolver for UrlAssetResolver {
    async fn resolve(&self, image_url: &str, frame: u32) -> Result<String, AssetError> {
        if image_url.starts_with("https://") || image_url.starts_with("http://") {
            Ok(frame_url(image_url, frame))
        } else {
            Err(AssetError::Unsupported(image_url.to_string()))
        }
    }
}

/// Resolve a frame, degrading to a placeholder on any failure.
pub async fn load_frame_asset<R>(resolver: &R, image_url: &str, frame: u32) -> FrameAsset
where
    R: AssetResolver + ?Sized,
{
    if image_url.trim().is_empty() {
        return FrameAsset::Placeholder {
            reason: PlaceholderReason::NoImage,
        };
    }
    match resolver.resolve(image_url, frame).await {
        Ok(url) => FrameAsset::Ready { url },
        Err(error) => {
            tracing::warn!(image_url, frame, %error, "failed to load comic image");
            FrameAsset::Placeholder {
                reason: PlaceholderReason::LoadFailed,
            }
        }
    }
}
