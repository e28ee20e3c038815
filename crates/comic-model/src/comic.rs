//! Comic records as stored in the content store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::{ComicId, UserId};

/// A published comic.
///
/// A `Comic` always has at least one frame; records with a zero frame count
/// are rejected when they are built or deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ComicRecord", into = "ComicRecord")]
pub struct Comic {
    id: ComicId,
    title: String,
    image_url: String,
    creator_id: UserId,
    frame_count: u32,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

/// Unvalidated wire shape of a comic row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicRecord {
    pub id: ComicId,
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    pub creator_id: UserId,
    pub frame_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Comic {
    /// Start building a comic with the required fields.
    pub fn builder(id: ComicId, title: impl Into<String>, creator_id: UserId) -> ComicBuilder {
        ComicBuilder {
            record: ComicRecord {
                id,
                title: title.into(),
                image_url: String::new(),
                creator_id,
                frame_count: 1,
                tags: Vec::new(),
                created_at: Utc::now(),
            },
        }
    }

    pub fn id(&self) -> &ComicId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Image reference; empty when the comic has no image yet.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn creator_id(&self) -> &UserId {
        &self.creator_id
    }

    /// Number of frames, always `>= 1`.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the comic carries `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl TryFrom<ComicRecord> for Comic {
    type Error = ModelError;

    fn try_from(record: ComicRecord) -> Result<Self> {
        if record.frame_count == 0 {
            return Err(ModelError::ZeroFrameCount {
                id: record.id.to_string(),
            });
        }
        let title = record.title.trim();
        if title.is_empty() {
            return Err(ModelError::EmptyTitle {
                id: record.id.to_string(),
            });
        }
        Ok(Self {
            title: title.to_string(),
            id: record.id,
            image_url: record.image_url.trim().to_string(),
            creator_id: record.creator_id,
            frame_count: record.frame_count,
            tags: record.tags,
            created_at: record.created_at,
        })
    }
}

impl From<Comic> for ComicRecord {
    fn from(comic: Comic) -> Self {
        Self {
            id: comic.id,
            title: comic.title,
            image_url: comic.image_url,
            creator_id: comic.creator_id,
            frame_count: comic.frame_count,
            tags: comic.tags,
            created_at: comic.created_at,
        }
    }
}

/// Builder for [`Comic`]; validation happens in [`ComicBuilder::build`].
#[derive(Debug, Clone)]
pub struct ComicBuilder {
    record: ComicRecord,
}

impl ComicBuilder {
    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.record.image_url = url.into();
        self
    }

    #[must_use]
    pub fn frame_count(mut self, frame_count: u32) -> Self {
        self.record.frame_count = frame_count;
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.record.created_at = created_at;
        self
    }

    pub fn build(self) -> Result<Comic> {
        Comic::try_from(self.record)
    }
}
