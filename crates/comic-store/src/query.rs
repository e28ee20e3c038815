//! List query for the comic library.

use comic_model::Comic;
use serde::{Deserialize, Serialize};

/// Filter and limit applied when listing comics.
///
/// Results are always ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicQuery {
    /// Case-insensitive title substring, or an exact tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Maximum number of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ComicQuery {
    /// Query returning every comic.
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `comic` passes the search filter.
    pub fn matches(&self, comic: &Comic) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        comic
            .title()
            .to_lowercase()
            .contains(&term.to_lowercase())
            || comic.has_tag(term)
    }

    /// Filter, order newest first, and truncate.
    pub fn apply<'a, I>(&self, comics: I) -> Vec<Comic>
    where
        I: IntoIterator<Item = &'a Comic>,
    {
        let mut selected: Vec<Comic> = comics
            .into_iter()
            .filter(|comic| self.matches(comic))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}
