//! View modes and the registry that resolves them.
//!
//! | Mode        | Id            | Legacy id     | Manual nav | Auto-advance | Wrap |
//! |-------------|---------------|---------------|------------|--------------|------|
//! | Single view | `single-view` | `urinal`      | no         | no           | no   |
//! | Paged       | `paged`       | `stall`       | yes        | no           | no   |
//! | Auto-play   | `auto-play`   | `handicapped` | no         | yes          | yes  |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Presentation mode of a viewer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Whole comic at once.
    #[default]
    SingleView,
    /// One frame at a time with previous/next controls.
    Paged,
    /// One frame at a time, advanced by a timer.
    AutoPlay,
}

impl ViewMode {
    /// All modes in display order.
    pub const ALL: [ViewMode; 3] = [Self::SingleView, Self::Paged, Self::AutoPlay];

    /// Canonical identifier used in links and on the command line.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::SingleView => "single-view",
            Self::Paged => "paged",
            Self::AutoPlay => "auto-play",
        }
    }

    /// Identifier used by earlier product links.
    pub const fn legacy_id(&self) -> &'static str {
        match self {
            Self::SingleView => "urinal",
            Self::Paged => "stall",
            Self::AutoPlay => "handicapped",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingleView => "Single View",
            Self::Paged => "Paged",
            Self::AutoPlay => "Auto-Play",
        }
    }

    /// Behavioral contract of this mode.
    pub const fn policy(&self) -> ModePolicy {
        match self {
            Self::SingleView => ModePolicy {
                mode: Self::SingleView,
                allows_manual_navigation: false,
                auto_advance_enabled: false,
                wrap_on_advance: false,
            },
            Self::Paged => ModePolicy {
                mode: Self::Paged,
                allows_manual_navigation: true,
                auto_advance_enabled: false,
                wrap_on_advance: false,
            },
            Self::AutoPlay => ModePolicy {
                mode: Self::AutoPlay,
                allows_manual_navigation: false,
                auto_advance_enabled: true,
                wrap_on_advance: true,
            },
        }
    }

    fn parse(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL.into_iter().find(|mode| {
            needle.eq_ignore_ascii_case(mode.id()) || needle.eq_ignore_ascii_case(mode.legacy_id())
        })
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Navigation and playback rules attached to a [`ViewMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModePolicy {
    pub mode: ViewMode,
    pub allows_manual_navigation: bool,
    pub auto_advance_enabled: bool,
    pub wrap_on_advance: bool,
}

impl ModePolicy {
    pub const fn label(&self) -> &'static str {
        self.mode.label()
    }
}

impl Default for ModePolicy {
    fn default() -> Self {
        ViewMode::default().policy()
    }
}

/// Maps caller-supplied mode identifiers to policies.
///
/// Resolution never fails: anything unrecognized falls back to the
/// single-view policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewModeRegistry;

impl ViewModeRegistry {
    /// Resolve a mode identifier (canonical or legacy, case-insensitive).
    pub fn resolve(mode_id: &str) -> ModePolicy {
        match ViewMode::parse(mode_id) {
            Some(mode) => mode.policy(),
            None => {
                tracing::debug!(mode_id, "unrecognized view mode, using single-view");
                ModePolicy::default()
            }
        }
    }

    /// Resolve an optional query parameter.
    pub fn resolve_optional(mode_id: Option<&str>) -> ModePolicy {
        mode_id.map_or_else(ModePolicy::default, Self::resolve)
    }

    /// Every mode with its policy, in display order.
    pub fn modes() -> impl Iterator<Item = ModePolicy> {
        ViewMode::ALL.into_iter().map(|mode| mode.policy())
    }
}
