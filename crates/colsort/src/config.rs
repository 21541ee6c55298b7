#![forbid(unsafe_code)]

//! Board tunables as data.
//!
//! Every knob the board exposes lives in [`BoardConfig`], loadable from JSON
//! (always) or TOML (with the `config-file` feature):
//!
//! ```toml
//! # colsort.toml
//! notice_duration_ms = 4000
//! max_notices = 2
//! history_depth = 20
//! ```
//!
//! ```rust,ignore
//! let config = BoardConfig::from_toml_file("colsort.toml")?;
//! let board = Board::new(distribution, config)?;
//! ```
//!
//! Missing fields take their defaults. Loaders do not validate; the board
//! does when it is constructed.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notice::NoticeConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// How long a rejection notice stays visible.
    pub notice_duration_ms: u64,
    /// Identical notices within this window are shown once.
    pub notice_dedup_window_ms: u64,
    /// Maximum simultaneously visible notices.
    pub max_notices: usize,
    /// Undo steps kept. Zero disables undo.
    pub history_depth: usize,
    /// Opacity of the floating ghost, in `(0, 1]`.
    pub ghost_opacity: f32,
    /// Opacity of the source element while its item is dragged, in `[0, 1]`.
    pub source_opacity: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            notice_duration_ms: 3000,
            notice_dedup_window_ms: 1000,
            max_notices: 3,
            history_depth: 50,
            ghost_opacity: 0.8,
            source_opacity: 0.4,
        }
    }
}

impl BoardConfig {
    #[must_use]
    pub fn notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration_ms = duration_ms(duration);
        self
    }

    #[must_use]
    pub fn notice_dedup_window(mut self, window: Duration) -> Self {
        self.notice_dedup_window_ms = duration_ms(window);
        self
    }

    #[must_use]
    pub fn max_notices(mut self, max: usize) -> Self {
        self.max_notices = max;
        self
    }

    #[must_use]
    pub fn history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    #[must_use]
    pub fn ghost_opacity(mut self, opacity: f32) -> Self {
        self.ghost_opacity = opacity;
        self
    }

    #[must_use]
    pub fn source_opacity(mut self, opacity: f32) -> Self {
        self.source_opacity = opacity;
        self
    }

    /// Notice queue settings derived from this config.
    #[must_use]
    pub fn notice_config(&self) -> NoticeConfig {
        NoticeConfig {
            duration: Duration::from_millis(self.notice_duration_ms),
            dedup_window: Duration::from_millis(self.notice_dedup_window_ms),
            max_visible: self.max_notices,
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Range checks. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.notice_duration_ms == 0 {
            errors.push("notice_duration_ms must be > 0".into());
        }
        if self.max_notices == 0 {
            errors.push("max_notices must be > 0".into());
        }
        if !(self.ghost_opacity > 0.0 && self.ghost_opacity <= 1.0) {
            errors.push(format!(
                "ghost_opacity must be in (0, 1], got {}",
                self.ghost_opacity
            ));
        }
        if !(0.0..=1.0).contains(&self.source_opacity) {
            errors.push(format!(
                "source_opacity must be in [0, 1], got {}",
                self.source_opacity
            ));
        }
        errors
    }

    /// [`Self::validate`] as a `Result`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
