//! # Configuration
//!
//! Attrform configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files, environment variables, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `ATTRFORM__DATE_FORMAT`, `ATTRFORM__PRETTY`, etc.
//! 2. **Config file**: `attrform.toml` in the searched directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `undefined_attributes` | `raise` | Policy for schema files that do not set one |
//! | `date_format` | `%Y-%m-%d` | `to_date` string parsing and date rendering |
//! | `pretty` | `true` | Pretty-print JSON output |

use std::path::Path;

use clapfig::{Clapfig, SearchMode, SearchPath};
use confique::Config;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::attributes::ISO_DATE;
use crate::schema::UndefinedAttributes;

pub const CONFIG_FILE: &str = "attrform.toml";

/// Configuration for attrform, stored in `attrform.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AttrformConfig {
    /// Policy applied to schema files that do not declare `undefined_attributes`
    #[config(default = "raise")]
    pub undefined_attributes: UndefinedAttributes,

    /// chrono format used to parse date strings and render dates
    #[config(default = "%Y-%m-%d")]
    pub date_format: String,

    /// Pretty-print JSON output
    #[config(default = true)]
    pub pretty: bool,
}

impl Default for AttrformConfig {
    fn default() -> Self {
        Self {
            undefined_attributes: UndefinedAttributes::Raise,
            date_format: ISO_DATE.to_string(),
            pretty: true,
        }
    }
}

impl AttrformConfig {
    /// Load `attrform.toml` from `dir`, layered over the defaults.
    ///
    /// A missing file yields the defaults. An unreadable or invalid one is
    /// logged at `warn` and also yields the defaults.
    pub fn load(dir: &Path) -> Self {
        let loaded = Clapfig::builder()
            .app_name("attrform")
            .file_name(CONFIG_FILE)
            .search_paths(vec![SearchPath::Path(dir.to_path_buf())])
            .search_mode(SearchMode::Merge)
            .load();
        match loaded {
            Ok(config) => config,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "ignoring invalid configuration");
                Self::default()
            }
        }
    }

    /// Date format, falling back to ISO when the configured one is blank.
    pub fn date_format(&self) -> &str {
        if self.date_format.trim().is_empty() {
            ISO_DATE
        } else {
            &self.date_format
        }
    }
}
