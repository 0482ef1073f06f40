//! Opponent style preset loader.
//!
//! File format: one TOML table per style, keyed by name.
//!
//! ```toml
//! [pressure]
//! aggressive_stamina_ratio = 0.45
//! finishing_health_ratio = 0.4
//! ```

use std::path::Path;

use bout_core::MatchConfig;

use crate::loaders::{LoadResult, read_file};
use crate::styles::StyleRegistry;

/// Bundled extra styles.
pub const DEFAULT_STYLES_TOML: &str = include_str!("../../data/styles.toml");

pub struct StyleLoader;

impl StyleLoader {
    /// Loads the styles in `path` on top of the built-in set.
    pub fn load(path: &Path) -> LoadResult<StyleRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid style file {}: {}", path.display(), e))
    }

    /// Parses styles from TOML text and merges them over the built-in set.
    pub fn parse(content: &str) -> LoadResult<StyleRegistry> {
        let parsed: StyleRegistry = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse styles TOML: {}", e))?;
        let mut loaded = StyleRegistry::new();
        loaded.merge(parsed);

        for name in loaded.names() {
            let candidate = MatchConfig {
                opponent: loaded.resolve(name).map_err(anyhow::Error::msg)?,
                ..MatchConfig::default()
            };
            candidate
                .validate()
                .map_err(|e| anyhow::anyhow!("style '{}': {}", name, e))?;
        }

        let mut registry = StyleRegistry::builtin();
        registry.merge(loaded);
        Ok(registry)
    }

    /// Built-in styles plus the bundled extras.
    pub fn bundled() -> LoadResult<StyleRegistry> {
        Self::parse(DEFAULT_STYLES_TOML)
    }
}
