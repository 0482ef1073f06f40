//! Match configuration loader.

use std::path::Path;

use bout_core::MatchConfig;

use crate::loaders::{LoadResult, read_file};

/// Bundled default configuration.
pub const DEFAULT_MATCH_TOML: &str = include_str!("../../data/match.toml");

/// Loader for match configuration from TOML files.
///
/// Keys missing from the file keep their `MatchConfig::default()` values, so a
/// file only needs to name what it changes.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a `MatchConfig` from a TOML file.
    pub fn load(path: &Path) -> LoadResult<MatchConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid match config {}: {}", path.display(), e))
    }

    /// Parse and validate a `MatchConfig` from TOML text.
    pub fn parse(content: &str) -> LoadResult<MatchConfig> {
        let config: MatchConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration bundled with this crate.
    pub fn bundled() -> LoadResult<MatchConfig> {
        Self::parse(DEFAULT_MATCH_TOML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_file_matches_defaults() {
        assert_eq!(ConfigLoader::bundled().unwrap(), MatchConfig::default());
    }

    #[test]
    fn partial_files_override_only_named_keys() {
        let config = ConfigLoader::parse(
            r#"
            round_duration = 120.0
            max_knockdowns = 2

            [actions.hook]
            power = 12
            stamina_cost = 14.0
            "#,
        )
        .unwrap();

        assert_eq!(config.round_duration, 120.0);
        assert_eq!(config.max_knockdowns, 2);
        assert_eq!(config.actions.hook.power, 12);
        assert_eq!(config.actions.jab, MatchConfig::default().actions.jab);
        assert_eq!(config.between_rounds_duration, 60.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("round_duration = -5.0").unwrap_err();
        assert!(err.to_string().contains("round_duration"), "{err}");

        assert!(ConfigLoader::parse("round_duration = \"long\"").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "count_limit = 8.0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.count_limit, 8.0);

        let missing = ConfigLoader::load(Path::new("/definitely/not/here.toml"));
        assert!(missing.unwrap_err().to_string().contains("Failed to read file"));
    }
}
