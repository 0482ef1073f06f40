//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use bout_runtime::RuntimeConfig;

/// Configuration for one CLI session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub runtime: RuntimeConfig,
    /// Match tuning file. `None` uses the bundled defaults.
    pub config_path: Option<PathBuf>,
    /// Extra opponent styles merged over the built-in ones.
    pub styles_path: Option<PathBuf>,
    /// Opponent style name.
    pub style: String,
    /// Seconds of match time each command covers.
    pub tick_seconds: f64,
    /// Let the controller fight for the primary corner as well.
    pub autoplay: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            config_path: None,
            styles_path: None,
            style: "balanced".to_string(),
            tick_seconds: 2.0,
            autoplay: false,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOUT_CONFIG` - Match tuning TOML (default: bundled)
    /// - `BOUT_STYLES` - Extra opponent styles TOML (default: bundled)
    /// - `BOUT_STYLE` - Opponent style name (default: balanced)
    /// - `BOUT_TICK_SECONDS` - Match seconds per command (default: 2.0)
    /// - `BOUT_AUTOPLAY` - Autoplay the primary fighter (default: false)
    /// - plus everything [`RuntimeConfig::from_env`] reads
    pub fn from_env() -> Self {
        let mut config = Self {
            runtime: RuntimeConfig::from_env(),
            ..Self::default()
        };

        config.config_path = env::var("BOUT_CONFIG").ok().map(PathBuf::from);
        config.styles_path = env::var("BOUT_STYLES").ok().map(PathBuf::from);

        if let Ok(style) = env::var("BOUT_STYLE") {
            config.style = style;
        }

        if let Some(seconds) = read_env::<f64>("BOUT_TICK_SECONDS")
            && seconds.is_finite()
            && seconds > 0.0
        {
            config.tick_seconds = seconds;
        }

        if let Some(enable) = read_env::<bool>("BOUT_AUTOPLAY") {
            config.autoplay = enable;
        } else if env::var("BOUT_AUTOPLAY").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.autoplay = true;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
