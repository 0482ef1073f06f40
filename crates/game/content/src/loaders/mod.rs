//! Content loaders for reading match data from files.
//!
//! Every loader parses TOML straight into `bout-core` types through serde and
//! validates the result before handing it out.

pub mod config;
pub mod styles;

pub use config::ConfigLoader;
pub use styles::StyleLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
