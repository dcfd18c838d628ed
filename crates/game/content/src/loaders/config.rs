//! Combat configuration loader.

use std::path::Path;

use game_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`CombatConfig`] from TOML files.
///
/// Every field is optional; omitted ones keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)?;
        Ok(config)
    }
}
