//! Encounter table loader.

use std::path::Path;

use crate::encounter::{EncounterSpec, EnemySpawn};
use crate::loaders::{LoadResult, read_file};

/// Loader for encounter tables from RON files.
///
/// RON format: `Vec<EnemySpawn>`
///
/// ```ron
/// [
///     (name: "Street Drone", level: 1, position: (7, 7)),
///     (name: "Enforcer", level: 3, str: 4, defense: 2, position: (9, 4)),
/// ]
/// ```
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse encounter RON {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        let spawns: Vec<EnemySpawn> = ron::from_str(content)?;
        Ok(EncounterSpec::new(spawns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_attributes_default_to_one() {
        let spec = EncounterLoader::parse(
            r#"[
                (name: "Street Drone", level: 1, position: (7, 7)),
                (name: "Enforcer", level: 3, str: 4, position: (9, 4)),
            ]"#,
        )
        .unwrap();

        assert_eq!(spec.spawns.len(), 2);
        assert_eq!(spec.spawns[0], EnemySpawn::new("Street Drone", 1, (7, 7)));
        assert_eq!(spec.spawns[1].str, 4);
        assert_eq!(spec.spawns[1].defense, 1);
    }

    #[test]
    fn malformed_table_is_an_error() {
        assert!(EncounterLoader::parse("[(name: 5)]").is_err());
    }
}
