//! Subcommands of the `cybercity` binary.

mod manage;
mod skirmish;
mod status;

pub use manage::{Allocate, Fund};
pub use skirmish::{BattleEnd, SQUAD_ORIGIN, Skirmish, run_battle};
pub use status::Status;

use std::path::{Path, PathBuf};

use anyhow::Result;
use game_content::{SnapshotLoader, SnapshotWriter};
use game_core::Campaign;
use tracing::info;

use crate::config::ClientConfig;
use crate::dirs;

/// Save file precedence: flag, then `CYBERCITY_SAVE`, then the platform data dir.
pub(crate) fn resolve_save_path(flag: Option<PathBuf>, client: &ClientConfig) -> PathBuf {
    flag.or_else(|| client.save_path.clone())
        .unwrap_or_else(dirs::default_save_path)
}

/// Loads the campaign at `path`, or starts a new one when no save exists yet.
pub fn load_campaign(path: &Path) -> Result<Campaign> {
    if !path.exists() {
        info!(path = %path.display(), "no save file, starting a new campaign");
        return Ok(Campaign::new());
    }
    let snapshot = SnapshotLoader::load(path)?;
    Ok(Campaign::from_snapshot(snapshot))
}

pub fn save_campaign(path: &Path, campaign: &Campaign) -> Result<()> {
    SnapshotWriter::save(path, &campaign.to_snapshot())?;
    info!(path = %path.display(), turn = campaign.turn, "campaign saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_save_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let campaign = load_campaign(&dir.path().join("campaign.json")).unwrap();

        assert_eq!(campaign, Campaign::new());
    }

    #[test]
    fn flag_beats_environment() {
        let client = ClientConfig {
            save_path: Some(PathBuf::from("env.json")),
            ..ClientConfig::default()
        };

        assert_eq!(
            resolve_save_path(Some(PathBuf::from("flag.json")), &client),
            PathBuf::from("flag.json")
        );
        assert_eq!(resolve_save_path(None, &client), PathBuf::from("env.json"));
    }
}
