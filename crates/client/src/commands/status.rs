//! Campaign overview.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use game_core::{Campaign, CombatStats};

use crate::config::ClientConfig;

use super::{load_campaign, resolve_save_path};

/// Print the roster and budgets
#[derive(Parser, Debug)]
pub struct Status {
    /// Campaign save file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

impl Status {
    pub fn execute(self, client: &ClientConfig) -> Result<()> {
        let save_path = resolve_save_path(self.save, client);
        let campaign = load_campaign(&save_path)?;
        print!("{}", render(&campaign));
        Ok(())
    }
}

pub(crate) fn render(campaign: &Campaign) -> String {
    let mut out = format!(
        "Turn {}  budget pool {}\n",
        campaign.turn, campaign.budget_pool
    );

    out.push_str("Corporation:\n");
    for (account, amount) in campaign.corp_budget() {
        out.push_str(&format!("  {:<14}{amount:>6}\n", account.as_ref()));
    }
    out.push_str("City:\n");
    for (account, amount) in campaign.city_budget() {
        out.push_str(&format!("  {:<14}{amount:>6}\n", account.as_ref()));
    }

    if campaign.characters.is_empty() {
        out.push_str("Roster: empty\n");
        return out;
    }
    out.push_str("Roster:\n");
    for character in &campaign.characters {
        let stats = &character.stats;
        out.push_str(&format!(
            "  {} ({}) lvl {} hp {}/{} xp {} str {} agi {} psi {} def {} con {} cha {}",
            character.name,
            character.role,
            stats.level(),
            stats.hp(),
            stats.max_hp(),
            stats.xp(),
            stats.str,
            stats.agi,
            stats.psi,
            stats.defense,
            stats.con(),
            stats.cha,
        ));
        if character.pending_points > 0 {
            out.push_str(&format!(" [{} point(s) to spend]", character.pending_points));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_accounts_and_characters() {
        let mut campaign = Campaign::new();
        campaign.recruit();
        campaign.characters[0].pending_points = 5;

        let text = render(&campaign);

        assert!(text.starts_with("Turn 1  budget pool 100\n"));
        assert!(text.contains("black_ops"));
        assert!(text.contains("defense_zones"));
        assert!(text.contains("Agent 1 (agent) lvl 1 hp 11/11"));
        assert!(text.contains("[5 point(s) to spend]"));
    }
}
