//! Headless skirmish: one battle fought by the autopilot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use game_content::{ConfigLoader, EncounterLoader, EncounterSpec};
use game_core::{
    ActionError, Battle, BattleReport, Character, CombatConfig, EnemyAction, Fallen, PcgRng,
    Position, ProgressionService, RngOracle, Side, TurnController,
};
use tracing::{debug, info, warn};

use crate::autopilot::Autopilot;
use crate::config::ClientConfig;

use super::{load_campaign, resolve_save_path, save_campaign};

/// Where the first deployed character stands; the rest line up to its right.
pub const SQUAD_ORIGIN: Position = Position::ORIGIN;

/// Fight one battle with the current roster and save the result
#[derive(Parser, Debug)]
pub struct Skirmish {
    /// Campaign save file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Encounter table (RON); defaults to a single level-1 drone
    #[arg(long)]
    pub encounter: Option<PathBuf>,

    /// Combat rules (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RNG seed for a replayable battle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up after this many turns without a result
    #[arg(long, default_value_t = 50)]
    pub max_turns: u32,
}

impl Skirmish {
    pub fn execute(self, client: &ClientConfig) -> Result<()> {
        let save_path = resolve_save_path(self.save, client);
        let mut campaign = load_campaign(&save_path)?;
        if campaign.characters.is_empty() {
            let recruit = campaign.recruit();
            info!(name = %recruit.name, "recruited");
        }

        let config = match self.config.or_else(|| client.combat_config.clone()) {
            Some(path) => ConfigLoader::load(&path)?,
            None => CombatConfig::default(),
        };
        let encounter = match self.encounter {
            Some(path) => {
                let encounter = EncounterLoader::load(&path)?;
                anyhow::ensure!(
                    !encounter.is_empty(),
                    "encounter {} spawns no enemies",
                    path.display()
                );
                encounter
            }
            None => EncounterSpec::skirmish(),
        };
        let seed = self.seed.or(client.seed).unwrap_or_else(rand::random);

        info!(
            seed,
            campaign_turn = campaign.turn,
            squad = campaign.characters.len(),
            enemies = encounter.spawns.len(),
            "skirmish start"
        );

        let end = run_battle(
            &mut campaign.characters,
            &encounter,
            config,
            PcgRng::seeded(seed),
            &Autopilot::default(),
            self.max_turns,
        )?;

        match end {
            BattleEnd::Resolved(report) => {
                println!(
                    "{} after {} turn(s), {} XP each",
                    report.outcome, report.turns, report.xp_award
                );
                let summary = ProgressionService::apply(&mut campaign.characters, &report);
                for progress in &summary.progress {
                    if progress.levels_gained > 0 {
                        println!("  {} reached level {}", progress.name, progress.level);
                    }
                }
                for name in &summary.removed {
                    println!("  {name} was lost");
                }
            }
            BattleEnd::Abandoned { fallen } => {
                println!("Battle abandoned after {} turn(s)", self.max_turns);
                for name in ProgressionService::remove_casualties(&mut campaign.characters, &fallen)
                {
                    println!("  {name} was lost");
                }
            }
        }

        save_campaign(&save_path, &campaign)?;
        println!("Seed {seed}; saved to {}", save_path.display());
        Ok(())
    }
}

/// How a skirmish finished.
#[derive(Debug)]
pub enum BattleEnd {
    Resolved(BattleReport),
    /// Turn limit reached with both sides standing. Characters that fell
    /// before that still have to leave the roster.
    Abandoned { fallen: Vec<Fallen> },
}

/// Runs one battle to completion with the autopilot on the player side.
///
/// HP changes reach `characters` whether or not the battle resolves.
pub fn run_battle<R: RngOracle>(
    characters: &mut [Character],
    encounter: &EncounterSpec,
    config: CombatConfig,
    rng: R,
    autopilot: &Autopilot,
    max_turns: u32,
) -> Result<BattleEnd, ActionError> {
    let mut battle = Battle::new();
    battle.deploy_roster(characters, SQUAD_ORIGIN);
    encounter.spawn_into(&mut battle);
    let mut controller = TurnController::new(battle, rng, config);

    while !controller.is_over() {
        if controller.turn_number() > max_turns {
            warn!(max_turns, "turn limit reached");
            return Ok(abandon(&controller));
        }

        for report in autopilot.play_phase(&mut controller)? {
            debug!(?report, "player action");
        }

        let phase = controller.run_enemy_turn()?;
        for action in &phase.actions {
            if let EnemyAction::Strike {
                actor,
                target,
                result,
                ..
            } = action
            {
                debug!(%actor, %target, damage = result.damage_dealt(), "enemy strike");
            }
        }
        for fallen in &phase.fallen {
            info!(name = %fallen.name, side = %fallen.side, turn = fallen.turn, "unit down");
        }
    }

    Ok(match controller.report() {
        Some(report) => BattleEnd::Resolved(report),
        None => abandon(&controller),
    })
}

fn abandon<R: RngOracle>(controller: &TurnController<'_, R>) -> BattleEnd {
    let fallen = controller
        .battle()
        .fallen()
        .iter()
        .filter(|fallen| fallen.side == Side::Player)
        .cloned()
        .collect();
    BattleEnd::Abandoned { fallen }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::{EnemySpawn, SnapshotLoader, SnapshotWriter};
    use game_core::{BattleOutcome, Campaign, CombatStats, PlayerStats, ScriptedRng};

    fn resolved(end: BattleEnd) -> BattleReport {
        match end {
            BattleEnd::Resolved(report) => report,
            other => panic!("battle did not resolve: {other:?}"),
        }
    }

    #[test]
    fn strong_agent_clears_the_default_encounter() {
        let mut roster =
            vec![Character::new("Agent 1").with_stats(PlayerStats::new(1, 1, 1, 20, 20, 1, 1))];

        let report = run_battle(
            &mut roster,
            &EncounterSpec::skirmish(),
            CombatConfig::default(),
            ScriptedRng::always_hit(),
            &Autopilot::default(),
            10,
        )
        .map(resolved)
        .unwrap();

        assert_eq!(report.outcome, BattleOutcome::Victory);
        assert_eq!(report.xp_award, 50);
        assert_eq!(report.survivors.len(), 1);
    }

    #[test]
    fn hopeless_battle_is_a_defeat() {
        let mut roster = vec![Character::new("Agent 1")];
        let encounter = EncounterSpec::new(vec![EnemySpawn {
            str: 50,
            defense: 50,
            ..EnemySpawn::new("Warlord", 9, (1, 0))
        }]);

        let report = run_battle(
            &mut roster,
            &encounter,
            CombatConfig::default(),
            ScriptedRng::always_hit(),
            &Autopilot::default(),
            10,
        )
        .map(resolved)
        .unwrap();

        assert_eq!(report.outcome, BattleOutcome::Defeat);
        assert_eq!(roster[0].stats.hp(), 0);
    }

    #[test]
    fn undecided_battle_hits_the_turn_limit() {
        let mut roster = vec![Character::new("Agent 1")];

        let end = run_battle(
            &mut roster,
            &EncounterSpec::skirmish(),
            CombatConfig::default(),
            ScriptedRng::always_miss(),
            &Autopilot::default(),
            3,
        )
        .unwrap();

        assert!(matches!(&end, BattleEnd::Abandoned { fallen } if fallen.is_empty()));
        assert_eq!(roster[0].stats.hp(), roster[0].stats.max_hp());
    }

    #[test]
    fn abandoned_battle_still_buries_the_dead() {
        let mut campaign = Campaign::new();
        campaign.recruit();
        campaign.recruit();
        // Adjacent to Agent 1 only; Agent 2 stands at (1, 0), two cells away.
        let encounter = EncounterSpec::new(vec![EnemySpawn {
            str: 50,
            defense: 50,
            ..EnemySpawn::new("Warlord", 9, (-1, 0))
        }]);

        let end = run_battle(
            &mut campaign.characters,
            &encounter,
            CombatConfig::default(),
            ScriptedRng::always_hit(),
            &Autopilot::default(),
            1,
        )
        .unwrap();

        let BattleEnd::Abandoned { fallen } = end else {
            panic!("expected the turn limit to end the battle");
        };
        assert_eq!(fallen.len(), 1);
        assert_eq!(campaign.characters[0].stats.hp(), 0);

        let removed = ProgressionService::remove_casualties(&mut campaign.characters, &fallen);
        assert_eq!(removed, ["Agent 1"]);

        let text = SnapshotWriter::to_string(&campaign.to_snapshot()).unwrap();
        let reloaded = Campaign::from_snapshot(SnapshotLoader::parse(&text));
        let names: Vec<_> = reloaded.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Agent 2"]);
        assert_eq!(reloaded, campaign);
    }

    #[test]
    fn empty_encounter_file_is_rejected_before_saving() {
        let dir = tempfile::tempdir().unwrap();
        let encounter = dir.path().join("empty.ron");
        std::fs::write(&encounter, "[]").unwrap();
        let save = dir.path().join("campaign.json");

        let result = Skirmish {
            save: Some(save.clone()),
            encounter: Some(encounter),
            config: None,
            seed: Some(1),
            max_turns: 5,
        }
        .execute(&ClientConfig::default());

        assert!(result.is_err());
        assert!(!save.exists());
    }
}
