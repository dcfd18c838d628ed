use std::fs;

use game_content::{ConfigLoader, EncounterLoader, SnapshotLoader, SnapshotWriter};
use game_core::{
    AttackKind, Battle, Campaign, CombatConfig, CombatStats, CorpAccount, PlayerStats, Position,
    ProgressionService, ScriptedRng, TurnController,
};

#[test]
fn campaign_survives_a_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves").join("campaign.json");

    let mut campaign = Campaign::new();
    campaign.recruit();
    campaign.recruit();
    campaign.allocate_corp_funds(CorpAccount::Security, 40).unwrap();
    campaign.advance_turn();
    campaign.characters[1].stats.set_hp(3);

    SnapshotWriter::save(&path, &campaign.to_snapshot()).unwrap();
    let restored = Campaign::from_snapshot(SnapshotLoader::load(&path).unwrap());

    assert_eq!(restored, campaign);
}

#[test]
fn missing_save_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SnapshotLoader::load(&dir.path().join("nope.json")).unwrap_err();

    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn corrupt_save_file_loads_as_new_campaign() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campaign.json");
    fs::write(&path, "{ truncated").unwrap();

    let campaign = Campaign::from_snapshot(SnapshotLoader::load(&path).unwrap());

    assert_eq!(campaign, Campaign::new());
}

#[test]
fn battle_results_persist_through_the_save_file() {
    let dir = tempfile::tempdir().unwrap();
    let encounter_path = dir.path().join("encounter.ron");
    let save_path = dir.path().join("campaign.json");
    fs::write(
        &encounter_path,
        r#"[ (name: "Street Drone", level: 2, position: (1, 0)) ]"#,
    )
    .unwrap();

    let mut campaign = Campaign::new();
    campaign.recruit();
    campaign.characters[0].stats = PlayerStats::new(1, 1, 1, 30, 1, 1, 1);
    let encounter = EncounterLoader::load(&encounter_path).unwrap();

    let report = {
        let mut battle = Battle::new();
        battle.deploy_roster(&mut campaign.characters, Position::ORIGIN);
        encounter.spawn_into(&mut battle);
        let mut controller =
            TurnController::new(battle, ScriptedRng::always_hit(), CombatConfig::default());
        controller.declare_attack(AttackKind::Melee).unwrap();
        controller.confirm_target().unwrap();
        controller.run_enemy_turn().unwrap();
        controller.report().unwrap()
    };
    assert!(report.is_victory());
    ProgressionService::apply(&mut campaign.characters, &report);
    SnapshotWriter::save(&save_path, &campaign.to_snapshot()).unwrap();

    let restored = Campaign::from_snapshot(SnapshotLoader::load(&save_path).unwrap());
    assert_eq!(restored.characters[0].stats.xp(), 0);
    assert_eq!(restored.characters[0].stats.level(), 2);
    assert_eq!(restored.characters[0].pending_points, 5);
}

#[test]
fn config_file_overrides_ranges() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combat.toml");
    fs::write(&path, "ranged_range = 4\nxp_per_enemy_level = 10\n").unwrap();

    let config = ConfigLoader::load(&path).unwrap();

    assert_eq!(config.range_for(AttackKind::Ranged), 4);
    assert_eq!(config.xp_per_enemy_level, 10);
    assert_eq!(config.range_for(AttackKind::Melee), 1);
}
