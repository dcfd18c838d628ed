//! Turn-based tactical combat rules for CyberCity.
//!
//! `game-core` holds the deterministic combat model and the campaign state
//! around it. It performs no I/O: randomness comes in through [`RngOracle`],
//! persistence lives in `game-content`, and presentation is the caller's job.
//!
//! A battle flows through three layers:
//!
//! - [`state`]: characters, units and the [`Battle`] aggregate
//! - [`engine`]: the [`TurnController`] phase machine driving player commands
//!   and the enemy phase ([`ai`])
//! - [`progression`]: experience and casualties applied to the roster once the
//!   battle is over
pub mod ai;
pub mod campaign;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod progression;
pub mod rng;
pub mod state;
pub mod stats;

pub use ai::{EnemyAction, EnemyContext};
pub use campaign::{
    Campaign, CampaignSnapshot, CharacterRecord, CityAccount, CorpAccount, StatsRecord,
};
pub use combat::{AttackOutcome, AttackResult, resolve_attack};
pub use config::CombatConfig;
pub use engine::{
    ActionReport, BattleOutcome, BattleReport, CycleDirection, EnemyPhaseReport, PendingAction,
    Phase, PhaseKind, SurvivorReport, TargetSelection, TickReport, TurnController,
};
pub use error::{ActionError, CampaignError, ErrorSeverity, GameError, ProgressionError};
pub use progression::{CharacterProgress, ProgressionService, ProgressionSummary};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
pub use state::{
    Battle, Character, Fallen, Guard, Position, PsiAbility, PsiEffect, Side, StatusCounters,
    StatusTick, Unit, UnitId,
};
pub use stats::{Attribute, AttackKind, CombatStats, EnemyStats, PlayerStats};
