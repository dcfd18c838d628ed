//! The battle aggregate: rosters, turn bookkeeping and casualties.
//!
//! A `Battle` is assembled during setup (deploy characters, spawn enemies)
//! and then handed to the [`TurnController`](crate::engine::TurnController),
//! which owns it exclusively until the battle ends.

use crate::engine::{Phase, TargetSelection};
use crate::stats::EnemyStats;

use super::types::{Character, Position, Side, Unit, UnitId};

/// A unit removed from its roster after dropping to 0 HP.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fallen {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    /// Roster index of the backing character (players only).
    pub roster_index: Option<usize>,
    pub level: i32,
    /// Turn on which the unit fell.
    pub turn: u32,
}

/// Live battle state.
#[derive(Debug)]
pub struct Battle<'a> {
    pub(crate) turn_number: u32,
    pub(crate) phase: Phase,
    pub(crate) players: Vec<Unit<'a>>,
    pub(crate) enemies: Vec<Unit<'a>>,
    /// Active player unit while in the player phase.
    pub(crate) active: Option<UnitId>,
    pub(crate) fallen: Vec<Fallen>,
    next_id: u32,
}

impl<'a> Battle<'a> {
    pub fn new() -> Self {
        Self {
            turn_number: 1,
            phase: Phase::PlayerTurn,
            players: Vec::new(),
            enemies: Vec::new(),
            active: None,
            fallen: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Deploys one character; its stats stay borrowed until the battle is dropped.
    pub fn deploy(
        &mut self,
        roster_index: usize,
        character: &'a mut Character,
        position: Position,
    ) -> UnitId {
        let id = self.allocate_id();
        let Character { name, stats, .. } = character;
        self.players.push(Unit::for_character(
            id,
            name.clone(),
            stats,
            roster_index,
            position,
        ));
        id
    }

    /// Deploys every living character in a row starting at `origin`.
    ///
    /// Characters already at 0 HP stay home.
    pub fn deploy_roster(&mut self, roster: &'a mut [Character], origin: Position) -> Vec<UnitId> {
        let mut deployed = Vec::new();
        for (roster_index, character) in roster.iter_mut().enumerate() {
            if !character.is_alive() {
                continue;
            }
            let position = origin.offset(deployed.len() as i32, 0);
            deployed.push(self.deploy(roster_index, character, position));
        }
        deployed
    }

    /// Spawns an enemy with a freshly generated stat block.
    pub fn spawn_enemy(
        &mut self,
        name: impl Into<String>,
        stats: EnemyStats,
        position: Position,
    ) -> UnitId {
        let id = self.allocate_id();
        self.enemies.push(Unit::spawned(id, name, stats, position));
        id
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn players(&self) -> &[Unit<'a>] {
        &self.players
    }

    pub fn enemies(&self) -> &[Unit<'a>] {
        &self.enemies
    }

    pub fn fallen(&self) -> &[Fallen] {
        &self.fallen
    }

    pub fn active_id(&self) -> Option<UnitId> {
        self.active
    }

    /// Pending target selection, if the battle is in that sub-state.
    pub fn selection(&self) -> Option<&TargetSelection> {
        match &self.phase {
            Phase::TargetSelection(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit<'a>> {
        self.players
            .iter()
            .chain(self.enemies.iter())
            .find(|unit| unit.id() == id)
    }

    pub(crate) fn player_index(&self, id: UnitId) -> Option<usize> {
        self.players.iter().position(|unit| unit.id() == id)
    }

    pub(crate) fn enemy_index(&self, id: UnitId) -> Option<usize> {
        self.enemies.iter().position(|unit| unit.id() == id)
    }

    pub fn has_living(&self, side: Side) -> bool {
        self.roster(side).iter().any(Unit::is_alive)
    }

    pub fn roster(&self, side: Side) -> &[Unit<'a>] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    /// Removes dead units from one roster and records them.
    pub(crate) fn remove_fallen_from(&mut self, side: Side) -> Vec<Fallen> {
        let turn = self.turn_number;
        let roster = match side {
            Side::Player => &mut self.players,
            Side::Enemy => &mut self.enemies,
        };
        let removed = bury(roster, turn);
        self.fallen.extend(removed.iter().cloned());
        removed
    }
}

impl Default for Battle<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops dead units from `roster`, preserving order of the survivors.
pub(crate) fn bury(roster: &mut Vec<Unit<'_>>, turn: u32) -> Vec<Fallen> {
    let mut removed = Vec::new();
    roster.retain(|unit| {
        if unit.is_alive() {
            return true;
        }
        removed.push(Fallen {
            id: unit.id(),
            name: unit.name().to_string(),
            side: unit.side(),
            roster_index: unit.roster_index(),
            level: unit.stats().level(),
            turn,
        });
        false
    });
    removed
}
