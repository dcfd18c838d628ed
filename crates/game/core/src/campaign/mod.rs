//! Strategic layer around battles: turn counter, budgets and the roster.

mod snapshot;

use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::error::CampaignError;
use crate::state::Character;

pub use snapshot::{CampaignSnapshot, CharacterRecord, StatsRecord};

/// Corporation accounts funded from the budget pool.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum CorpAccount {
    Research,
    Security,
    Politics,
    BlackOps,
}

/// City management accounts.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum CityAccount {
    Armaments,
    Garrisons,
    DefenseZones,
}

/// Live campaign state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Campaign {
    pub turn: u32,
    pub budget_pool: i64,
    corp_budget: BTreeMap<CorpAccount, i64>,
    city_budget: BTreeMap<CityAccount, i64>,
    pub characters: Vec<Character>,
}

impl Campaign {
    pub const BASE_BUDGET: i64 = 100;

    /// Turn 1, every account at zero, a freshly computed pool, no characters.
    pub fn new() -> Self {
        let mut campaign = Self {
            turn: 1,
            budget_pool: 0,
            corp_budget: CorpAccount::iter().map(|account| (account, 0)).collect(),
            city_budget: CityAccount::iter().map(|account| (account, 0)).collect(),
            characters: Vec::new(),
        };
        campaign.budget_pool = campaign.compute_budget();
        campaign
    }

    pub fn corp(&self, account: CorpAccount) -> i64 {
        self.corp_budget.get(&account).copied().unwrap_or(0)
    }

    pub fn city(&self, account: CityAccount) -> i64 {
        self.city_budget.get(&account).copied().unwrap_or(0)
    }

    pub fn corp_budget(&self) -> &BTreeMap<CorpAccount, i64> {
        &self.corp_budget
    }

    pub fn city_budget(&self) -> &BTreeMap<CityAccount, i64> {
        &self.city_budget
    }

    /// `100 + floor(Σ corp / 10)`
    pub fn compute_budget(&self) -> i64 {
        let invested: i64 = self.corp_budget.values().sum();
        Self::BASE_BUDGET + invested.div_euclid(10)
    }

    /// Moves `amount` from the pool into a corp account.
    ///
    /// The pool never goes negative: an allocation larger than the pool is
    /// rejected and nothing changes.
    pub fn allocate_corp_funds(
        &mut self,
        account: CorpAccount,
        amount: u32,
    ) -> Result<(), CampaignError> {
        let requested = i64::from(amount);
        if self.budget_pool < requested {
            return Err(CampaignError::InsufficientBudget {
                requested: amount,
                available: self.budget_pool,
            });
        }

        self.budget_pool -= requested;
        *self.corp_budget.entry(account).or_insert(0) += requested;
        debug!(%account, amount, pool = self.budget_pool, "corp funds allocated");
        Ok(())
    }

    pub fn adjust_city_budget(&mut self, account: CityAccount, amount: i64) {
        *self.city_budget.entry(account).or_insert(0) += amount;
    }

    /// Next turn with a pool recomputed from corp investment.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        self.budget_pool = self.compute_budget();
        debug!(turn = self.turn, pool = self.budget_pool, "campaign turn advanced");
    }

    /// Appends a fresh agent named after its roster slot.
    pub fn recruit(&mut self) -> &Character {
        let name = format!("Agent {}", self.characters.len() + 1);
        self.characters.push(Character::new(name));
        &self.characters[self.characters.len() - 1]
    }

    pub fn from_snapshot(snapshot: CampaignSnapshot) -> Self {
        let mut campaign = Self::new();
        campaign.turn = snapshot.turn.max(1);
        campaign.corp_budget.extend(snapshot.corp_budget);
        campaign.city_budget.extend(snapshot.city_budget);
        campaign.budget_pool = snapshot
            .budget_pool
            .unwrap_or_else(|| campaign.compute_budget());
        campaign.characters = snapshot
            .characters
            .into_iter()
            .filter(|record| {
                let fallen = record.stats.hp == Some(0);
                if fallen {
                    warn!(name = %record.name, "dropping character saved with zero hp");
                }
                !fallen
            })
            .map(Character::from)
            .collect();
        campaign
    }

    pub fn to_snapshot(&self) -> CampaignSnapshot {
        CampaignSnapshot {
            turn: self.turn,
            budget_pool: Some(self.budget_pool),
            corp_budget: self.corp_budget.clone(),
            city_budget: self.city_budget.clone(),
            characters: self.characters.iter().map(CharacterRecord::from).collect(),
        }
    }
}

impl Default for Campaign {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CombatStats;

    #[test]
    fn fresh_campaign_starts_with_base_budget() {
        let campaign = Campaign::new();
        assert_eq!(campaign.turn, 1);
        assert_eq!(campaign.budget_pool, 100);
        assert_eq!(campaign.corp_budget().len(), 4);
        assert_eq!(campaign.city(CityAccount::DefenseZones), 0);
    }

    #[test]
    fn allocation_never_overdraws_the_pool() {
        let mut campaign = Campaign::new();

        campaign.allocate_corp_funds(CorpAccount::Research, 60).unwrap();
        let err = campaign
            .allocate_corp_funds(CorpAccount::BlackOps, 41)
            .unwrap_err();

        assert_eq!(
            err,
            CampaignError::InsufficientBudget {
                requested: 41,
                available: 40
            }
        );
        assert_eq!(campaign.budget_pool, 40);
        assert_eq!(campaign.corp(CorpAccount::BlackOps), 0);

        campaign.allocate_corp_funds(CorpAccount::BlackOps, 40).unwrap();
        assert_eq!(campaign.budget_pool, 0);
    }

    #[test]
    fn advance_turn_recomputes_pool_from_investment() {
        let mut campaign = Campaign::new();
        campaign.allocate_corp_funds(CorpAccount::Security, 100).unwrap();

        campaign.advance_turn();

        assert_eq!(campaign.turn, 2);
        assert_eq!(campaign.budget_pool, 110);
    }

    #[test]
    fn city_budget_accumulates() {
        let mut campaign = Campaign::new();
        campaign.adjust_city_budget(CityAccount::Garrisons, 10);
        campaign.adjust_city_budget(CityAccount::Garrisons, 10);
        assert_eq!(campaign.city(CityAccount::Garrisons), 20);
    }

    #[test]
    fn recruits_are_numbered_by_roster_slot() {
        let mut campaign = Campaign::new();
        campaign.recruit();
        let second = campaign.recruit();
        assert_eq!(second.name, "Agent 2");
        assert_eq!(second.role, "agent");
        assert_eq!(second.stats.max_hp(), 11);
    }

    #[test]
    fn snapshot_conversion_is_lossless() {
        let mut campaign = Campaign::new();
        campaign.allocate_corp_funds(CorpAccount::Politics, 30).unwrap();
        campaign.adjust_city_budget(CityAccount::Armaments, 7);
        campaign.recruit();
        campaign.characters[0].grant_xp(150);
        campaign.characters[0].stats.set_hp(9);

        let restored = Campaign::from_snapshot(campaign.to_snapshot());

        assert_eq!(restored, campaign);
    }

    #[test]
    fn characters_saved_dead_stay_dead() {
        let mut campaign = Campaign::new();
        campaign.recruit();
        campaign.recruit();
        campaign.characters[0].stats.set_hp(0);

        let restored = Campaign::from_snapshot(campaign.to_snapshot());

        assert_eq!(restored.characters.len(), 1);
        assert_eq!(restored.characters[0].name, "Agent 2");
    }

    #[test]
    fn account_names_match_snapshot_keys() {
        assert_eq!(CorpAccount::BlackOps.to_string(), "black_ops");
        assert_eq!("defense_zones".parse(), Ok(CityAccount::DefenseZones));
    }
}
