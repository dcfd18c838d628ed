//! Between-battle campaign management.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use game_core::{Attribute, Campaign, CorpAccount, ProgressionService};
use tracing::info;

use crate::config::ClientConfig;

use super::{load_campaign, resolve_save_path, save_campaign};

/// Spend a character's pending attribute points
#[derive(Parser, Debug)]
pub struct Allocate {
    /// Campaign save file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Character name
    pub character: String,

    /// Attribute: defense, psi, str, agi, con or cha
    pub attribute: String,

    /// Points to spend
    #[arg(default_value_t = 1)]
    pub points: u32,
}

impl Allocate {
    pub fn execute(self, client: &ClientConfig) -> Result<()> {
        let save_path = resolve_save_path(self.save, client);
        let mut campaign = load_campaign(&save_path)?;
        let attribute = Attribute::from_str(&self.attribute)
            .map_err(|_| anyhow!("unknown attribute '{}'", self.attribute))?;

        allocate(&mut campaign, &self.character, attribute, self.points)?;

        save_campaign(&save_path, &campaign)?;
        println!("{} +{} {}", self.character, self.points, attribute);
        Ok(())
    }
}

fn allocate(campaign: &mut Campaign, name: &str, attribute: Attribute, points: u32) -> Result<()> {
    let character = campaign
        .characters
        .iter_mut()
        .find(|character| character.name == name)
        .ok_or_else(|| anyhow!("no character named '{name}'"))?;
    ProgressionService::allocate(character, attribute, points)
        .with_context(|| format!("cannot raise {attribute} for {name}"))?;
    info!(name, %attribute, points, "points allocated");
    Ok(())
}

/// Move funds from the budget pool into a corporation account
#[derive(Parser, Debug)]
pub struct Fund {
    /// Campaign save file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Account: research, security, politics or black_ops
    pub account: String,

    pub amount: u32,

    /// End the campaign turn afterwards, recomputing the pool
    #[arg(long)]
    pub end_turn: bool,
}

impl Fund {
    pub fn execute(self, client: &ClientConfig) -> Result<()> {
        let save_path = resolve_save_path(self.save, client);
        let mut campaign = load_campaign(&save_path)?;
        let account = CorpAccount::from_str(&self.account)
            .map_err(|_| anyhow!("unknown account '{}'", self.account))?;

        campaign.allocate_corp_funds(account, self.amount)?;
        if self.end_turn {
            campaign.advance_turn();
        }

        save_campaign(&save_path, &campaign)?;
        println!(
            "{account}: {}  pool: {}  turn: {}",
            campaign.corp(account),
            campaign.budget_pool,
            campaign.turn
        );
        Ok(())
    }
}
