//! Persistence and data files for CyberCity.
//!
//! - Campaign save files (JSON), read leniently: missing or malformed
//!   fields fall back to defaults and never fail the load
//! - Encounter tables (RON): enemy spawns for a battle
//! - Combat configuration (TOML)
//!
//! Only real I/O failures surface as errors.

pub mod encounter;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use encounter::{EncounterSpec, EnemySpawn};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, EncounterLoader, LoadResult, SnapshotLoader, SnapshotWriter,
};
