//! Headless CyberCity client.
//!
//! # Architecture
//!
//! ```text
//! cybercity (binary)
//!   ├─→ ClientConfig   (environment, .env)
//!   ├─→ logging        (stderr + session log file)
//!   └─→ commands
//!         ├─→ skirmish: load campaign → battle (autopilot) → progression → save
//!         └─→ status:   load campaign → print roster and budgets
//! ```
//!
//! The combat rules live in `game-core`; file formats live in `game-content`.
//! This crate only wires them together.

pub mod autopilot;
pub mod commands;
pub mod config;
pub mod dirs;
pub mod logging;

pub use autopilot::{Autopilot, Plan};
pub use config::ClientConfig;
