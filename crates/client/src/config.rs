//! Client configuration from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings shared by every subcommand. Command-line flags take precedence.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub save_path: Option<PathBuf>,
    pub combat_config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CYBERCITY_SAVE` - Campaign save file (default: platform data dir)
    /// - `CYBERCITY_CONFIG` - Combat config TOML (default: built-in rules)
    /// - `CYBERCITY_SEED` - Battle RNG seed (default: random)
    /// - `CYBERCITY_SESSION` - Log session name (default: timestamp)
    pub fn from_env() -> Self {
        Self {
            save_path: env::var_os("CYBERCITY_SAVE").map(PathBuf::from),
            combat_config: env::var_os("CYBERCITY_CONFIG").map(PathBuf::from),
            seed: read_env::<u64>("CYBERCITY_SEED"),
            session_id: env::var("CYBERCITY_SESSION").ok(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
