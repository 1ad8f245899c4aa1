//! Runtime configuration.
use std::path::Path;

use clash_content::ContentFactory;
use clash_core::CombatConfig;

use crate::error::{Result, RuntimeError};

/// Rule tuning plus the seed for the runtime's random source.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Fixed seed for replayable runs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read `combat.toml` from a content directory, keeping defaults for
    /// anything the file leaves out.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Result<Self> {
        let combat = ContentFactory::new(data_dir.as_ref())
            .load_config()
            .map_err(RuntimeError::Content)?;
        Ok(Self { combat, seed: None })
    }
}
