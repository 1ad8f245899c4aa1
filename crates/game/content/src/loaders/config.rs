//! Combat configuration loader.

use std::path::Path;

use clash_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat rule tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a `CombatConfig` from a TOML file.
    ///
    /// Every key is optional; missing keys keep the shipped defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "guard_defense_bonus = 3\nenemy_attack_chance = 50").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.guard_defense_bonus, 3);
        assert_eq!(config.enemy_attack_chance, 50);
        assert_eq!(config.piledriver_damage, CombatConfig::DEFAULT_PILEDRIVER_DAMAGE);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = ConfigLoader::parse("guard_defense_bonus = \"five\"").unwrap_err();
        assert!(err.to_string().contains("combat config"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/combat.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/combat.toml"));
    }
}
