//! Character roster loader.

use std::path::Path;

use clash_core::CharacterTemplate;

use crate::loaders::{LoadResult, read_file};
use crate::roster::{Role, Roster};

/// Loader for the character roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<(String, Role, CharacterTemplate)>`
    ///
    /// A template without a `kit` field plays as a plain grunt.
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let raw: Vec<(String, Role, CharacterTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        for (key, _, template) in &raw {
            if template.max_hp == 0 {
                anyhow::bail!("Roster entry '{}' has zero max_hp", key);
            }
        }

        let roster = Roster::from_entries(raw);
        if roster.heroes().next().is_none() {
            anyhow::bail!("Roster has no heroes");
        }
        if roster.enemies().next().is_none() {
            anyhow::bail!("Roster has no enemies");
        }
        Ok(roster)
    }
}
