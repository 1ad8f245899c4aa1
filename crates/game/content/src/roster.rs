//! Character roster: the heroes a run can start with and the enemies it meets.

use clash_core::CharacterTemplate;

/// Which side of a run a roster entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Hero,
    Enemy,
}

/// A keyed template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub key: String,
    pub role: Role,
    pub template: CharacterTemplate,
}

/// Ordered collection of roster entries. Keys are case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// The shipped roster: four heroes and the Goblin Grunt.
    pub fn builtin() -> Self {
        let entries = [
            ("balter", Role::Hero, CharacterTemplate::balter()),
            ("striker", Role::Hero, CharacterTemplate::striker()),
            ("shuten_maru", Role::Hero, CharacterTemplate::shuten_maru()),
            ("zect", Role::Hero, CharacterTemplate::zect()),
            ("goblin", Role::Enemy, CharacterTemplate::goblin_grunt()),
        ];
        Self::from_entries(
            entries
                .into_iter()
                .map(|(key, role, template)| (key.to_string(), role, template)),
        )
    }

    /// Build from `(key, role, template)` triples. A repeated key replaces the earlier entry.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Role, CharacterTemplate)>) -> Self {
        let mut roster = Self::default();
        for (key, role, template) in entries {
            roster.insert(RosterEntry {
                key: key.to_ascii_lowercase(),
                role,
                template,
            });
        }
        roster
    }

    pub fn insert(&mut self, entry: RosterEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, key: &str) -> Option<&RosterEntry> {
        self.entries
            .iter()
            .find(|entry| entry.key.eq_ignore_ascii_case(key))
    }

    pub fn template(&self, key: &str) -> Option<&CharacterTemplate> {
        self.get(key).map(|entry| &entry.template)
    }

    pub fn heroes(&self) -> impl Iterator<Item = &RosterEntry> {
        self.by_role(Role::Hero)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &RosterEntry> {
        self.by_role(Role::Enemy)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn by_role(&self, role: Role) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter().filter(move |entry| entry.role == role)
    }
}
