//! Immutable character template data.

use super::kit::Kit;

/// Template a combatant is built from at encounter start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub name: String,
    pub max_hp: u32,
    /// Attack die size.
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub coin_flips: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kit: Kit,
}

impl CharacterTemplate {
    pub fn new(
        name: impl Into<String>,
        kit: Kit,
        max_hp: u32,
        attack: u32,
        defense: u32,
        speed: u32,
        coin_flips: u32,
    ) -> Self {
        Self {
            name: name.into(),
            max_hp,
            attack,
            defense,
            speed,
            coin_flips,
            kit,
        }
    }

    pub fn balter() -> Self {
        Self::new("Balter", Kit::Balter, 120, 10, 6, 7, 2)
    }

    pub fn striker() -> Self {
        Self::new("Striker", Kit::Striker, 90, 6, 4, 12, 1)
    }

    pub fn shuten_maru() -> Self {
        Self::new("Shuten-Maru", Kit::ShutenMaru, 80, 8, 5, 15, 1)
    }

    pub fn zect() -> Self {
        Self::new("Zect", Kit::Zect, 100, 6, 5, 9, 2)
    }

    pub fn goblin_grunt() -> Self {
        Self::new("Goblin Grunt", Kit::Grunt, 30, 8, 2, 6, 1)
    }
}
