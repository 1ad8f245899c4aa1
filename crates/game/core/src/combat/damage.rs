//! Damage kinds, rolls, and defense mitigation.

// ============================================================================
// Damage Kind
// ============================================================================

/// Damage kind, used by kit hooks that only react to one of them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageKind {
    /// Fists, blades, hammers.
    Physical,
    /// Time and mind attacks.
    Psychic,
}

// ============================================================================
// Damage Roll
// ============================================================================

/// One damage roll, kept in parts so hooks can inspect the natural die.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    /// Face the die landed on.
    pub natural: u32,
    /// Natural roll after any doubling.
    pub base: u32,
    /// Flat situational bonus.
    pub bonus: u32,
}

impl DamageRoll {
    pub const fn plain(natural: u32) -> Self {
        Self {
            natural,
            base: natural,
            bonus: 0,
        }
    }

    pub const fn new(natural: u32, double_natural: bool, bonus: u32) -> Self {
        let base = if double_natural {
            natural.saturating_mul(2)
        } else {
            natural
        };
        Self {
            natural,
            base,
            bonus,
        }
    }

    pub const fn total(&self) -> u32 {
        self.base.saturating_add(self.bonus)
    }
}

// ============================================================================
// Mitigation
// ============================================================================

/// Subtract defense from incoming damage, floored at zero.
///
/// ```text
/// effective = max(0, amount - defense)
/// ```
pub const fn mitigate(amount: u32, defense: u32) -> u32 {
    amount.saturating_sub(defense)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mitigation_never_goes_negative() {
        assert_eq!(mitigate(10, 4), 6);
        assert_eq!(mitigate(3, 4), 0);
        assert_eq!(mitigate(0, 0), 0);
    }

    #[test]
    fn doubling_applies_to_the_natural_die_only() {
        let roll = DamageRoll::new(4, true, 3);
        assert_eq!(roll.natural, 4);
        assert_eq!(roll.base, 8);
        assert_eq!(roll.total(), 11);
        assert_eq!(DamageRoll::plain(5).total(), 5);
    }
}
