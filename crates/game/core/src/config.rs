/// Rule constants and tunable parameters for combat resolution.
///
/// Every field has a default matching the shipped game balance; data files
/// may override any subset of them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    // ===== guard / grapple =====
    /// Defense added by a guard action for the rest of the round.
    pub guard_defense_bonus: u32,
    /// Speed removed from a grappled target (floored at 1).
    pub grapple_speed_penalty: u32,
    /// Die rolled by the grappler.
    pub grapple_attacker_die: u32,
    /// Die rolled by the target to resist a grapple.
    pub grapple_resist_die: u32,
    /// Fixed, defense-ignoring damage dealt by the finisher.
    pub piledriver_damage: u32,

    // ===== clash =====
    /// Bonus damage per head for the clash winner.
    pub clash_bonus_per_head: u32,
    /// Die for Balter's Old One-Two follow-up.
    pub one_two_die: u32,
    /// Die for the Old One-Two when the loser is grappled.
    pub one_two_grappled_die: u32,

    // ===== character mechanics =====
    pub momentum_cap: u32,
    pub skipper_duration: u32,
    pub skipper_damage_bonus: u32,
    pub skipper_defense_penalty: u32,
    pub skipper_coin_bonus: u32,
    pub misty_reduction_per_stack: u32,
    pub misty_cap: u32,
    pub chrono_fist_heal: u32,
    pub phase_speed_bonus: u32,
    pub heavy_blow_die_bonus: u32,
    pub trident_clash_bonus: u32,
    pub hammer_defense_bonus: u32,

    // ===== enemy behaviour / run economy =====
    /// Percent chance (d100) that the enemy picks its strike over guarding.
    pub enemy_attack_chance: u32,
    /// Gold credited once when the player wins an encounter.
    pub victory_reward: u32,
    pub shrine_heal: u32,
    pub shrine_gold: u32,
}

impl CombatConfig {
    pub const DEFAULT_GUARD_DEFENSE_BONUS: u32 = 5;
    pub const DEFAULT_GRAPPLE_SPEED_PENALTY: u32 = 5;
    pub const DEFAULT_PILEDRIVER_DAMAGE: u32 = 20;
    pub const DEFAULT_CLASH_BONUS_PER_HEAD: u32 = 2;
    pub const DEFAULT_MOMENTUM_CAP: u32 = 3;
    pub const DEFAULT_ENEMY_ATTACK_CHANCE: u32 = 70;
    pub const DEFAULT_VICTORY_REWARD: u32 = 10;

    pub fn new() -> Self {
        Self {
            guard_defense_bonus: Self::DEFAULT_GUARD_DEFENSE_BONUS,
            grapple_speed_penalty: Self::DEFAULT_GRAPPLE_SPEED_PENALTY,
            grapple_attacker_die: 10,
            grapple_resist_die: 8,
            piledriver_damage: Self::DEFAULT_PILEDRIVER_DAMAGE,
            clash_bonus_per_head: Self::DEFAULT_CLASH_BONUS_PER_HEAD,
            one_two_die: 4,
            one_two_grappled_die: 6,
            momentum_cap: Self::DEFAULT_MOMENTUM_CAP,
            skipper_duration: 3,
            skipper_damage_bonus: 2,
            skipper_defense_penalty: 2,
            skipper_coin_bonus: 1,
            misty_reduction_per_stack: 2,
            misty_cap: 3,
            chrono_fist_heal: 5,
            phase_speed_bonus: 5,
            heavy_blow_die_bonus: 2,
            trident_clash_bonus: 3,
            hammer_defense_bonus: 2,
            enemy_attack_chance: Self::DEFAULT_ENEMY_ATTACK_CHANCE,
            victory_reward: Self::DEFAULT_VICTORY_REWARD,
            shrine_heal: 10,
            shrine_gold: 5,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
