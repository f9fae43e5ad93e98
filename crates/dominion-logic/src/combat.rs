//! Melee combat math: hit chance tiers and weapon damage.
//!
//! Rolls are supplied by the caller so every function here stays
//! deterministic and testable without an RNG.

use serde::{Deserialize, Serialize};

/// Game-clock seconds between two rounds of a fight.
pub const FIGHT_ROUND_INTERVAL: f64 = 0.1;

/// Unarmed damage is drawn from `0..UNARMED_MAX_DAMAGE` (exclusive).
pub const UNARMED_MAX_DAMAGE: u32 = 2;

/// Melee skill at or below this is a weak fighter.
pub const WEAK_MELEE_MAX: i32 = 3;

/// Melee skill at or below this (and above weak) is an average fighter.
pub const AVERAGE_MELEE_MAX: i32 = 6;

/// Fighting experience bracket derived from the melee skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeleeTier {
    Weak,
    Average,
    Expert,
}

impl MeleeTier {
    pub fn from_skill(melee: i32) -> Self {
        if melee <= WEAK_MELEE_MAX {
            MeleeTier::Weak
        } else if melee <= AVERAGE_MELEE_MAX {
            MeleeTier::Average
        } else {
            MeleeTier::Expert
        }
    }

    /// Probability that a swing in this tier connects.
    pub fn hit_chance(self) -> f64 {
        match self {
            MeleeTier::Weak => 0.4,
            MeleeTier::Average => 0.6,
            MeleeTier::Expert => 0.8,
        }
    }

    /// Whether a uniform roll in `[0, 1)` lands a hit.
    pub fn hits(self, roll: f64) -> bool {
        roll < self.hit_chance()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackRange {
    Short,
    Medium,
    Long,
}

impl AttackRange {
    /// Divisor applied to weapon damage; longer reach hits softer.
    pub fn divisor(self) -> f32 {
        match self {
            AttackRange::Short => 1.0,
            AttackRange::Medium => 2.0,
            AttackRange::Long => 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Sword,
    Trident,
    LaserHandgun,
}

impl WeaponType {
    pub const ALL: [WeaponType; 3] = [
        WeaponType::Sword,
        WeaponType::Trident,
        WeaponType::LaserHandgun,
    ];

    pub fn stats(self) -> WeaponStats {
        match self {
            WeaponType::Sword => WeaponStats {
                damage_multiplier: 0.1,
                attack_speed_multiplier: 2.0,
                range: AttackRange::Short,
                quality_drain: 5.0,
            },
            WeaponType::Trident => WeaponStats {
                damage_multiplier: 0.2,
                attack_speed_multiplier: 1.0,
                range: AttackRange::Medium,
                quality_drain: 3.0,
            },
            WeaponType::LaserHandgun => WeaponStats {
                damage_multiplier: 0.3,
                attack_speed_multiplier: 3.0,
                range: AttackRange::Long,
                quality_drain: 1.0,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeaponType::Sword => "Sword",
            WeaponType::Trident => "Trident",
            WeaponType::LaserHandgun => "Laser Handgun",
        }
    }
}

/// Combat numbers carried by a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage_multiplier: f32,
    pub attack_speed_multiplier: f32,
    pub range: AttackRange,
    /// Weapon health lost per use.
    pub quality_drain: f32,
}

/// Damage of one weapon hit against a target that had `target_health`.
pub fn weapon_damage(target_health: f32, stats: &WeaponStats) -> f32 {
    target_health * stats.damage_multiplier * stats.attack_speed_multiplier
        / stats.range.divisor()
}

/// Health after taking `damage`, and whether that killed.
pub fn apply_damage(health: f32, damage: f32) -> (f32, bool) {
    let remaining = health - damage;
    if remaining <= 0.0 {
        (0.0, true)
    } else {
        (remaining, false)
    }
}
