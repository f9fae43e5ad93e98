//! Colonist battery drain and starvation.
//!
//! Colonists run on a battery that loses one unit every
//! [`GROWTH_INTERVAL`] seconds of game time. Below half charge (measured
//! against max health) they turn hungry. Once it is empty they turn
//! murderous and lose [`STARVATION_DAMAGE`] health per interval instead.

use crate::constants::GROWTH_INTERVAL;
use serde::{Deserialize, Serialize};

pub const MAX_BATTERY_LIFE: f32 = 100.0;
pub const BATTERY_DRAIN: f32 = 1.0;
pub const STARVATION_DAMAGE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    Happy,
    Hungry,
    Murderous,
}

/// What one hunger interval did to the colonist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HungerEffect {
    Drained { battery: f32 },
    Starved { health: f32, died: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hunger {
    pub time_till_recharge: f32,
    pub previous_time: u32,
    pub mood: Mood,
}

impl Default for Hunger {
    fn default() -> Self {
        Self {
            time_till_recharge: MAX_BATTERY_LIFE,
            previous_time: 1,
            mood: Mood::Happy,
        }
    }
}

impl Hunger {
    /// Consume at most one hunger interval, `elapsed` seconds after game start.
    pub fn advance(
        &mut self,
        elapsed: f64,
        health: &mut f32,
        max_health: f32,
    ) -> Option<HungerEffect> {
        if elapsed / GROWTH_INTERVAL <= self.previous_time as f64 {
            return None;
        }
        self.previous_time += 1;

        if self.time_till_recharge != 0.0 {
            self.time_till_recharge -= BATTERY_DRAIN;
            if self.time_till_recharge / max_health < 0.5 {
                self.mood = Mood::Hungry;
            }
            return Some(HungerEffect::Drained {
                battery: self.time_till_recharge,
            });
        }

        self.mood = Mood::Murderous;
        *health -= STARVATION_DAMAGE;
        let died = *health <= 0.0;
        if died {
            *health = 0.0;
        }
        Some(HungerEffect::Starved {
            health: *health,
            died,
        })
    }
}
