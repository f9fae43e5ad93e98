//! Colonist skill levels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillType {
    Mining,
    Building,
    Melee,
    Harvesting,
    Crafting,
    Cooking,
    Doctoring,
}

impl SkillType {
    pub const ALL: [SkillType; 7] = [
        SkillType::Mining,
        SkillType::Building,
        SkillType::Melee,
        SkillType::Harvesting,
        SkillType::Crafting,
        SkillType::Cooking,
        SkillType::Doctoring,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Level per skill, all zero by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skills {
    levels: [i32; 7],
}

impl Skills {
    pub fn with(mut self, skill: SkillType, level: i32) -> Self {
        self.set(skill, level);
        self
    }

    pub fn get(&self, skill: SkillType) -> i32 {
        self.levels[skill.index()]
    }

    pub fn set(&mut self, skill: SkillType, level: i32) {
        self.levels[skill.index()] = level;
    }

    pub fn increase(&mut self, skill: SkillType, amount: i32) {
        self.levels[skill.index()] += amount;
    }

    pub fn decrease(&mut self, skill: SkillType, amount: i32) {
        self.levels[skill.index()] -= amount;
    }
}
