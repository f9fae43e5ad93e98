//! Holdable things: items, tools and weapons.

use dominion_logic::combat::{WeaponStats, WeaponType};
use hecs::Entity;
use serde::{Deserialize, Serialize};

/// Something that can be carried. `held_by` is the carrier, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Item {
    pub held_by: Option<Entity>,
}

impl Item {
    pub fn is_held(&self) -> bool {
        self.held_by.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    None,
    Axe,
    Pickaxe,
    Hoe,
    Hammer,
}

impl ToolType {
    /// Every real tool, excluding the bare-hands placeholder.
    pub const CRAFTABLE: [ToolType; 4] = [
        ToolType::Axe,
        ToolType::Pickaxe,
        ToolType::Hoe,
        ToolType::Hammer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolType::None => "None",
            ToolType::Axe => "Axe",
            ToolType::Pickaxe => "Pickaxe",
            ToolType::Hoe => "Hoe",
            ToolType::Hammer => "Hammer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub tool_type: ToolType,
    pub quality: f32,
}

impl Tool {
    pub fn new(tool_type: ToolType) -> Self {
        Self {
            tool_type,
            quality: 1.0,
        }
    }

    /// Placeholder used when an entity has no usable tool.
    pub fn bare_hands() -> Self {
        Self::new(ToolType::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub weapon_type: WeaponType,
    pub stats: WeaponStats,
}

impl Weapon {
    pub fn new(weapon_type: WeaponType) -> Self {
        Self {
            weapon_type,
            stats: weapon_type.stats(),
        }
    }
}
