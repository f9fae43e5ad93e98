//! Components for living agents: colonists and animals.

use dominion_logic::hunger::{Hunger, Mood};
use dominion_logic::skills::{SkillType, Skills};
use serde::{Deserialize, Serialize};

/// A colonist: skilled, gets hungry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Colonist {
    pub skills: Skills,
    pub hunger: Hunger,
}

impl Colonist {
    pub fn with_skills(skills: Skills) -> Self {
        Self {
            skills,
            ..Default::default()
        }
    }

    pub fn melee(&self) -> i32 {
        self.skills.get(SkillType::Melee)
    }

    pub fn mood(&self) -> Mood {
        self.hunger.mood
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Anteater,
    Capybara,
    Giraffe,
    Goose,
    Ostrich,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 5] = [
        AnimalKind::Anteater,
        AnimalKind::Capybara,
        AnimalKind::Giraffe,
        AnimalKind::Goose,
        AnimalKind::Ostrich,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnimalKind::Anteater => "Anteater",
            AnimalKind::Capybara => "Capybara",
            AnimalKind::Giraffe => "Giraffe",
            AnimalKind::Goose => "Goose",
            AnimalKind::Ostrich => "Ostrich",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub kind: AnimalKind,
}
