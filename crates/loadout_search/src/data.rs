use std::fmt;

use serde::{Deserialize, Serialize};

pub const NUM_SLOTS: usize = 5;
// Highest talent-unlock tier the character can reach.
pub const MAX_CONSTELLATION: u8 = 6;
pub const DEFAULT_MAX_ARTIFACT_LINES: usize = 50;

pub const CRIT_RATE_KEY: &str = "Crit_Rate%";
pub const CRIT_DMG_KEY: &str = "Crit_DMG%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Flower,
    Feather,
    Sands,
    Goblet,
    Circlet,
}

impl Slot {
    /// Slots in the order the search fixes them.
    pub const ALL: [Slot; NUM_SLOTS] = [
        Slot::Flower,
        Slot::Feather,
        Slot::Sands,
        Slot::Goblet,
        Slot::Circlet,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Slot::Flower => "Flower",
            Slot::Feather => "Feather",
            Slot::Sands => "Sands",
            Slot::Goblet => "Goblet",
            Slot::Circlet => "Circlet",
        }
    }

    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Element {
    Anemo,
    #[default]
    Cryo,
    Dendro,
    Electro,
    Geo,
    Hydro,
    Pyro,
    Physical,
}

impl Element {
    /// Substat identifier carrying this element's damage bonus.
    pub const fn dmg_bonus_key(self) -> &'static str {
        match self {
            Element::Anemo => "Anemo_DMG%",
            Element::Cryo => "Cryo_DMG%",
            Element::Dendro => "Dendro_DMG%",
            Element::Electro => "Electro_DMG%",
            Element::Geo => "Geo_DMG%",
            Element::Hydro => "Hydro_DMG%",
            Element::Pyro => "Pyro_DMG%",
            Element::Physical => "Physical_DMG%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substat {
    pub name: String,
    pub value: f64,
}

impl Substat {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub set_name: String,
    pub slot: Slot,
    pub main_stat: String,
    pub main_stat_value: f64,
    pub substats: Vec<Substat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub refinement_level: i32,
    pub base_atk: f64,
    pub main_stat: String,
    // Consumed by the damage model as an ATK% bonus.
    pub main_stat_value: f64,
    pub substats: Vec<Substat>,
    pub bonus_dmg: f64,
}

impl Weapon {
    /// Name and refinement, e.g. `Amos'_Bow (R1)`.
    pub fn label(&self) -> String {
        format!("{} (R{})", self.name, self.refinement_level)
    }
}
