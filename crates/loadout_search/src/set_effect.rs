use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const DESC_CRYO_DMG_BONUS: &str = "+15% Cryo DMG Bonus";
const DESC_BLIZZARD_CRIT_RATE: &str = "CRIT Rate +20% (Cryo), +20% (Frozen)";
const DESC_ATK_18: &str = "+18% ATK";

/// A set bonus the damage model knows how to apply.
///
/// Magnitudes are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "pct")]
pub enum SetEffect {
    ElementalDmg(f64),
    // Applied unconditionally; the (Cryo)/(Frozen) conditions are not modeled.
    CritRate(f64),
    AtkPercent(f64),
    #[default]
    Inert,
}

impl SetEffect {
    /// Converts a legacy free-text bonus descriptor.
    ///
    /// Only the three descriptors the model scores are recognized, anything else is `Inert`.
    pub fn from_descriptor(text: &str) -> Self {
        match text {
            DESC_CRYO_DMG_BONUS => SetEffect::ElementalDmg(15.0),
            DESC_BLIZZARD_CRIT_RATE => SetEffect::CritRate(20.0),
            DESC_ATK_18 => SetEffect::AtkPercent(18.0),
            _ => SetEffect::Inert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SetBonus {
    pub two_piece: SetEffect,
    pub four_piece: SetEffect,
}

impl SetBonus {
    pub const NONE: SetBonus = SetBonus {
        two_piece: SetEffect::Inert,
        four_piece: SetEffect::Inert,
    };

    pub const fn new(two_piece: SetEffect, four_piece: SetEffect) -> Self {
        Self {
            two_piece,
            four_piece,
        }
    }

    pub fn from_descriptors(two_piece: &str, four_piece: &str) -> Self {
        Self::new(
            SetEffect::from_descriptor(two_piece),
            SetEffect::from_descriptor(four_piece),
        )
    }

    pub fn effects(&self) -> [SetEffect; 2] {
        [self.two_piece, self.four_piece]
    }
}

// (set, 2-piece descriptor, 4-piece descriptor)
const BUILTIN_SETS: [(&str, &str, &str); 10] = [
    ("Blizzard_Strayer", DESC_CRYO_DMG_BONUS, DESC_BLIZZARD_CRIT_RATE),
    ("Gladiator's_Finale", DESC_ATK_18, "+35% Normal Attack DMG"),
    (
        "Shimenawa's_Reminiscence",
        DESC_ATK_18,
        "+50% Normal/Charged Attack DMG after Skill",
    ),
    (
        "Emblem_of_Severed_Fate",
        "+20% Energy Recharge",
        "+25% Burst DMG (ER-based)",
    ),
    (
        "Gilded_Dreams",
        "+80 Elemental Mastery",
        "+14% ATK/25% EM for each party type",
    ),
    (
        "Retracing_Bolide",
        "+35% Shield Strength",
        "+40% Normal/Charged DMG (shielded)",
    ),
    (
        "Vermillion_Hereafter",
        DESC_ATK_18,
        "+8% ATK (stacked 4x after Skill)",
    ),
    (
        "Marechaussee_Hunter",
        "+20% CRIT Rate (in Burst)",
        "+12% Normal/Charged DMG (stacked 3x)",
    ),
    (
        "Echoes_of_an_Offering",
        DESC_ATK_18,
        "70% chance for +30% Normal DMG",
    ),
    ("Golden_Troupe", "+20% Skill DMG", "+25% Skill DMG (off-field)"),
];

/// Read-only set name to bonus lookup, built once per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetEffectTable {
    sets: HashMap<String, SetBonus>,
}

impl SetEffectTable {
    pub fn new(sets: HashMap<String, SetBonus>) -> Self {
        Self { sets }
    }

    pub fn builtin() -> Self {
        let sets = BUILTIN_SETS
            .iter()
            .map(|&(name, two, four)| (name.to_string(), SetBonus::from_descriptors(two, four)))
            .collect();
        Self { sets }
    }

    /// Unknown sets carry no bonus.
    pub fn lookup(&self, set_name: &str) -> SetBonus {
        self.sets.get(set_name).copied().unwrap_or(SetBonus::NONE)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
