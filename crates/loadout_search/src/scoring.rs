use serde::{Deserialize, Serialize};

use crate::damage::{WeaponStats, calculate_damage};
use crate::data::{Element, NUM_SLOTS};
use crate::search::Loadout;
use crate::set_effect::{SetEffect, SetEffectTable};

const TWO_PIECE_THRESHOLD: usize = 2;
const FOUR_PIECE_THRESHOLD: usize = 4;

pub trait LoadoutScorer {
    fn score(&self, loadout: &Loadout<'_>) -> f64;
}

impl<F> LoadoutScorer for F
where
    F: Fn(&Loadout<'_>) -> f64,
{
    fn score(&self, loadout: &Loadout<'_>) -> f64 {
        self(loadout)
    }
}

/// How a loadout's set bonuses are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetActivation {
    /// Both bonuses of the Flower's set apply, whatever the other four pieces are.
    #[default]
    FlowerKeyed,
    /// A set's 2-piece bonus needs two equipped pieces of that set, its 4-piece bonus four.
    PieceCount,
}

/// The character's damage formula bound to its element and set table.
///
/// Constellation level is not an input of the formula.
pub struct DamageModel<'t> {
    element: Element,
    set_effects: &'t SetEffectTable,
    activation: SetActivation,
}

impl<'t> DamageModel<'t> {
    pub fn new(element: Element, set_effects: &'t SetEffectTable, activation: SetActivation) -> Self {
        Self {
            element,
            set_effects,
            activation,
        }
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn activation(&self) -> SetActivation {
        self.activation
    }

    /// At most two effects can be active: five pieces hold either one set with four or more
    /// pieces, or at most two sets with two or more.
    pub fn active_effects(&self, loadout: &Loadout<'_>) -> [SetEffect; 2] {
        match self.activation {
            SetActivation::FlowerKeyed => self.set_effects.lookup(&loadout.flower().set_name).effects(),
            SetActivation::PieceCount => self.counted_effects(loadout),
        }
    }

    fn counted_effects(&self, loadout: &Loadout<'_>) -> [SetEffect; 2] {
        let mut active = [SetEffect::Inert; 2];
        let mut filled = 0usize;
        let artifacts = &loadout.artifacts;
        for i in 0..NUM_SLOTS {
            let set_name = &artifacts[i].set_name;
            if artifacts[..i].iter().any(|a| &a.set_name == set_name) {
                continue;
            }
            let count = artifacts[i..]
                .iter()
                .filter(|a| &a.set_name == set_name)
                .count();
            if count < TWO_PIECE_THRESHOLD {
                continue;
            }
            let bonus = self.set_effects.lookup(set_name);
            active[filled] = bonus.two_piece;
            filled += 1;
            if count >= FOUR_PIECE_THRESHOLD {
                active[filled] = bonus.four_piece;
                filled += 1;
            }
        }
        active
    }
}

impl LoadoutScorer for DamageModel<'_> {
    fn score(&self, loadout: &Loadout<'_>) -> f64 {
        let effects = self.active_effects(loadout);
        calculate_damage(
            WeaponStats::from(loadout.weapon),
            loadout.substats(),
            &effects,
            self.element,
        )
    }
}
