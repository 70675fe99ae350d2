mod backtracking;
mod nested_loops;
mod tracker;
mod weapon_parallel;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::LoadoutScorer;
use crate::data::{Artifact, NUM_SLOTS, Slot, Substat, Weapon};

pub use backtracking::Backtracking;
pub use nested_loops::NestedLoops;
pub use tracker::ResultTracker;
pub use weapon_parallel::WeaponParallel;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("no {slot} artifact in the pool")]
    EmptySlot { slot: Slot },
    #[error("the weapon pool is empty")]
    NoWeapons,
    #[error("no candidate scored above zero")]
    NoScoringCandidate,
}

/// One weapon, one constellation level and one artifact per slot, in `Slot::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Loadout<'a> {
    pub weapon: &'a Weapon,
    pub constellation: u8,
    pub artifacts: [&'a Artifact; NUM_SLOTS],
}

impl<'a> Loadout<'a> {
    pub fn artifact(&self, slot: Slot) -> &'a Artifact {
        self.artifacts[slot.index()]
    }

    pub fn flower(&self) -> &'a Artifact {
        self.artifact(Slot::Flower)
    }

    /// Substats of the five artifacts followed by the weapon's.
    pub fn substats(&self) -> impl Iterator<Item = &'a Substat> {
        let artifacts = self.artifacts;
        artifacts
            .into_iter()
            .flat_map(|artifact| artifact.substats.iter())
            .chain(self.weapon.substats.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredLoadout<'a> {
    #[serde(flatten)]
    pub loadout: Loadout<'a>,
    pub damage: f64,
}

/// Read-only view of the pools a search runs over.
#[derive(Debug)]
pub struct SearchSpace<'a> {
    artifacts: &'a [Artifact],
    weapons: &'a [Weapon],
    by_slot: [Vec<&'a Artifact>; NUM_SLOTS],
    max_constellation: u8,
}

impl<'a> SearchSpace<'a> {
    /// Buckets keep the pool's relative order.
    pub fn new(artifacts: &'a [Artifact], weapons: &'a [Weapon], max_constellation: u8) -> Self {
        let mut by_slot: [Vec<&'a Artifact>; NUM_SLOTS] = Default::default();
        for artifact in artifacts {
            by_slot[artifact.slot.index()].push(artifact);
        }
        Self {
            artifacts,
            weapons,
            by_slot,
            max_constellation,
        }
    }

    pub fn artifacts(&self) -> &'a [Artifact] {
        self.artifacts
    }

    pub fn weapons(&self) -> &'a [Weapon] {
        self.weapons
    }

    pub fn pool(&self, slot: Slot) -> &[&'a Artifact] {
        &self.by_slot[slot.index()]
    }

    pub fn max_constellation(&self) -> u8 {
        self.max_constellation
    }

    pub fn constellation_levels(&self) -> usize {
        self.max_constellation as usize + 1
    }

    pub fn candidate_count(&self) -> u128 {
        self.by_slot.iter().fold(
            self.weapons.len() as u128 * self.constellation_levels() as u128,
            |acc, pool| acc.saturating_mul(pool.len() as u128),
        )
    }

    /// An empty pool means there is no legal loadout at all.
    pub fn check(&self) -> Result<(), SearchError> {
        if let Some(slot) = Slot::ALL.into_iter().find(|&s| self.pool(s).is_empty()) {
            return Err(SearchError::EmptySlot { slot });
        }
        if self.weapons.is_empty() {
            return Err(SearchError::NoWeapons);
        }
        Ok(())
    }
}

/// A way of visiting every loadout of a search space.
///
/// Implementations must return the loadout a single pass in canonical order would keep: weapons
/// in pool order, then constellation ascending, then artifacts Flower to Circlet in pool order,
/// replacing the best only on a strictly higher score.
pub trait Traversal {
    fn traverse<'a, S>(&self, space: &SearchSpace<'a>, scorer: &S) -> ResultTracker<'a>
    where
        S: LoadoutScorer + Sync + ?Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Iterative,
    Recursive,
    Parallel,
}

impl Traversal for Strategy {
    fn traverse<'a, S>(&self, space: &SearchSpace<'a>, scorer: &S) -> ResultTracker<'a>
    where
        S: LoadoutScorer + Sync + ?Sized,
    {
        match self {
            Strategy::Iterative => NestedLoops.traverse(space, scorer),
            Strategy::Recursive => Backtracking.traverse(space, scorer),
            Strategy::Parallel => WeaponParallel.traverse(space, scorer),
        }
    }
}

pub struct Enumerator<T: Traversal> {
    traversal: T,
}

impl<T: Traversal + std::fmt::Debug> Enumerator<T> {
    pub fn new(traversal: T) -> Self {
        Self { traversal }
    }

    pub fn search<'a, S>(
        &self,
        space: &SearchSpace<'a>,
        scorer: &S,
    ) -> Result<ScoredLoadout<'a>, SearchError>
    where
        S: LoadoutScorer + Sync + ?Sized,
    {
        space.check()?;
        info!(
            traversal = ?self.traversal,
            candidates = %space.candidate_count(),
            "starting loadout search"
        );

        let best = self
            .traversal
            .traverse(space, scorer)
            .into_best()
            .ok_or(SearchError::NoScoringCandidate)?;

        info!(
            damage = best.damage,
            weapon = %best.loadout.weapon.label(),
            constellation = best.loadout.constellation,
            "loadout search finished"
        );
        Ok(best)
    }
}

/// Folds per-partition trackers in partition order.
fn merge_in_order<'a, I>(partitions: I) -> ResultTracker<'a>
where
    I: IntoIterator<Item = ResultTracker<'a>>,
{
    partitions
        .into_iter()
        .fold(ResultTracker::new(), |mut acc, partition| {
            acc.merge(partition);
            acc
        })
}

#[cfg(test)]
pub(crate) mod test_pools {
    use crate::data::{Artifact, Slot, Substat, Weapon};

    pub fn artifact(set_name: &str, slot: Slot, substats: &[(&str, f64)]) -> Artifact {
        Artifact {
            set_name: set_name.to_string(),
            slot,
            main_stat: "ATK%".to_string(),
            main_stat_value: 46.6,
            substats: substats
                .iter()
                .map(|&(name, value)| Substat::new(name, value))
                .collect(),
        }
    }

    pub fn weapon(name: &str, refinement_level: i32, base_atk: f64, atk_bonus: f64) -> Weapon {
        Weapon {
            name: name.to_string(),
            refinement_level,
            base_atk,
            main_stat: "ATK%".to_string(),
            main_stat_value: atk_bonus,
            substats: vec![],
            bonus_dmg: 0.0,
        }
    }

    /// Two artifacts per slot where the second Feather and the first Goblet are strictly better.
    pub fn small_pool() -> Vec<Artifact> {
        vec![
            artifact("Blizzard_Strayer", Slot::Flower, &[("Crit_Rate%", 10.0)]),
            artifact("Gladiator's_Finale", Slot::Flower, &[("Crit_Rate%", 10.0)]),
            artifact("Blizzard_Strayer", Slot::Feather, &[("Crit_DMG%", 20.0)]),
            artifact("Blizzard_Strayer", Slot::Feather, &[("Crit_DMG%", 40.0)]),
            artifact("Blizzard_Strayer", Slot::Sands, &[("Crit_DMG%", 10.0)]),
            artifact("Blizzard_Strayer", Slot::Sands, &[("Crit_DMG%", 10.0)]),
            artifact("Blizzard_Strayer", Slot::Goblet, &[("Cryo_DMG%", 46.6)]),
            artifact("Blizzard_Strayer", Slot::Goblet, &[("ATK%", 46.6)]),
            artifact("Blizzard_Strayer", Slot::Circlet, &[("Crit_Rate%", 31.1)]),
            artifact("Blizzard_Strayer", Slot::Circlet, &[]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::test_pools::{artifact, small_pool, weapon};
    use super::*;
    use crate::{DamageModel, Element, SetActivation, SetEffectTable};

    fn strategies() -> [Strategy; 3] {
        [Strategy::Iterative, Strategy::Recursive, Strategy::Parallel]
    }

    #[test]
    fn buckets_keep_pool_order() {
        let artifacts = small_pool();
        let weapons = vec![weapon("Amos'_Bow", 1, 608.0, 49.6)];
        let space = SearchSpace::new(&artifacts, &weapons, 6);
        let feathers = space.pool(Slot::Feather);
        assert_eq!(feathers.len(), 2);
        assert!(std::ptr::eq(feathers[0], &artifacts[2]));
        assert!(std::ptr::eq(feathers[1], &artifacts[3]));
        assert_eq!(space.candidate_count(), 7 * 32);
    }

    #[test]
    fn empty_slot_is_reported_not_scored() {
        let artifacts: Vec<Artifact> = small_pool()
            .into_iter()
            .filter(|a| a.slot != Slot::Goblet)
            .collect();
        let weapons = vec![weapon("Amos'_Bow", 1, 608.0, 49.6)];
        let space = SearchSpace::new(&artifacts, &weapons, 6);
        let table = SetEffectTable::builtin();
        let model = DamageModel::new(Element::Cryo, &table, SetActivation::FlowerKeyed);
        for strategy in strategies() {
            assert_eq!(
                Enumerator::new(strategy).search(&space, &model),
                Err(SearchError::EmptySlot { slot: Slot::Goblet })
            );
        }
    }

    #[test]
    fn empty_weapon_pool_is_reported() {
        let artifacts = small_pool();
        let space = SearchSpace::new(&artifacts, &[], 6);
        let scorer = |_: &Loadout<'_>| 1.0;
        assert_eq!(
            Enumerator::new(Strategy::Iterative).search(&space, &scorer),
            Err(SearchError::NoWeapons)
        );
    }

    #[test]
    fn zero_scores_produce_no_candidate() {
        let artifacts = small_pool();
        let weapons = vec![weapon("Amos'_Bow", 1, 608.0, 49.6)];
        let space = SearchSpace::new(&artifacts, &weapons, 2);
        let scorer = |_: &Loadout<'_>| 0.0;
        for strategy in strategies() {
            assert_eq!(
                Enumerator::new(strategy).search(&space, &scorer),
                Err(SearchError::NoScoringCandidate)
            );
        }
    }

    #[test]
    fn finds_the_best_loadout() {
        let artifacts = small_pool();
        let weapons = vec![
            weapon("Favonius_Warbow", 3, 454.0, 0.0),
            weapon("Amos'_Bow", 1, 608.0, 49.6),
        ];
        let space = SearchSpace::new(&artifacts, &weapons, 6);
        let table = SetEffectTable::builtin();
        let model = DamageModel::new(Element::Cryo, &table, SetActivation::FlowerKeyed);

        let best = Enumerator::new(Strategy::Iterative)
            .search(&space, &model)
            .unwrap();
        assert_eq!(best.loadout.weapon.label(), "Amos'_Bow (R1)");
        assert_eq!(best.loadout.constellation, 0);
        assert_eq!(best.loadout.flower().set_name, "Blizzard_Strayer");
        assert!(std::ptr::eq(best.loadout.artifacts[0], &artifacts[0]));
        assert!(std::ptr::eq(best.loadout.artifacts[1], &artifacts[3]));
        assert!(std::ptr::eq(best.loadout.artifacts[2], &artifacts[4]));
        assert!(std::ptr::eq(best.loadout.artifacts[3], &artifacts[6]));
        assert!(std::ptr::eq(best.loadout.artifacts[4], &artifacts[8]));
        assert_eq!(model.score(&best.loadout), best.damage);
    }

    #[test]
    fn strategies_agree_on_small_pool() {
        let artifacts = small_pool();
        let weapons = vec![
            weapon("Favonius_Warbow", 3, 454.0, 0.0),
            weapon("Amos'_Bow", 1, 608.0, 49.6),
            weapon("Amos'_Bow", 1, 608.0, 49.6),
        ];
        let space = SearchSpace::new(&artifacts, &weapons, 6);
        let table = SetEffectTable::builtin();
        let model = DamageModel::new(Element::Cryo, &table, SetActivation::FlowerKeyed);

        let reference = Enumerator::new(Strategy::Iterative).search(&space, &model);
        for strategy in [Strategy::Recursive, Strategy::Parallel] {
            let other = Enumerator::new(strategy).search(&space, &model);
            assert_eq!(reference, other, "{strategy:?}");
        }
        let reference = reference.unwrap();
        assert!(std::ptr::eq(reference.loadout.weapon, &weapons[1]));
    }

    #[test]
    fn ties_keep_the_first_in_canonical_order() {
        // Every loadout scores the same; the first canonical one must win everywhere.
        let artifacts = vec![
            artifact("Golden_Troupe", Slot::Circlet, &[]),
            artifact("Golden_Troupe", Slot::Flower, &[]),
            artifact("Gilded_Dreams", Slot::Flower, &[]),
            artifact("Golden_Troupe", Slot::Goblet, &[]),
            artifact("Golden_Troupe", Slot::Sands, &[]),
            artifact("Golden_Troupe", Slot::Feather, &[]),
            artifact("Gilded_Dreams", Slot::Feather, &[]),
        ];
        let weapons = vec![weapon("Slingshot", 5, 354.0, 0.0), weapon("Rust", 5, 510.0, 0.0)];
        let space = SearchSpace::new(&artifacts, &weapons, 6);
        let scorer = |_: &Loadout<'_>| 42.0;
        for strategy in strategies() {
            let best = Enumerator::new(strategy).search(&space, &scorer).unwrap();
            assert!(std::ptr::eq(best.loadout.weapon, &weapons[0]), "{strategy:?}");
            assert_eq!(best.loadout.constellation, 0);
            assert!(std::ptr::eq(best.loadout.flower(), &artifacts[1]));
            assert!(std::ptr::eq(best.loadout.artifact(Slot::Feather), &artifacts[5]));
        }
    }

    #[test]
    fn constellation_aware_scorer_is_honored() {
        let artifacts = small_pool();
        let weapons = vec![weapon("Amos'_Bow", 1, 608.0, 49.6)];
        let space = SearchSpace::new(&artifacts, &weapons, 4);
        let scorer = |loadout: &Loadout<'_>| 1.0 + f64::from(loadout.constellation);
        for strategy in strategies() {
            let best = Enumerator::new(strategy).search(&space, &scorer).unwrap();
            assert_eq!(best.loadout.constellation, 4);
            assert_eq!(best.damage, 5.0);
        }
    }

    #[test]
    fn substats_pool_artifacts_then_weapon() {
        let artifacts = small_pool();
        let mut amos = weapon("Amos'_Bow", 1, 608.0, 49.6);
        amos.substats = vec![Substat::new("Crit_DMG%", 88.8)];
        let loadout = Loadout {
            weapon: &amos,
            constellation: 0,
            artifacts: [
                &artifacts[0],
                &artifacts[2],
                &artifacts[4],
                &artifacts[6],
                &artifacts[9],
            ],
        };
        let names: Vec<&str> = loadout.substats().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["Crit_Rate%", "Crit_DMG%", "Crit_DMG%", "Cryo_DMG%", "Crit_DMG%"]
        );
    }
}
