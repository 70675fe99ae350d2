use super::{Loadout, ResultTracker, SearchSpace, Traversal};
use crate::LoadoutScorer;
use crate::data::{Slot, Weapon};

/// Flat cartesian product over the slot buckets, weapon-major.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedLoops;

impl Traversal for NestedLoops {
    fn traverse<'a, S>(&self, space: &SearchSpace<'a>, scorer: &S) -> ResultTracker<'a>
    where
        S: LoadoutScorer + Sync + ?Sized,
    {
        let mut tracker = ResultTracker::new();
        for weapon in space.weapons() {
            scan_weapon(space, weapon, scorer, &mut tracker);
        }
        tracker
    }
}

/// Every loadout built around `weapon`, in canonical order.
pub(super) fn scan_weapon<'a, S>(
    space: &SearchSpace<'a>,
    weapon: &'a Weapon,
    scorer: &S,
    tracker: &mut ResultTracker<'a>,
) where
    S: LoadoutScorer + ?Sized,
{
    let flowers = space.pool(Slot::Flower);
    let feathers = space.pool(Slot::Feather);
    let sands_pool = space.pool(Slot::Sands);
    let goblets = space.pool(Slot::Goblet);
    let circlets = space.pool(Slot::Circlet);

    for constellation in 0..=space.max_constellation() {
        for &flower in flowers {
            for &feather in feathers {
                for &sands in sands_pool {
                    for &goblet in goblets {
                        for &circlet in circlets {
                            let loadout = Loadout {
                                weapon,
                                constellation,
                                artifacts: [flower, feather, sands, goblet, circlet],
                            };
                            let damage = scorer.score(&loadout);
                            tracker.offer(loadout, damage);
                        }
                    }
                }
            }
        }
    }
}
