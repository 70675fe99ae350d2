use super::{Loadout, ResultTracker, SearchSpace, Traversal, merge_in_order};
use crate::LoadoutScorer;
use crate::data::{Artifact, NUM_SLOTS, Slot};

/// Depth-first selection of one artifact per slot, scoring every weapon and constellation level
/// at the leaves.
///
/// Leaves are reached artifact-major, so each (weapon, constellation) pair keeps its own tracker
/// and the trackers are merged weapon-major afterwards. Within a pair, artifact combinations
/// arrive in the same order as in `NestedLoops`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtracking;

impl Traversal for Backtracking {
    fn traverse<'a, S>(&self, space: &SearchSpace<'a>, scorer: &S) -> ResultTracker<'a>
    where
        S: LoadoutScorer + Sync + ?Sized,
    {
        let mut partitions =
            vec![ResultTracker::new(); space.weapons().len() * space.constellation_levels()];
        let mut selection: Vec<&'a Artifact> = Vec::with_capacity(NUM_SLOTS);
        descend(space, scorer, &mut selection, &mut partitions);
        merge_in_order(partitions)
    }
}

fn descend<'a, S>(
    space: &SearchSpace<'a>,
    scorer: &S,
    selection: &mut Vec<&'a Artifact>,
    partitions: &mut [ResultTracker<'a>],
) where
    S: LoadoutScorer + ?Sized,
{
    let depth = selection.len();
    if depth == NUM_SLOTS {
        score_leaf(space, scorer, selection, partitions);
        return;
    }

    let slot = Slot::ALL[depth];
    for artifact in space.artifacts().iter().filter(|a| a.slot == slot) {
        selection.push(artifact);
        descend(space, scorer, selection, partitions);
        selection.pop();
    }
}

fn score_leaf<'a, S>(
    space: &SearchSpace<'a>,
    scorer: &S,
    selection: &[&'a Artifact],
    partitions: &mut [ResultTracker<'a>],
) where
    S: LoadoutScorer + ?Sized,
{
    let artifacts: [&'a Artifact; NUM_SLOTS] = std::array::from_fn(|i| selection[i]);
    let levels = space.constellation_levels();
    for (weapon_idx, weapon) in space.weapons().iter().enumerate() {
        for constellation in 0..=space.max_constellation() {
            let loadout = Loadout {
                weapon,
                constellation,
                artifacts,
            };
            let damage = scorer.score(&loadout);
            partitions[weapon_idx * levels + constellation as usize].offer(loadout, damage);
        }
    }
}
