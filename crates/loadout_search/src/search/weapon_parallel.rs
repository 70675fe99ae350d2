use rayon::prelude::*;

use super::nested_loops::scan_weapon;
use super::{ResultTracker, SearchSpace, Traversal, merge_in_order};
use crate::LoadoutScorer;

/// `NestedLoops` with the weapon axis spread over the rayon pool.
///
/// Each weapon gets a local tracker; locals are merged in weapon order, so the result matches
/// the sequential traversals exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponParallel;

impl Traversal for WeaponParallel {
    fn traverse<'a, S>(&self, space: &SearchSpace<'a>, scorer: &S) -> ResultTracker<'a>
    where
        S: LoadoutScorer + Sync + ?Sized,
    {
        let partitions: Vec<ResultTracker<'a>> = space
            .weapons()
            .par_iter()
            .map(|weapon| {
                let mut tracker = ResultTracker::new();
                scan_weapon(space, weapon, scorer, &mut tracker);
                tracker
            })
            .collect();
        merge_in_order(partitions)
    }
}
