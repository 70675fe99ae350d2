use tracing::debug;

use super::{Loadout, ScoredLoadout};

/// Best loadout seen so far.
///
/// Starts empty with a floor of zero damage; a loadout replaces the current best only when it
/// scores strictly higher, so the first of several equal scores is kept and NaN never wins.
#[derive(Debug, Clone, Default)]
pub struct ResultTracker<'a> {
    best: Option<ScoredLoadout<'a>>,
}

impl<'a> ResultTracker<'a> {
    pub fn new() -> Self {
        Self { best: None }
    }

    pub fn max_damage(&self) -> f64 {
        self.best.map_or(0.0, |best| best.damage)
    }

    pub fn best(&self) -> Option<&ScoredLoadout<'a>> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<ScoredLoadout<'a>> {
        self.best
    }

    /// Returns whether `loadout` became the new best.
    #[inline]
    pub fn offer(&mut self, loadout: Loadout<'a>, damage: f64) -> bool {
        if !(damage > self.max_damage()) {
            return false;
        }
        debug!(
            damage,
            weapon = %loadout.weapon.name,
            constellation = loadout.constellation,
            "new best loadout"
        );
        self.best = Some(ScoredLoadout { loadout, damage });
        true
    }

    /// Folds in a tracker covering a later part of the canonical order; ties keep `self`.
    pub fn merge(&mut self, other: ResultTracker<'a>) {
        if let Some(candidate) = other.best {
            if candidate.damage > self.max_damage() {
                self.best = Some(candidate);
            }
        }
    }
}
