use alloc::vec::Vec;
use rand::rngs::SmallRng;

use super::random::random_unresolved;
use super::{PolicyKind, TargetingPolicy};
use crate::core::ai::{calc_density, densest_unresolved};
use crate::core::{Knowledge, Shot, TargetStack};

/// Finishes a detected ship from the stack first; with an empty stack it fires
/// at the unresolved cell covered by the most legal ship runs.
#[derive(Debug, Clone)]
pub struct DensityPolicy {
    lengths: Vec<usize>,
}

impl DensityPolicy {
    pub fn new(lengths: Vec<usize>) -> Self {
        Self { lengths }
    }

    /// Ship lengths the density scan counts runs for.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Density-only choice, ignoring any queued targets.
    pub fn densest(&self, knowledge: &Knowledge) -> Option<Shot> {
        let density = calc_density(knowledge, &self.lengths);
        densest_unresolved(knowledge, &density)
    }
}

impl TargetingPolicy for DensityPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::ProbabilityDensity
    }

    fn select_shot(
        &mut self,
        rng: &mut SmallRng,
        knowledge: &Knowledge,
        stack: &mut TargetStack,
    ) -> Shot {
        if let Some(shot) = stack.pop_unresolved(knowledge) {
            return shot;
        }
        self.densest(knowledge)
            .or_else(|| random_unresolved(rng, knowledge))
            .unwrap_or(Shot::new(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn reference() -> DensityPolicy {
        DensityPolicy::new(alloc::vec![5, 3, 3, 2, 2, 1])
    }

    #[test]
    fn empty_board_picks_first_central_cell() {
        let mut rng = SmallRng::seed_from_u64(0);
        let k = Knowledge::new(12);
        let mut stack = TargetStack::new();
        assert_eq!(
            reference().select_shot(&mut rng, &k, &mut stack),
            Shot::new(4, 4)
        );
    }

    #[test]
    fn stack_takes_precedence_over_density() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut k = Knowledge::new(12);
        let mut stack = TargetStack::new();
        k.mark_hit(0, 0).unwrap();
        stack.push_neighbors(Shot::new(0, 0), 12);
        assert_eq!(
            reference().select_shot(&mut rng, &k, &mut stack),
            Shot::new(0, 1)
        );
    }

    #[test]
    fn legacy_lengths_still_peak_in_the_centre() {
        let policy = DensityPolicy::new(alloc::vec![5, 4, 3, 2, 1]);
        let k = Knowledge::new(12);
        let shot = policy.densest(&k).unwrap();
        assert!((3..=8).contains(&shot.row) && (3..=8).contains(&shot.col));
    }
}
