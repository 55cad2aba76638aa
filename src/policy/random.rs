use rand::rngs::SmallRng;
use rand::Rng;

use super::{PolicyKind, TargetingPolicy};
use crate::core::{Knowledge, Shot, TargetStack};

/// Draws before a random pick gives up and scans, per board cell.
const RETRIES_PER_CELL: usize = 4;

/// Uniform sampling over unresolved cells.
#[derive(Debug, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

/// Sample unresolved cells uniformly. After a bounded number of rejected
/// draws, fall back to the first unresolved cell in row-major order.
pub fn random_unresolved<R: Rng + ?Sized>(rng: &mut R, knowledge: &Knowledge) -> Option<Shot> {
    let size = knowledge.size();
    let budget = RETRIES_PER_CELL * size * size;
    for _ in 0..budget {
        let r = rng.random_range(0..size);
        let c = rng.random_range(0..size);
        if !knowledge.is_resolved(r, c) {
            return Some(Shot::new(r, c));
        }
    }
    knowledge.first_unresolved()
}

impl TargetingPolicy for RandomPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Random
    }

    fn select_shot(
        &mut self,
        rng: &mut SmallRng,
        knowledge: &Knowledge,
        _stack: &mut TargetStack,
    ) -> Shot {
        random_unresolved(rng, knowledge).unwrap_or(Shot::new(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn never_picks_resolved_cells() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut k = Knowledge::new(4);
        let mut stack = TargetStack::new();
        let mut policy = RandomPolicy::new();
        for _ in 0..16 {
            let shot = policy.select_shot(&mut rng, &k, &mut stack);
            assert!(!k.is_resolved(shot.row, shot.col));
            k.mark_miss(shot.row, shot.col).unwrap();
        }
        assert_eq!(k.resolved_count(), 16);
    }

    #[test]
    fn nearly_exhausted_board_terminates() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut k = Knowledge::new(12);
        for r in 0..12 {
            for c in 0..12 {
                if (r, c) != (11, 7) {
                    k.mark_miss(r, c).unwrap();
                }
            }
        }
        assert_eq!(random_unresolved(&mut rng, &k), Some(Shot::new(11, 7)));
    }

    #[test]
    fn ignores_the_stack() {
        let mut rng = SmallRng::seed_from_u64(1);
        let k = Knowledge::new(12);
        let mut stack = TargetStack::new();
        stack.push_neighbors(Shot::new(5, 5), 12);
        RandomPolicy::new().select_shot(&mut rng, &k, &mut stack);
        assert_eq!(stack.len(), 4);
    }
}
