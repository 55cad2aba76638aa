use rand::rngs::SmallRng;

use super::random::random_unresolved;
use super::{PolicyKind, TargetingPolicy};
use crate::core::{Knowledge, Shot, TargetStack};

/// Random search until a hit, then work through the queued neighbours.
#[derive(Debug, Default)]
pub struct HuntAndTargetPolicy;

impl HuntAndTargetPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl TargetingPolicy for HuntAndTargetPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::HuntAndTarget
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
        random_unresolved(rng, knowledge).unwrap_or(Shot::new(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn pursues_last_queued_neighbour_first() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut k = Knowledge::new(12);
        let mut stack = TargetStack::new();
        k.mark_hit(5, 5).unwrap();
        stack.push_neighbors(Shot::new(5, 5), 12);

        let mut policy = HuntAndTargetPolicy::new();
        assert_eq!(policy.select_shot(&mut rng, &k, &mut stack), Shot::new(5, 6));
        k.mark_miss(5, 6).unwrap();
        assert_eq!(policy.select_shot(&mut rng, &k, &mut stack), Shot::new(5, 4));
    }

    #[test]
    fn skips_resolved_entries_then_hunts() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut k = Knowledge::new(12);
        let mut stack = TargetStack::new();
        stack.push(Shot::new(0, 0));
        k.mark_miss(0, 0).unwrap();

        let shot = HuntAndTargetPolicy::new().select_shot(&mut rng, &k, &mut stack);
        assert!(stack.is_empty());
        assert!(!k.is_resolved(shot.row, shot.col));
    }
}
