use battleship_sim::{
    calc_density, DensityLengths, DensityPolicy, GameConfig, HuntAndTargetPolicy, Knowledge,
    PolicyKind, Shot, TargetStack, TargetingPolicy, BOARD_SIZE,
};
use rand::{rngs::SmallRng, SeedableRng};

fn fleet_lengths() -> Vec<usize> {
    GameConfig::default().density_lengths()
}

#[test]
fn density_opens_at_the_first_central_peak() {
    let mut rng = SmallRng::seed_from_u64(0);
    let k = Knowledge::new(BOARD_SIZE);
    let mut stack = TargetStack::new();
    let mut policy = DensityPolicy::new(fleet_lengths());
    assert_eq!(policy.select_shot(&mut rng, &k, &mut stack), Shot::new(4, 4));
}

#[test]
fn density_after_a_miss_moves_diagonally() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut k = Knowledge::new(BOARD_SIZE);
    k.mark_miss(4, 4).unwrap();
    let mut stack = TargetStack::new();
    let mut policy = DensityPolicy::new(fleet_lengths());
    assert_eq!(policy.select_shot(&mut rng, &k, &mut stack), Shot::new(5, 5));
}

#[test]
fn density_finishes_the_stack_before_scanning() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut k = Knowledge::new(BOARD_SIZE);
    let mut stack = TargetStack::new();
    k.mark_hit(0, 0).unwrap();
    stack.push_neighbors(Shot::new(0, 0), BOARD_SIZE);
    let mut policy = DensityPolicy::new(fleet_lengths());
    // (0,1) was pushed last; the density peak is elsewhere.
    assert_eq!(policy.select_shot(&mut rng, &k, &mut stack), Shot::new(0, 1));
    assert_eq!(stack.len(), 1);
}

#[test]
fn hunt_queues_neighbours_in_fixed_order() {
    let mut stack = TargetStack::new();
    stack.push_neighbors(Shot::new(5, 5), BOARD_SIZE);
    assert_eq!(
        stack.as_slice(),
        &[
            Shot::new(4, 5),
            Shot::new(6, 5),
            Shot::new(5, 4),
            Shot::new(5, 6)
        ]
    );

    let mut rng = SmallRng::seed_from_u64(0);
    let mut k = Knowledge::new(BOARD_SIZE);
    k.mark_hit(5, 5).unwrap();
    let mut policy = HuntAndTargetPolicy::new();
    let mut popped = Vec::new();
    for _ in 0..4 {
        let shot = policy.select_shot(&mut rng, &k, &mut stack);
        k.mark_miss(shot.row, shot.col).unwrap();
        popped.push(shot);
    }
    assert_eq!(
        popped,
        vec![
            Shot::new(5, 6),
            Shot::new(5, 4),
            Shot::new(6, 5),
            Shot::new(4, 5)
        ]
    );
}

#[test]
fn legacy_lengths_change_the_map() {
    let k = Knowledge::new(BOARD_SIZE);
    let legacy = DensityLengths::Legacy.resolve(&GameConfig::default().fleet);
    assert_eq!(legacy, vec![5, 4, 3, 2, 1]);
    let fleet = calc_density(&k, &fleet_lengths());
    let old = calc_density(&k, &legacy);
    assert_ne!(fleet, old);
    // 5+4+3+2+1 per axis in the central band.
    assert_eq!(old[5 * BOARD_SIZE + 5], 30);
}

#[test]
fn every_policy_picks_an_unresolved_cell_until_the_board_is_full() {
    for kind in PolicyKind::ALL {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut k = Knowledge::new(5);
        let mut stack = TargetStack::new();
        let mut policy = kind.build(&[3, 2]);
        for _ in 0..25 {
            let shot = policy.select_shot(&mut rng, &k, &mut stack);
            assert!(!k.is_resolved(shot.row, shot.col), "{} repeated {}", kind, shot);
            k.mark_miss(shot.row, shot.col).unwrap();
        }
        assert_eq!(k.first_unresolved(), None);
    }
}
