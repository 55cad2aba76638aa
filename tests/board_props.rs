use battleship_sim::{Board, Fleet, Orientation, Shot, BOARD_SIZE};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64, attempts: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    Board::with_fleet(&mut rng, BOARD_SIZE, &Fleet::standard(), attempts).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placement_covers_exactly_the_fleet(seed in any::<u64>(), attempts in 0usize..20) {
        let board = random_board(seed, attempts);
        let fleet = Fleet::standard();
        prop_assert_eq!(board.ship_map().count_ones(), fleet.total_cells());
        prop_assert_eq!(board.ships().count(), fleet.len());

        // Masks add up to the shared map only if no two ships overlap.
        let summed: usize = board.ships().map(|s| s.mask().count_ones()).sum();
        prop_assert_eq!(summed, board.ship_map().count_ones());
    }

    #[test]
    fn every_ship_is_a_straight_run(seed in any::<u64>()) {
        let board = random_board(seed, 500);
        for ship in board.ships() {
            let cells = ship.cells();
            prop_assert_eq!(cells.len(), ship.length());
            let (r0, c0) = ship.origin();
            for (k, &(r, c)) in cells.iter().enumerate() {
                prop_assert!(r < BOARD_SIZE && c < BOARD_SIZE);
                match ship.orientation() {
                    Orientation::Horizontal => prop_assert_eq!((r, c), (r0, c0 + k)),
                    Orientation::Vertical => prop_assert_eq!((r, c), (r0 + k, c0)),
                }
            }
        }
    }

    #[test]
    fn all_sunk_ignores_misses(seed in any::<u64>(), extra in 0usize..60) {
        let mut board = random_board(seed, 500);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
        for _ in 0..extra {
            let shot = Shot::new(rng.random_range(0..BOARD_SIZE), rng.random_range(0..BOARD_SIZE));
            if !board.ship_map().get(shot.row, shot.col).unwrap() {
                let _ = board.fire(shot);
            }
        }
        prop_assert!(!board.check_all_sunk());
        let targets: Vec<(usize, usize)> = board.ships().flat_map(|s| s.cells()).collect();
        for (r, c) in targets {
            prop_assert!(board.fire(Shot::new(r, c)).unwrap().is_hit());
        }
        prop_assert!(board.check_all_sunk());
        prop_assert_eq!(board.remaining_ship_cells(), 0);
    }
}
