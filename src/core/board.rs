//! A player's own grid: ship placement and incoming fire.

use alloc::vec::Vec;
use core::fmt;
use log::debug;
use rand::Rng;

use crate::core::bitboard::BitBoard;
use crate::core::common::{BoardError, Shot, ShotOutcome};
use crate::core::config::Fleet;
use crate::core::ship::{Orientation, PlacedShip};

/// State of a single cell of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Empty,
    Ship,
    Hit,
    Miss,
}

/// Cell-by-cell copy of a board, handed to render sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub size: usize,
    pub cells: Vec<Cell>,
}

impl BoardSnapshot {
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }
}

/// Ship placements, hits and misses for one player.
#[derive(Clone)]
pub struct Board {
    size: usize,
    slots: Vec<Option<PlacedShip>>,
    ship_map: BitBoard,
    hits: BitBoard,
    misses: BitBoard,
}

impl Board {
    /// Create an empty `size`×`size` board with room for `fleet_len` ships.
    pub fn new(size: usize, fleet_len: usize) -> Self {
        Board {
            size,
            slots: (0..fleet_len).map(|_| None).collect(),
            ship_map: BitBoard::new(size),
            hits: BitBoard::new(size),
            misses: BitBoard::new(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> &BitBoard {
        &self.ship_map
    }

    pub fn hits(&self) -> &BitBoard {
        &self.hits
    }

    pub fn misses(&self) -> &BitBoard {
        &self.misses
    }

    /// Placed ships in fleet order.
    pub fn ships(&self) -> impl Iterator<Item = &PlacedShip> {
        self.slots.iter().flatten()
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        if self.hits.get(row, col)? {
            Ok(Cell::Hit)
        } else if self.misses.get(row, col)? {
            Ok(Cell::Miss)
        } else if self.ship_map.get(row, col)? {
            Ok(Cell::Ship)
        } else {
            Ok(Cell::Empty)
        }
    }

    /// True if a run of `length` at (`row`, `col`) stays in bounds and every
    /// target cell is currently empty.
    pub fn can_place(&self, row: usize, col: usize, length: usize, orientation: Orientation) -> bool {
        if !orientation.fits(row, col, length, self.size) {
            return false;
        }
        (0..length).all(|k| {
            let (r, c) = orientation.step(row, col, k);
            !self.ship_map.get(r, c).unwrap_or(true)
        })
    }

    /// Place fleet entry `index` of `length` at (row, col) and orientation.
    pub fn place(
        &mut self,
        index: usize,
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if index >= self.slots.len() {
            return Err(BoardError::InvalidIndex);
        }
        let ship = PlacedShip::new(index, length, orientation, row, col, self.size)?;
        if self.ship_map.intersects(ship.mask()) {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map = &self.ship_map | ship.mask();
        self.slots[index] = Some(ship);
        Ok(())
    }

    /// Try up to `attempts` uniformly random positions and orientations.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        attempts: usize,
    ) -> Option<(usize, usize, Orientation)> {
        for _ in 0..attempts {
            let r = rng.random_range(0..self.size);
            let c = rng.random_range(0..self.size);
            let orient = if rng.random_bool(0.5) {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            if self.can_place(r, c, length, orient) {
                return Some((r, c, orient));
            }
        }
        None
    }

    /// First valid position in row-major order, horizontal before vertical.
    pub fn first_fit(&self, length: usize) -> Option<(usize, usize, Orientation)> {
        for r in 0..self.size {
            for c in 0..self.size {
                for orient in Orientation::ALL {
                    if self.can_place(r, c, length, orient) {
                        return Some((r, c, orient));
                    }
                }
            }
        }
        None
    }

    /// Place fleet entry `index` at the first valid position of the scan.
    pub fn place_first_fit(&mut self, index: usize, length: usize) -> Result<(), BoardError> {
        let (r, c, o) = self.first_fit(length).ok_or(BoardError::UnableToPlaceShip)?;
        self.place(index, length, r, c, o)
    }

    /// Place every ship of `fleet` in configured order. Each ship gets
    /// `attempts` random tries before falling back to the exhaustive scan.
    pub fn place_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fleet: &Fleet,
        attempts: usize,
    ) -> Result<(), BoardError> {
        for (i, spec) in fleet.ships().iter().enumerate() {
            let len = spec.length();
            let (r, c, o) = match self.random_placement(rng, len, attempts) {
                Some(p) => p,
                None => {
                    debug!("random placement exhausted for {}, scanning", spec.name());
                    self.first_fit(len).ok_or(BoardError::UnableToPlaceShip)?
                }
            };
            self.place(i, len, r, c, o)?;
        }
        Ok(())
    }

    /// A freshly populated board for `fleet`.
    pub fn with_fleet<R: Rng + ?Sized>(
        rng: &mut R,
        size: usize,
        fleet: &Fleet,
        attempts: usize,
    ) -> Result<Self, BoardError> {
        let mut board = Board::new(size, fleet.len());
        board.place_fleet(rng, fleet, attempts)?;
        Ok(board)
    }

    /// Returns `true` when no cell remains in state `Ship`.
    pub fn check_all_sunk(&self) -> bool {
        (&self.ship_map & &!&self.hits).is_empty()
    }

    /// Ship cells not yet hit.
    pub fn remaining_ship_cells(&self) -> usize {
        self.ship_map.count_ones() - (&self.ship_map & &self.hits).count_ones()
    }

    /// Process a shot, marking a hit or a miss and reporting the result.
    pub fn fire(&mut self, shot: Shot) -> Result<ShotOutcome, BoardError> {
        let Shot { row, col } = shot;
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Err(BoardError::AlreadyResolved);
        }
        if !self.ship_map.get(row, col)? {
            self.misses.set(row, col)?;
            return Ok(ShotOutcome::Miss);
        }
        self.hits.set(row, col)?;
        for ship in self.slots.iter_mut().flatten() {
            if ship.register_hit(row, col) {
                if ship.is_sunk() {
                    return Ok(ShotOutcome::Sunk { ship: ship.spec() });
                }
                return Ok(ShotOutcome::Hit);
            }
        }
        Ok(ShotOutcome::Hit)
    }

    /// Copy of every cell, row-major.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells = Vec::with_capacity(self.size * self.size);
        for r in 0..self.size {
            for c in 0..self.size {
                cells.push(self.cell(r, c).unwrap_or(Cell::Empty));
            }
        }
        BoardSnapshot {
            size: self.size,
            cells,
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.hits, self.misses, self.slots
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::STANDARD_FLEET;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn manual_place_and_sink() {
        let mut board = Board::new(12, 1);
        board.place(0, 3, 0, 0, Orientation::Horizontal).unwrap();
        assert_eq!(board.fire(Shot::new(0, 0)).unwrap(), ShotOutcome::Hit);
        assert_eq!(board.fire(Shot::new(0, 1)).unwrap(), ShotOutcome::Hit);
        assert_eq!(board.fire(Shot::new(1, 1)).unwrap(), ShotOutcome::Miss);
        assert!(!board.check_all_sunk());
        assert_eq!(
            board.fire(Shot::new(0, 2)).unwrap(),
            ShotOutcome::Sunk { ship: 0 }
        );
        assert!(board.check_all_sunk());
        assert_eq!(
            board.fire(Shot::new(0, 2)).unwrap_err(),
            BoardError::AlreadyResolved
        );
    }

    #[test]
    fn rejects_overlap_and_out_of_bounds() {
        let mut board = Board::new(12, 2);
        board.place(0, 5, 2, 2, Orientation::Vertical).unwrap();
        assert_eq!(
            board.place(1, 3, 4, 0, Orientation::Horizontal),
            Err(BoardError::ShipOverlaps)
        );
        assert_eq!(
            board.place(1, 3, 0, 10, Orientation::Horizontal),
            Err(BoardError::ShipOutOfBounds)
        );
        assert_eq!(
            board.place(2, 1, 0, 0, Orientation::Horizontal),
            Err(BoardError::InvalidIndex)
        );
    }

    #[test]
    fn first_fit_scans_row_major_horizontal_first() {
        let mut board = Board::new(3, 3);
        assert_eq!(board.first_fit(3), Some((0, 0, Orientation::Horizontal)));
        board.place(0, 2, 0, 1, Orientation::Horizontal).unwrap();
        // (0,0) cannot go horizontal any more but can still go down.
        assert_eq!(board.first_fit(3), Some((0, 0, Orientation::Vertical)));
    }

    #[test]
    fn fallback_scan_places_when_random_budget_is_zero() {
        let mut rng = SmallRng::seed_from_u64(7);
        let fleet = Fleet::new(STANDARD_FLEET.to_vec());
        let board = Board::with_fleet(&mut rng, 12, &fleet, 0).unwrap();
        assert_eq!(board.ship_map().count_ones(), 16);
        // Scan packs the carrier into the top-left corner.
        assert_eq!(board.cell(0, 0).unwrap(), Cell::Ship);
        assert_eq!(board.cell(0, 4).unwrap(), Cell::Ship);
    }

    #[test]
    fn all_sunk_ignores_miss_distribution() {
        let mut board = Board::new(4, 1);
        board.place(0, 1, 3, 3, Orientation::Horizontal).unwrap();
        board.fire(Shot::new(0, 0)).unwrap();
        board.fire(Shot::new(1, 2)).unwrap();
        assert!(!board.check_all_sunk());
        board.fire(Shot::new(3, 3)).unwrap();
        assert!(board.check_all_sunk());
        assert_eq!(board.remaining_ship_cells(), 0);
    }

    #[test]
    fn snapshot_reflects_cells() {
        let mut board = Board::new(2, 1);
        board.place(0, 1, 0, 0, Orientation::Horizontal).unwrap();
        board.fire(Shot::new(1, 1)).unwrap();
        let snap = board.snapshot();
        assert_eq!(snap.cell(0, 0), Cell::Ship);
        assert_eq!(snap.cell(1, 1), Cell::Miss);
        assert_eq!(snap.cell(0, 1), Cell::Empty);
    }
}
