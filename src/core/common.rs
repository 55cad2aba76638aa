//! Common types for the simulator: coordinates, sides, shot outcomes and errors.

use crate::core::bitboard::BitBoardError;
use core::fmt;

/// A target coordinate, 0-indexed `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub row: usize,
    pub col: usize,
}

impl Shot {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Shot {
    fn from((row, col): (usize, usize)) -> Self {
        Shot { row, col }
    }
}

impl fmt::Display for Shot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// One of the two players of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The other player.
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Result of firing at a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The shot found nothing.
    Miss,
    /// The shot struck a ship that is still afloat.
    Hit,
    /// The shot struck the last intact segment of the ship at `ship` (fleet index).
    Sunk { ship: usize },
}

impl ShotOutcome {
    /// Hits and sinks both count toward the shooter's hit total.
    pub fn is_hit(self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Errors returned by board and knowledge operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (index out of range).
    BitBoardError(BitBoardError),
    /// Ship index is out of range for the fleet.
    InvalidIndex,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement runs off the board.
    ShipOutOfBounds,
    /// The cell was already resolved as a hit or miss.
    AlreadyResolved,
    /// Neither random attempts nor the exhaustive scan found room for the ship.
    UnableToPlaceShip,
    /// Every cell has already been resolved.
    NoUnresolvedCells,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidIndex => write!(f, "Ship index is out of range"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::AlreadyResolved => write!(f, "Cell was already resolved"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::NoUnresolvedCells => write!(f, "No unresolved cells remain"),
        }
    }
}

/// Rejected configuration. Raised before any match starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board side must be within `1..=26`.
    InvalidBoardSize(usize),
    /// The fleet has no ships.
    EmptyFleet,
    /// A ship has zero length or is longer than the board side.
    InvalidShipLength { name: alloc::string::String, length: usize },
    /// The fleet has more cells than the board.
    FleetTooLarge { cells: usize, capacity: usize },
    /// The fleet does not fit even with an exhaustive placement scan.
    FleetDoesNotFit,
    /// The density length list is empty or holds an impossible length.
    InvalidDensityLengths,
    /// At least one random placement attempt is required.
    NoPlacementAttempts,
    /// A batch needs at least one match.
    NoMatches,
    /// A batch needs at least one pairing.
    NoPairings,
    /// The timeline horizon must be positive.
    InvalidTimelineHorizon,
    /// The turn ceiling must be positive.
    InvalidTurnCeiling,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBoardSize(n) => write!(f, "Board size {} is not within 1..=26", n),
            ConfigError::EmptyFleet => write!(f, "Fleet has no ships"),
            ConfigError::InvalidShipLength { name, length } => {
                write!(f, "Ship '{}' has invalid length {}", name, length)
            }
            ConfigError::FleetTooLarge { cells, capacity } => write!(
                f,
                "Fleet needs {} cells but the board only has {}",
                cells, capacity
            ),
            ConfigError::FleetDoesNotFit => write!(f, "Fleet cannot be placed on the board"),
            ConfigError::InvalidDensityLengths => write!(f, "Invalid density ship lengths"),
            ConfigError::NoPlacementAttempts => write!(f, "Placement attempts must be at least 1"),
            ConfigError::NoMatches => write!(f, "Batch match count must be at least 1"),
            ConfigError::NoPairings => write!(f, "Batch needs at least one policy pairing"),
            ConfigError::InvalidTimelineHorizon => write!(f, "Timeline horizon must be at least 1"),
            ConfigError::InvalidTurnCeiling => write!(f, "Turn ceiling must be at least 1"),
        }
    }
}

/// Any error the simulator can report to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    Config(ConfigError),
    Board(BoardError),
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        SimError::Config(err)
    }
}

impl From<BoardError> for SimError {
    fn from(err: BoardError) -> Self {
        SimError::Board(err)
    }
}

impl From<BitBoardError> for SimError {
    fn from(err: BitBoardError) -> Self {
        SimError::Board(BoardError::from(err))
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Config(e) => write!(f, "configuration error: {}", e),
            SimError::Board(e) => write!(f, "board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
#[cfg(feature = "std")]
impl std::error::Error for SimError {}
