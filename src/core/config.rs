use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use super::board::Board;
use super::common::ConfigError;
use super::ship::ShipSpec;
use crate::policy::PolicyKind;

pub const BOARD_SIZE: usize = 12;
pub const MAX_BOARD_SIZE: usize = 26;

pub const STANDARD_FLEET: [ShipSpec; 6] = [
    ShipSpec::new("Portaerei", 5),
    ShipSpec::new("Incrociatore", 3),
    ShipSpec::new("Incrociatore", 3),
    ShipSpec::new("Cacciatorpediniere", 2),
    ShipSpec::new("Cacciatorpediniere", 2),
    ShipSpec::new("Sottomarino", 1),
];

/// Random placement tries per ship before the exhaustive scan takes over.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 500;

/// Ship lengths assumed by the older density variant regardless of the fleet.
pub const LEGACY_DENSITY_LENGTHS: [usize; 5] = [5, 4, 3, 2, 1];

pub const EXTRA_SHOT_TURN_CEILING: usize = 200;
pub const ALTERNATE_TURN_CEILING: usize = 1000;
pub const ROUND_TURN_CEILING: usize = 200;

/// Turns kept in the summed hit timelines of a batch.
pub const DEFAULT_TIMELINE_HORIZON: usize = 200;
/// Matches between cooperative yields in an async batch.
pub const DEFAULT_YIELD_EVERY: usize = 10;

/// Ordered list of ships both boards must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    ships: Vec<ShipSpec>,
}

impl Fleet {
    pub fn new(ships: Vec<ShipSpec>) -> Self {
        Self { ships }
    }

    /// The reference fleet: 5, 3, 3, 2, 2, 1.
    pub fn standard() -> Self {
        Self::new(STANDARD_FLEET.to_vec())
    }

    /// Build a fleet of anonymous ships from bare lengths.
    pub fn from_lengths(lengths: &[usize]) -> Self {
        let ships = lengths
            .iter()
            .enumerate()
            .map(|(i, &len)| ShipSpec::named(alloc::format!("Ship {}", i + 1), len))
            .collect();
        Self::new(ships)
    }

    pub fn ships(&self) -> &[ShipSpec] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Lengths in configured order.
    pub fn lengths(&self) -> Vec<usize> {
        self.ships.iter().map(|s| s.length()).collect()
    }

    /// Hits needed to sink the whole fleet.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(|s| s.length()).sum()
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Who fires next after a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnOrder {
    /// A hit grants the shooter another shot; the turn passes only on a miss.
    ExtraShotOnHit,
    /// The turn passes after every shot.
    Alternate,
    /// Both sides fire once per round, A first.
    Rounds,
}

impl TurnOrder {
    /// Safety bound on the number of turns for this mode on a `size`×`size`
    /// board. Never below the longest match the mode allows, so only a
    /// policy that stops making progress reaches it.
    pub fn default_ceiling(self, size: usize) -> usize {
        let cells = size * size;
        match self {
            // One turn is one possession; every possession but the last ends
            // on a miss, so both sides together spend at most 2·cells.
            TurnOrder::ExtraShotOnHit => EXTRA_SHOT_TURN_CEILING.max(2 * cells),
            TurnOrder::Alternate => ALTERNATE_TURN_CEILING.max(2 * cells),
            TurnOrder::Rounds => ROUND_TURN_CEILING.max(cells),
        }
    }
}

impl fmt::Display for TurnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TurnOrder::ExtraShotOnHit => "extra-shot",
            TurnOrder::Alternate => "alternate",
            TurnOrder::Rounds => "rounds",
        };
        f.write_str(s)
    }
}

/// Ship lengths the probability-density policy scans for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum DensityLengths {
    /// One entry per ship of the configured fleet.
    Fleet,
    /// `[5, 4, 3, 2, 1]`, whatever the fleet.
    Legacy,
    Custom(Vec<usize>),
}

impl DensityLengths {
    /// Concrete length list for `fleet`.
    pub fn resolve(&self, fleet: &Fleet) -> Vec<usize> {
        match self {
            DensityLengths::Fleet => fleet.lengths(),
            DensityLengths::Legacy => LEGACY_DENSITY_LENGTHS.to_vec(),
            DensityLengths::Custom(lengths) => lengths.clone(),
        }
    }
}

impl FromStr for DensityLengths {
    type Err = ConfigError;

    /// Accepts `fleet`, `legacy`, or a comma separated list such as `5,3,2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fleet" => Ok(DensityLengths::Fleet),
            "legacy" => Ok(DensityLengths::Legacy),
            list => list
                .split(',')
                .map(|part| part.trim().parse::<usize>())
                .collect::<Result<Vec<_>, _>>()
                .map(DensityLengths::Custom)
                .map_err(|_| ConfigError::InvalidDensityLengths),
        }
    }
}

/// Parameters of a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub size: usize,
    pub fleet: Fleet,
    pub placement_attempts: usize,
    pub turn_order: TurnOrder,
    /// Overrides the turn order's default ceiling.
    pub max_turns: Option<usize>,
    pub density_lengths: DensityLengths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: BOARD_SIZE,
            fleet: Fleet::standard(),
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            turn_order: TurnOrder::ExtraShotOnHit,
            max_turns: None,
            density_lengths: DensityLengths::Fleet,
        }
    }
}

impl GameConfig {
    /// Effective turn ceiling.
    pub fn turn_ceiling(&self) -> usize {
        self.max_turns
            .unwrap_or_else(|| self.turn_order.default_ceiling(self.size))
    }

    /// Lengths handed to the probability-density policy.
    pub fn density_lengths(&self) -> Vec<usize> {
        self.density_lengths.resolve(&self.fleet)
    }

    /// Hits needed to win.
    pub fn hits_to_win(&self) -> usize {
        self.fleet.total_cells()
    }

    /// Reject configurations no match could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > MAX_BOARD_SIZE {
            return Err(ConfigError::InvalidBoardSize(self.size));
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        for ship in self.fleet.ships() {
            if ship.length() == 0 || ship.length() > self.size {
                return Err(ConfigError::InvalidShipLength {
                    name: ship.name().into(),
                    length: ship.length(),
                });
            }
        }
        let capacity = self.size * self.size;
        if self.fleet.total_cells() > capacity {
            return Err(ConfigError::FleetTooLarge {
                cells: self.fleet.total_cells(),
                capacity,
            });
        }
        let lengths = self.density_lengths();
        if lengths.is_empty() || lengths.iter().any(|&l| l == 0 || l > self.size) {
            return Err(ConfigError::InvalidDensityLengths);
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::NoPlacementAttempts);
        }
        if self.max_turns == Some(0) {
            return Err(ConfigError::InvalidTurnCeiling);
        }
        let mut trial = Board::new(self.size, self.fleet.len());
        for (i, ship) in self.fleet.ships().iter().enumerate() {
            if trial.place_first_fit(i, ship.length()).is_err() {
                return Err(ConfigError::FleetDoesNotFit);
            }
        }
        Ok(())
    }
}

/// Parameters of a batch of repeated matches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    pub game: GameConfig,
    /// Matches per pairing.
    pub matches: usize,
    pub pairings: Vec<(PolicyKind, PolicyKind)>,
    pub timeline_horizon: usize,
    pub yield_every: usize,
}

impl BatchConfig {
    /// The three unordered pairings of distinct policies.
    pub fn default_pairings() -> Vec<(PolicyKind, PolicyKind)> {
        vec![
            (PolicyKind::Random, PolicyKind::HuntAndTarget),
            (PolicyKind::Random, PolicyKind::ProbabilityDensity),
            (PolicyKind::HuntAndTarget, PolicyKind::ProbabilityDensity),
        ]
    }

    pub fn new(matches: usize) -> Self {
        Self {
            game: GameConfig {
                turn_order: TurnOrder::Rounds,
                ..GameConfig::default()
            },
            matches,
            pairings: Self::default_pairings(),
            timeline_horizon: DEFAULT_TIMELINE_HORIZON,
            yield_every: DEFAULT_YIELD_EVERY,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        if self.matches == 0 {
            return Err(ConfigError::NoMatches);
        }
        if self.pairings.is_empty() {
            return Err(ConfigError::NoPairings);
        }
        if self.timeline_horizon == 0 {
            return Err(ConfigError::InvalidTimelineHorizon);
        }
        Ok(())
    }

    /// Matches across all pairings.
    pub fn total_matches(&self) -> usize {
        self.matches * self.pairings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fleet_needs_sixteen_hits() {
        assert_eq!(Fleet::standard().total_cells(), 16);
        assert_eq!(GameConfig::default().hits_to_win(), 16);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(BatchConfig::new(10).validate(), Ok(()));
    }

    #[test]
    fn ceilings_follow_turn_order() {
        let mut cfg = GameConfig::default();
        assert_eq!(cfg.turn_ceiling(), 2 * 144);
        cfg.turn_order = TurnOrder::Rounds;
        assert_eq!(cfg.turn_ceiling(), 200);
        cfg.turn_order = TurnOrder::Alternate;
        assert_eq!(cfg.turn_ceiling(), 1000);
        cfg.max_turns = Some(42);
        assert_eq!(cfg.turn_ceiling(), 42);
    }

    #[test]
    fn ceilings_grow_with_the_board() {
        assert_eq!(TurnOrder::ExtraShotOnHit.default_ceiling(5), 200);
        assert_eq!(TurnOrder::Rounds.default_ceiling(20), 400);
        assert_eq!(TurnOrder::Alternate.default_ceiling(30), 1800);
    }

    #[test]
    fn rejects_ship_longer_than_board() {
        let cfg = GameConfig {
            size: 4,
            fleet: Fleet::from_lengths(&[5]),
            density_lengths: DensityLengths::Custom(vec![2]),
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidShipLength { length: 5, .. })
        ));
    }

    #[test]
    fn rejects_fleet_larger_than_board() {
        let cfg = GameConfig {
            size: 3,
            fleet: Fleet::from_lengths(&[3, 3, 3, 1]),
            density_lengths: DensityLengths::Custom(vec![3]),
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::FleetTooLarge { cells: 10, capacity: 9 })
        );
    }

    #[test]
    fn accepts_tightly_packed_fleet() {
        let cfg = GameConfig {
            size: 3,
            fleet: Fleet::from_lengths(&[2, 2, 2, 2, 1]),
            density_lengths: DensityLengths::Custom(vec![2]),
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn legacy_density_lengths_ignore_fleet() {
        let cfg = GameConfig {
            density_lengths: DensityLengths::Legacy,
            ..GameConfig::default()
        };
        assert_eq!(cfg.density_lengths(), vec![5, 4, 3, 2, 1]);
        assert_eq!(
            GameConfig::default().density_lengths(),
            vec![5, 3, 3, 2, 2, 1]
        );
    }

    #[test]
    fn parses_density_lengths() {
        assert_eq!("fleet".parse(), Ok(DensityLengths::Fleet));
        assert_eq!("legacy".parse(), Ok(DensityLengths::Legacy));
        assert_eq!("5,3,2".parse(), Ok(DensityLengths::Custom(vec![5, 3, 2])));
        assert_eq!(
            "5,x".parse::<DensityLengths>(),
            Err(ConfigError::InvalidDensityLengths)
        );
    }
}
