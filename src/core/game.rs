//! Match engine: two policies fire at each other's freshly populated boards
//! until one fleet is gone or the turn ceiling is reached.

use alloc::boxed::Box;
use alloc::vec::Vec;
use log::{debug, warn};
use rand::rngs::SmallRng;

use crate::core::board::{Board, BoardSnapshot};
use crate::core::common::{BoardError, ConfigError, Side, SimError, Shot, ShotOutcome};
use crate::core::config::{GameConfig, TurnOrder};
use crate::core::knowledge::{Knowledge, TargetStack};
use crate::policy::{PolicyKind, TargetingPolicy};

/// Final outcome of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchOutcome {
    Winner(Side),
    /// The turn ceiling was reached before either fleet was sunk.
    Draw,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            MatchOutcome::Winner(side) => Some(side),
            MatchOutcome::Draw => None,
        }
    }
}

/// Per-side counters for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SideStats {
    pub policy: PolicyKind,
    pub hits: usize,
    pub misses: usize,
    /// Shots moved to the first unresolved cell because the policy picked a
    /// resolved one.
    pub redirects: usize,
    pub ships_sunk: usize,
}

impl SideStats {
    fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            hits: 0,
            misses: 0,
            redirects: 0,
            ships_sunk: 0,
        }
    }

    pub fn shots(&self) -> usize {
        self.hits + self.misses
    }
}

/// Immutable record of a completed match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub total_turns: usize,
    /// Cumulative hits of A after each turn.
    pub hits_timeline_a: Vec<usize>,
    /// Cumulative hits of B after each turn.
    pub hits_timeline_b: Vec<usize>,
    pub stats_a: SideStats,
    pub stats_b: SideStats,
}

impl MatchResult {
    pub fn winner(&self) -> Option<Side> {
        self.outcome.winner()
    }

    pub fn stats(&self, side: Side) -> &SideStats {
        match side {
            Side::A => &self.stats_a,
            Side::B => &self.stats_b,
        }
    }
}

/// A single resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotRecord {
    pub shooter: Side,
    pub shot: Shot,
    pub outcome: ShotOutcome,
    pub redirected: bool,
}

/// Shots fired during one turn: two in round mode, a whole possession with
/// extra shots on hit, one otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub number: usize,
    pub shots: Vec<ShotRecord>,
}

/// Consumer of board snapshots, called after each turn.
pub trait RenderSink {
    fn render(&mut self, owner: Side, snapshot: &BoardSnapshot, hide_ships: bool);
}

/// Sink that drops every snapshot.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn render(&mut self, _owner: Side, _snapshot: &BoardSnapshot, _hide_ships: bool) {}
}

struct PlayerState {
    /// This player's own fleet, fired on by the opponent.
    board: Board,
    /// What this player knows about the opponent's board.
    knowledge: Knowledge,
    stack: TargetStack,
    policy: Box<dyn TargetingPolicy>,
    stats: SideStats,
}

/// All mutable state of one match in progress.
pub struct MatchSession {
    size: usize,
    hits_to_win: usize,
    ceiling: usize,
    turn_order: TurnOrder,
    players: [PlayerState; 2],
    to_move: Side,
    turns: usize,
    timeline_a: Vec<usize>,
    timeline_b: Vec<usize>,
    outcome: Option<MatchOutcome>,
}

impl MatchSession {
    /// Populate both boards and seat the two policies. A moves first.
    pub fn new(
        rng: &mut SmallRng,
        config: &GameConfig,
        policy_a: Box<dyn TargetingPolicy>,
        policy_b: Box<dyn TargetingPolicy>,
    ) -> Result<Self, SimError> {
        let board_a = Board::with_fleet(rng, config.size, &config.fleet, config.placement_attempts)?;
        let board_b = Board::with_fleet(rng, config.size, &config.fleet, config.placement_attempts)?;
        let seat = |board: Board, policy: Box<dyn TargetingPolicy>| PlayerState {
            board,
            knowledge: Knowledge::new(config.size),
            stack: TargetStack::new(),
            stats: SideStats::new(policy.kind()),
            policy,
        };
        Ok(Self {
            size: config.size,
            hits_to_win: config.hits_to_win(),
            ceiling: config.turn_ceiling(),
            turn_order: config.turn_order,
            players: [seat(board_a, policy_a), seat(board_b, policy_b)],
            to_move: Side::A,
            turns: 0,
            timeline_a: Vec::new(),
            timeline_b: Vec::new(),
            outcome: None,
        })
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Side due to fire next.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// `side`'s own board.
    pub fn board(&self, side: Side) -> &Board {
        &self.players[side.index()].board
    }

    /// What `side` knows about its opponent's board.
    pub fn knowledge(&self, side: Side) -> &Knowledge {
        &self.players[side.index()].knowledge
    }

    pub fn stack(&self, side: Side) -> &TargetStack {
        &self.players[side.index()].stack
    }

    pub fn stats(&self, side: Side) -> &SideStats {
        &self.players[side.index()].stats
    }

    /// Play one turn. Returns `None` once the match is over.
    pub fn step(&mut self, rng: &mut SmallRng) -> Result<Option<Turn>, SimError> {
        if self.outcome.is_some() {
            return Ok(None);
        }
        self.turns += 1;
        let mut shots = Vec::with_capacity(2);
        match self.turn_order {
            TurnOrder::Rounds => {
                shots.push(self.fire(Side::A, rng)?);
                shots.push(self.fire(Side::B, rng)?);
            }
            TurnOrder::ExtraShotOnHit => {
                let shooter = self.to_move;
                loop {
                    let record = self.fire(shooter, rng)?;
                    shots.push(record);
                    if !record.outcome.is_hit() {
                        self.to_move = shooter.opponent();
                        break;
                    }
                    if self.players[shooter.index()].stats.hits >= self.hits_to_win {
                        break;
                    }
                }
            }
            TurnOrder::Alternate => {
                shots.push(self.fire(self.to_move, rng)?);
                self.to_move = self.to_move.opponent();
            }
        }
        self.timeline_a.push(self.players[0].stats.hits);
        self.timeline_b.push(self.players[1].stats.hits);
        self.outcome = self.check_outcome();
        Ok(Some(Turn {
            number: self.turns,
            shots,
        }))
    }

    fn check_outcome(&self) -> Option<MatchOutcome> {
        if self.players[0].stats.hits >= self.hits_to_win {
            Some(MatchOutcome::Winner(Side::A))
        } else if self.players[1].stats.hits >= self.hits_to_win {
            Some(MatchOutcome::Winner(Side::B))
        } else if self.turns >= self.ceiling {
            warn!(
                "match stopped at turn ceiling {} ({} vs {} hits)",
                self.ceiling, self.players[0].stats.hits, self.players[1].stats.hits
            );
            Some(MatchOutcome::Draw)
        } else {
            None
        }
    }

    fn fire(&mut self, shooter: Side, rng: &mut SmallRng) -> Result<ShotRecord, SimError> {
        let size = self.size;
        let [a, b] = &mut self.players;
        let (me, them) = match shooter {
            Side::A => (a, b),
            Side::B => (b, a),
        };

        let chosen = me.policy.select_shot(rng, &me.knowledge, &mut me.stack);
        let usable = chosen.row < size
            && chosen.col < size
            && !me.knowledge.is_resolved(chosen.row, chosen.col);
        let shot = if usable {
            chosen
        } else {
            let fallback = me
                .knowledge
                .first_unresolved()
                .ok_or(BoardError::NoUnresolvedCells)?;
            debug!("{} picked resolved cell {}, redirected to {}", shooter, chosen, fallback);
            me.stats.redirects += 1;
            fallback
        };

        let outcome = them.board.fire(shot)?;
        if outcome.is_hit() {
            me.knowledge.mark_hit(shot.row, shot.col)?;
            me.stack.push_neighbors(shot, size);
            me.stats.hits += 1;
            if let ShotOutcome::Sunk { .. } = outcome {
                me.stats.ships_sunk += 1;
            }
        } else {
            me.knowledge.mark_miss(shot.row, shot.col)?;
            me.stats.misses += 1;
        }
        debug!("{} fires at {}: {:?}", shooter, shot, outcome);

        Ok(ShotRecord {
            shooter,
            shot,
            outcome,
            redirected: !usable,
        })
    }

    /// Play until the match is decided.
    pub fn run(&mut self, rng: &mut SmallRng) -> Result<MatchOutcome, SimError> {
        while self.step(rng)?.is_some() {}
        self.outcome.ok_or(SimError::Board(BoardError::NoUnresolvedCells))
    }

    /// Hand both boards to `sink`. `reveal` decides per side whether ships show.
    pub fn render(&self, sink: &mut dyn RenderSink, reveal: [bool; 2]) {
        for side in [Side::A, Side::B] {
            let snapshot = self.board(side).snapshot();
            sink.render(side, &snapshot, !reveal[side.index()]);
        }
    }

    /// Snapshot of the finished (or interrupted) match.
    pub fn result(&self) -> MatchResult {
        MatchResult {
            outcome: self.outcome.unwrap_or(MatchOutcome::Draw),
            total_turns: self.turns,
            hits_timeline_a: self.timeline_a.clone(),
            hits_timeline_b: self.timeline_b.clone(),
            stats_a: self.players[0].stats,
            stats_b: self.players[1].stats,
        }
    }

    /// Consume the session, keeping only its result.
    pub fn into_result(self) -> MatchResult {
        MatchResult {
            outcome: self.outcome.unwrap_or(MatchOutcome::Draw),
            total_turns: self.turns,
            hits_timeline_a: self.timeline_a,
            hits_timeline_b: self.timeline_b,
            stats_a: self.players[0].stats,
            stats_b: self.players[1].stats,
        }
    }
}

/// Validated match parameters shared by every match it plays.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: GameConfig,
    density_lengths: Vec<usize>,
}

impl MatchEngine {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let density_lengths = config.density_lengths();
        Ok(Self {
            config,
            density_lengths,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a match between two built-in policies.
    pub fn session(
        &self,
        rng: &mut SmallRng,
        policy_a: PolicyKind,
        policy_b: PolicyKind,
    ) -> Result<MatchSession, SimError> {
        MatchSession::new(
            rng,
            &self.config,
            policy_a.build(&self.density_lengths),
            policy_b.build(&self.density_lengths),
        )
    }

    /// Play a whole match.
    pub fn play(
        &self,
        rng: &mut SmallRng,
        policy_a: PolicyKind,
        policy_b: PolicyKind,
    ) -> Result<MatchResult, SimError> {
        let mut session = self.session(rng, policy_a, policy_b)?;
        session.run(rng)?;
        Ok(session.into_result())
    }
}
