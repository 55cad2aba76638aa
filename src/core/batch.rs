//! Batch runner: repeats matches for each policy pairing and aggregates win
//! rates, turn counts and per-turn hit trends.

use alloc::vec;
use alloc::vec::Vec;
use log::info;
use rand::rngs::SmallRng;

use crate::core::common::{Side, SimError};
use crate::core::config::BatchConfig;
use crate::core::game::{MatchEngine, MatchOutcome, MatchResult};
use crate::policy::PolicyKind;

/// Running totals for one policy pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    pub policy_a: PolicyKind,
    pub policy_b: PolicyKind,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    pub turns_history: Vec<usize>,
    /// Sum over matches of A's cumulative hits at each turn, up to the horizon.
    pub timeline_sum_a: Vec<u64>,
    pub timeline_sum_b: Vec<u64>,
    /// How many matches lasted long enough to contribute to each slot.
    pub timeline_samples: Vec<u32>,
    pub max_turns: usize,
}

impl AggregateStats {
    pub fn new(policy_a: PolicyKind, policy_b: PolicyKind, horizon: usize) -> Self {
        Self {
            policy_a,
            policy_b,
            a_wins: 0,
            b_wins: 0,
            draws: 0,
            turns_history: Vec::new(),
            timeline_sum_a: vec![0; horizon],
            timeline_sum_b: vec![0; horizon],
            timeline_samples: vec![0; horizon],
            max_turns: 0,
        }
    }

    pub fn matches(&self) -> usize {
        self.turns_history.len()
    }

    /// Fold one finished match in. Turns past the match's end are left alone.
    pub fn record(&mut self, result: &MatchResult) {
        match result.outcome {
            MatchOutcome::Winner(Side::A) => self.a_wins += 1,
            MatchOutcome::Winner(Side::B) => self.b_wins += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
        self.turns_history.push(result.total_turns);
        self.max_turns = self.max_turns.max(result.total_turns);

        let horizon = self.timeline_samples.len();
        for (t, &hits) in result.hits_timeline_a.iter().take(horizon).enumerate() {
            self.timeline_sum_a[t] += hits as u64;
            self.timeline_samples[t] += 1;
        }
        for (t, &hits) in result.hits_timeline_b.iter().take(horizon).enumerate() {
            self.timeline_sum_b[t] += hits as u64;
        }
    }

    /// Convert totals into percentages, averages and mean trend curves.
    pub fn finalize(&self) -> PairingSummary {
        let n = self.matches();
        let pct = |count: usize| {
            if n == 0 {
                0.0
            } else {
                count as f64 * 100.0 / n as f64
            }
        };
        let avg_turns = if n == 0 {
            0.0
        } else {
            self.turns_history.iter().sum::<usize>() as f64 / n as f64
        };
        let variance = if n == 0 {
            0.0
        } else {
            self.turns_history
                .iter()
                .map(|&t| {
                    let d = t as f64 - avg_turns;
                    d * d
                })
                .sum::<f64>()
                / n as f64
        };

        let trend_len = self.max_turns.min(self.timeline_samples.len());
        let mean = |sums: &[u64]| -> Vec<f64> {
            (0..trend_len)
                .map(|t| match self.timeline_samples[t] {
                    0 => 0.0,
                    k => sums[t] as f64 / k as f64,
                })
                .collect()
        };

        PairingSummary {
            policy_a: self.policy_a,
            policy_b: self.policy_b,
            matches: n,
            a_wins: self.a_wins,
            b_wins: self.b_wins,
            draws: self.draws,
            a_win_pct: pct(self.a_wins),
            b_win_pct: pct(self.b_wins),
            draw_pct: pct(self.draws),
            avg_turns,
            min_turns: self.turns_history.iter().copied().min().unwrap_or(0),
            max_turns: self.max_turns,
            turns_std_dev: libm::sqrt(variance),
            trend_a: mean(&self.timeline_sum_a),
            trend_b: mean(&self.timeline_sum_b),
        }
    }
}

/// Finalised statistics for one pairing, ready for charts and reports.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PairingSummary {
    pub policy_a: PolicyKind,
    pub policy_b: PolicyKind,
    pub matches: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    pub a_win_pct: f64,
    pub b_win_pct: f64,
    pub draw_pct: f64,
    pub avg_turns: f64,
    pub min_turns: usize,
    pub max_turns: usize,
    pub turns_std_dev: f64,
    /// Mean cumulative hits of A per turn, over the matches still running.
    pub trend_a: Vec<f64>,
    pub trend_b: Vec<f64>,
}

/// Consumer of finalised batch statistics.
pub trait StatsSink {
    fn accept(&mut self, summary: &PairingSummary);
}

impl StatsSink for Vec<PairingSummary> {
    fn accept(&mut self, summary: &PairingSummary) {
        self.push(summary.clone());
    }
}

/// Where a batch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub pairing: (PolicyKind, PolicyKind),
}

impl BatchProgress {
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.completed * 100 / self.total
        }
    }
}

/// Resumable batch of matches. Each `step` plays exactly one match, so a host
/// can interleave its own work between steps.
pub struct BatchRunner {
    config: BatchConfig,
    engine: MatchEngine,
    rng: SmallRng,
    stats: Vec<AggregateStats>,
    pairing: usize,
    played: usize,
    completed: usize,
}

impl BatchRunner {
    /// Validate the configuration up front; an infeasible fleet fails here.
    pub fn new(config: BatchConfig, rng: SmallRng) -> Result<Self, SimError> {
        config.validate()?;
        let engine = MatchEngine::new(config.game.clone())?;
        let stats = config
            .pairings
            .iter()
            .map(|&(a, b)| AggregateStats::new(a, b, config.timeline_horizon))
            .collect();
        info!(
            "batch: {} pairings x {} matches, {} turn order",
            config.pairings.len(),
            config.matches,
            config.game.turn_order
        );
        Ok(Self {
            config,
            engine,
            rng,
            stats,
            pairing: 0,
            played: 0,
            completed: 0,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.pairing >= self.config.pairings.len()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.config.total_matches()
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &[AggregateStats] {
        &self.stats
    }

    /// Play the next match. Returns `None` once every pairing is done.
    pub fn step(&mut self) -> Result<Option<BatchProgress>, SimError> {
        if self.is_finished() {
            return Ok(None);
        }
        let (a, b) = self.config.pairings[self.pairing];
        let result = self.engine.play(&mut self.rng, a, b)?;
        self.stats[self.pairing].record(&result);
        self.played += 1;
        self.completed += 1;
        let progress = BatchProgress {
            completed: self.completed,
            total: self.total(),
            pairing: (a, b),
        };
        if self.played == self.config.matches {
            let s = &self.stats[self.pairing];
            info!(
                "{} vs {}: {} / {} / {} draws",
                a, b, s.a_wins, s.b_wins, s.draws
            );
            self.pairing += 1;
            self.played = 0;
        }
        Ok(Some(progress))
    }

    /// Run every remaining match synchronously.
    pub fn run(mut self) -> Result<Vec<AggregateStats>, SimError> {
        while self.step()?.is_some() {}
        Ok(self.stats)
    }

    /// Run every remaining match, yielding to the tokio scheduler every
    /// `yield_every` matches.
    #[cfg(feature = "std")]
    pub async fn run_async(mut self) -> Result<Vec<AggregateStats>, SimError> {
        let every = self.config.yield_every.max(1);
        while let Some(progress) = self.step()? {
            if progress.completed % every == 0 {
                tokio::task::yield_now().await;
            }
        }
        Ok(self.stats)
    }
}

/// Finalise each pairing and hand it to `sink`.
pub fn publish(stats: &[AggregateStats], sink: &mut dyn StatsSink) {
    for s in stats {
        sink.accept(&s.finalize());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::SideStats;

    fn result(outcome: MatchOutcome, a: &[usize], b: &[usize]) -> MatchResult {
        let stats = |policy| SideStats {
            policy,
            hits: 0,
            misses: 0,
            redirects: 0,
            ships_sunk: 0,
        };
        MatchResult {
            outcome,
            total_turns: a.len(),
            hits_timeline_a: a.to_vec(),
            hits_timeline_b: b.to_vec(),
            stats_a: stats(PolicyKind::Random),
            stats_b: stats(PolicyKind::HuntAndTarget),
        }
    }

    #[test]
    fn uneven_match_lengths_average_per_slot() {
        let mut agg = AggregateStats::new(PolicyKind::Random, PolicyKind::HuntAndTarget, 200);
        agg.record(&result(MatchOutcome::Winner(Side::A), &[1, 2, 4], &[0, 1, 1]));
        agg.record(&result(MatchOutcome::Winner(Side::B), &[1], &[2]));
        agg.record(&result(MatchOutcome::Draw, &[0, 0], &[0, 1]));

        let s = agg.finalize();
        assert_eq!(s.matches, 3);
        assert_eq!((s.a_wins, s.b_wins, s.draws), (1, 1, 1));
        assert_eq!(s.max_turns, 3);
        assert_eq!(s.min_turns, 1);
        assert_eq!(s.trend_a.len(), 3);
        // Slot 2 only saw the three-turn match.
        assert_eq!(s.trend_a[2], 4.0);
        assert_eq!(s.trend_b[0], 2.0 / 3.0);
        assert_eq!(s.trend_b[1], 1.0);
        assert!((s.avg_turns - 2.0).abs() < 1e-9);
    }

    #[test]
    fn horizon_caps_the_timeline() {
        let mut agg = AggregateStats::new(PolicyKind::Random, PolicyKind::HuntAndTarget, 2);
        agg.record(&result(MatchOutcome::Winner(Side::A), &[1, 2, 3, 4], &[0, 0, 0, 0]));
        assert_eq!(agg.timeline_sum_a, vec![1, 2]);
        let s = agg.finalize();
        assert_eq!(s.max_turns, 4);
        assert_eq!(s.trend_a, vec![1.0, 2.0]);
    }

    #[test]
    fn percentages_and_spread() {
        let mut agg = AggregateStats::new(PolicyKind::Random, PolicyKind::HuntAndTarget, 10);
        agg.record(&result(MatchOutcome::Winner(Side::A), &[0, 0], &[0, 0]));
        agg.record(&result(MatchOutcome::Winner(Side::B), &[0, 0, 0, 0], &[0, 0, 0, 0]));
        let s = agg.finalize();
        assert_eq!(s.a_win_pct, 50.0);
        assert_eq!(s.b_win_pct, 50.0);
        assert_eq!(s.draw_pct, 0.0);
        assert_eq!(s.avg_turns, 3.0);
        assert_eq!(s.turns_std_dev, 1.0);
    }

    #[test]
    fn empty_stats_finalize_to_zeroes() {
        let s = AggregateStats::new(PolicyKind::Random, PolicyKind::Random, 5).finalize();
        assert_eq!(s.matches, 0);
        assert_eq!(s.avg_turns, 0.0);
        assert!(s.trend_a.is_empty());
    }
}
