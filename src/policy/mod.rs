//! Targeting policies
//!
//! This module defines the `TargetingPolicy` trait and its implementations:
//! - RandomPolicy: uniform sampling over unresolved cells
//! - HuntAndTargetPolicy: random search, then pursue the neighbours of each hit
//! - DensityPolicy: pursue queued neighbours, otherwise fire at the densest cell

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use rand::rngs::SmallRng;

use crate::core::{Knowledge, Shot, TargetStack};

/// Shot-selection strategy used by one side of a match.
///
/// A policy reads the shooter's knowledge of the opponent board and the
/// shooter's follow-up stack, and returns the next target. The engine pushes
/// neighbours onto the stack after every hit, whatever the policy.
pub trait TargetingPolicy: Send {
    /// Which of the three strategies this is.
    fn kind(&self) -> PolicyKind;

    /// Choose the next target. The result should be unresolved; the engine
    /// redirects it otherwise.
    fn select_shot(&mut self, rng: &mut SmallRng, knowledge: &Knowledge, stack: &mut TargetStack)
        -> Shot;
}

/// The three difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum PolicyKind {
    /// "easy"
    Random,
    /// "medium"
    HuntAndTarget,
    /// "hard"
    ProbabilityDensity,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Random,
        PolicyKind::HuntAndTarget,
        PolicyKind::ProbabilityDensity,
    ];

    /// Build a policy instance. `density_lengths` is only read by the
    /// probability-density policy.
    pub fn build(self, density_lengths: &[usize]) -> Box<dyn TargetingPolicy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new()),
            PolicyKind::HuntAndTarget => Box::new(HuntAndTargetPolicy::new()),
            PolicyKind::ProbabilityDensity => {
                Box::new(DensityPolicy::new(Vec::from(density_lengths)))
            }
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Random => "Random",
            PolicyKind::HuntAndTarget => "Hunt & Target",
            PolicyKind::ProbabilityDensity => "Prob. Map",
        }
    }

    /// Short identifier used on the command line and in reports.
    pub fn id(self) -> &'static str {
        match self {
            PolicyKind::Random => "easy",
            PolicyKind::HuntAndTarget => "medium",
            PolicyKind::ProbabilityDensity => "hard",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognised policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy;

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown policy (expected easy|medium|hard or random|hunt|density)")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownPolicy {}

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "random" => Ok(PolicyKind::Random),
            "medium" | "hunt" | "hunt-and-target" => Ok(PolicyKind::HuntAndTarget),
            "hard" | "density" | "probability" => Ok(PolicyKind::ProbabilityDensity),
            _ => Err(UnknownPolicy),
        }
    }
}

pub mod density;
pub mod hunt;
pub mod random;

pub use density::DensityPolicy;
pub use hunt::HuntAndTargetPolicy;
pub use random::RandomPolicy;
