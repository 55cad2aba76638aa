#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
pub mod policy;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod report;

pub use crate::core::*;
pub use policy::{
    DensityPolicy, HuntAndTargetPolicy, PolicyKind, RandomPolicy, TargetingPolicy, UnknownPolicy,
};

#[cfg(feature = "std")]
pub use cli::{print_density_board, print_summary, TerminalRenderer};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use report::{FileReportStore, InMemoryReportStore, MatchReport, ReportStore};
