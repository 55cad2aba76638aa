//! Command-line display helpers
//!
//! This module provides the terminal side of the simulator:
//! - a render sink that draws board snapshots
//! - the density map printout
//! - batch summary printing

#![cfg(feature = "std")]

pub mod interface;

pub use interface::*;
