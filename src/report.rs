//! Report of a finished single match and the one-slot store that keeps it.

#![cfg(feature = "std")]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, MatchResult, ShipSpec, Side};
use crate::policy::PolicyKind;

/// Shot totals of one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideReport {
    pub hits: usize,
    pub misses: usize,
    pub algo: PolicyKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ReportStats {
    pub a: SideReport,
    pub b: SideReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportParams {
    pub size: usize,
    /// The fleet, in placement order.
    pub ships: Vec<ShipSpec>,
    pub policy_a: PolicyKind,
    pub policy_b: PolicyKind,
}

/// Everything the report viewer shows for one match. A draw has no winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub winner: Option<Side>,
    pub turns: usize,
    pub timestamp: DateTime<Utc>,
    pub stats: ReportStats,
    pub params: ReportParams,
}

impl MatchReport {
    pub fn new(config: &GameConfig, result: &MatchResult, timestamp: DateTime<Utc>) -> Self {
        let side = |side: Side| {
            let s = result.stats(side);
            SideReport {
                hits: s.hits,
                misses: s.misses,
                algo: s.policy,
            }
        };
        Self {
            winner: result.winner(),
            turns: result.total_turns,
            timestamp,
            stats: ReportStats {
                a: side(Side::A),
                b: side(Side::B),
            },
            params: ReportParams {
                size: config.size,
                ships: config.fleet.ships().to_vec(),
                policy_a: result.stats_a.policy,
                policy_b: result.stats_b.policy,
            },
        }
    }

    /// Report stamped with the current time.
    pub fn now(config: &GameConfig, result: &MatchResult) -> Self {
        Self::new(config, result, Utc::now())
    }
}

/// Single-slot store: each save replaces the previous report.
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    async fn save(&self, report: &MatchReport) -> anyhow::Result<()>;
    /// The last saved report, if any.
    async fn load(&self) -> anyhow::Result<Option<MatchReport>>;
}

/// Keeps the report as pretty-printed JSON in one file.
#[derive(Debug, Clone)]
pub struct FileReportStore {
    path: PathBuf,
}

impl FileReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl ReportStore for FileReportStore {
    async fn save(&self, report: &MatchReport) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(report)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&self.path, json).await?;
        log::debug!("report saved to {}", self.path.display());
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<Option<MatchReport>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let report = serde_json::from_slice(&bytes)
            .map_err(|e| anyhow::anyhow!("corrupt report {}: {}", self.path.display(), e))?;
        Ok(Some(report))
    }
}

/// Report slot held in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    slot: Mutex<Option<MatchReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, report: &MatchReport) -> anyhow::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("report slot poisoned"))?;
        *slot = Some(report.clone());
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<Option<MatchReport>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("report slot poisoned"))?;
        Ok(slot.clone())
    }
}
