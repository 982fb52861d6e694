//! Snapshot freshness gate
//!
//! Decides whether a newly parsed snapshot supersedes the held registry. The
//! sheet republishes on every edit, so most fetched snapshots are identical
//! to the one on screen; the timestamp comparison keeps re-renders down and
//! protects against an out-of-order publish racing a newer one.

use tracing::debug;

use crate::app::services::unit_registry::Snapshot;

/// Gate decision for one parsed snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Install the snapshot as the active registry
    Apply,

    /// Snapshot is not newer than the watermark; keep the held registry
    Stale,

    /// Snapshot parsed no units; never replaces a registry
    Empty,
}

/// Freshness state: the watermark of the most recently accepted snapshot
#[derive(Debug, Clone)]
pub struct FreshnessGate {
    watermark: i64,
    has_data: bool,
}

impl FreshnessGate {
    /// Create a gate seeded with a restored watermark (0 when none was
    /// persisted)
    pub fn new(watermark: i64) -> Self {
        Self {
            watermark,
            has_data: false,
        }
    }

    /// Evaluate a parsed snapshot.
    ///
    /// The first successful parse is always accepted regardless of its
    /// timestamp. Later snapshots are accepted when they carry no timestamp
    /// (legacy sheets without an update column are always-fresh) or when the
    /// timestamp strictly exceeds the watermark. Snapshots with zero units
    /// are never accepted.
    pub fn evaluate(&self, snapshot: &Snapshot, is_initial: bool) -> GateDecision {
        if snapshot.registry.is_empty() {
            return GateDecision::Empty;
        }

        if is_initial {
            return GateDecision::Apply;
        }

        match snapshot.updated_at {
            None => GateDecision::Apply,
            Some(ts) if ts <= 0 => GateDecision::Apply,
            Some(ts) if ts > self.watermark => GateDecision::Apply,
            Some(ts) => {
                debug!(
                    "snapshot timestamp {} not newer than watermark {}",
                    ts, self.watermark
                );
                GateDecision::Stale
            }
        }
    }

    /// Record an accepted snapshot, returning `true` when the watermark
    /// advanced and should be persisted
    pub fn commit(&mut self, updated_at: Option<i64>) -> bool {
        self.has_data = true;
        match updated_at {
            Some(ts) if ts > 0 => {
                self.watermark = ts;
                true
            }
            _ => false,
        }
    }

    /// Current watermark in epoch milliseconds
    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    /// Whether any snapshot has ever been accepted
    pub fn has_data(&self) -> bool {
        self.has_data
    }
}
