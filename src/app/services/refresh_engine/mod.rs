//! Refresh engine: polling, token serialization and registry swapping
//!
//! The engine owns the active registry and the freshness gate, and is the
//! only writer. Refresh cycles fire on a fixed interval and may overlap; a
//! monotonically increasing request token reconciles them, so only the most
//! recently issued cycle can install its result and late responses are
//! discarded silently. Replacement is an atomic `Arc` swap: readers always
//! see either the old or the new complete registry.
//!
//! All feed faults are absorbed here and collapse into two user-visible
//! states, "showing data" and "data unavailable"; the interval itself is the
//! retry mechanism.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::app::adapters::presentation::PresentationSink;
use crate::app::services::feed_parser::{FeedParser, ParseResult};
use crate::app::services::unit_registry::{Snapshot, UnitRegistry};
use crate::config::Config;
use crate::Result;

pub mod fetcher;
pub mod freshness;
pub mod watermark;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use fetcher::FeedFetcher;
pub use freshness::{FreshnessGate, GateDecision};
pub use watermark::WatermarkStore;

/// Outcome of one refresh cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot installed as the active registry
    Applied { units: usize, watermark: i64 },

    /// Snapshot parsed but not newer than the watermark; registry kept
    NotFresh,

    /// Snapshot parsed zero units; registry kept
    EmptySnapshot,

    /// A newer refresh was issued while this one was in flight; result
    /// discarded
    StaleToken,

    /// Transport failure; registry kept
    FetchFailed,
}

struct EngineState {
    registry: Arc<UnitRegistry>,
    gate: FreshnessGate,
    load_error: bool,
}

/// Engine owning the active registry and the refresh lifecycle
pub struct RefreshEngine {
    fetcher: FeedFetcher,
    parser: FeedParser,
    store: Option<WatermarkStore>,
    interval: Duration,
    token_counter: AtomicU64,
    state: RwLock<EngineState>,
}

impl RefreshEngine {
    /// Create an engine from configuration, restoring the persisted
    /// watermark when a store location is available
    pub fn new(config: &Config) -> Result<Self> {
        let store = config.effective_watermark_path().map(WatermarkStore::new);
        let watermark = store.as_ref().map(|s| s.load()).unwrap_or(0);
        if watermark > 0 {
            info!("restored freshness watermark {}", watermark);
        }

        Ok(Self {
            fetcher: FeedFetcher::new(config)?,
            parser: FeedParser::new(config.feed_shape),
            store,
            interval: config.refresh_interval(),
            token_counter: AtomicU64::new(0),
            state: RwLock::new(EngineState {
                registry: Arc::new(UnitRegistry::new()),
                gate: FreshnessGate::new(watermark),
                load_error: false,
            }),
        })
    }

    /// Issue the next refresh token. Later tokens supersede earlier ones.
    pub fn issue_token(&self) -> u64 {
        self.token_counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn latest_token(&self) -> u64 {
        self.token_counter.load(Ordering::SeqCst)
    }

    /// Run one refresh cycle: fetch, parse, gate, swap.
    ///
    /// `is_initial` marks the first cycle after startup, which accepts the
    /// snapshot regardless of its timestamp.
    pub async fn refresh(&self, is_initial: bool) -> RefreshOutcome {
        let token = self.issue_token();

        match self.fetcher.fetch_csv().await {
            Ok(text) => {
                let result = self.parser.parse(&text);
                self.apply_parse(token, result, is_initial)
            }
            Err(error) => {
                warn!("feed refresh failed: {}", error);
                self.record_fetch_failure(token)
            }
        }
    }

    /// Apply a parse result under the token gate.
    ///
    /// Exposed separately from [`refresh`](Self::refresh) so the gate and
    /// swap logic can be driven without a network round trip.
    pub fn apply_parse(
        &self,
        token: u64,
        result: ParseResult,
        is_initial: bool,
    ) -> RefreshOutcome {
        let mut state = self.state.write().expect("engine state lock poisoned");

        if token != self.latest_token() {
            debug!("discarding superseded refresh response (token {})", token);
            return RefreshOutcome::StaleToken;
        }

        match state.gate.evaluate(&result.snapshot, is_initial) {
            GateDecision::Empty => {
                warn!("feed snapshot contained no units; keeping current registry");
                if !state.gate.has_data() {
                    state.load_error = true;
                }
                RefreshOutcome::EmptySnapshot
            }
            GateDecision::Stale => {
                state.load_error = false;
                RefreshOutcome::NotFresh
            }
            GateDecision::Apply => {
                let Snapshot {
                    registry,
                    updated_at,
                } = result.snapshot;
                let units = registry.len();

                state.registry = Arc::new(registry);
                let advanced = state.gate.commit(updated_at);
                state.load_error = false;
                let watermark = state.gate.watermark();
                drop(state);

                if advanced {
                    self.persist_watermark(watermark);
                }

                info!("applied snapshot: {} units, watermark {}", units, watermark);
                RefreshOutcome::Applied { units, watermark }
            }
        }
    }

    fn record_fetch_failure(&self, token: u64) -> RefreshOutcome {
        let mut state = self.state.write().expect("engine state lock poisoned");

        if token != self.latest_token() {
            return RefreshOutcome::StaleToken;
        }

        // availability over freshness: once a snapshot has been shown, a
        // failed cycle keeps the stale registry up without surfacing an error
        if !state.gate.has_data() {
            state.load_error = true;
        }
        RefreshOutcome::FetchFailed
    }

    fn persist_watermark(&self, watermark: i64) {
        if let Some(store) = &self.store {
            if let Err(error) = store.save(watermark) {
                warn!("failed to persist watermark: {}", error);
            }
        }
    }

    /// The active registry. Cheap to call; clones an `Arc`.
    pub fn registry(&self) -> Arc<UnitRegistry> {
        Arc::clone(&self.state.read().expect("engine state lock poisoned").registry)
    }

    /// Whether any snapshot has ever been accepted
    pub fn has_data(&self) -> bool {
        self.state
            .read()
            .expect("engine state lock poisoned")
            .gate
            .has_data()
    }

    /// Whether the viewer should show "data unavailable"
    pub fn load_error(&self) -> bool {
        self.state
            .read()
            .expect("engine state lock poisoned")
            .load_error
    }

    /// Current freshness watermark in epoch milliseconds
    pub fn watermark(&self) -> i64 {
        self.state
            .read()
            .expect("engine state lock poisoned")
            .gate
            .watermark()
    }

    /// Run the polling loop until cancelled.
    ///
    /// The initial cycle runs inline; subsequent cycles spawn on each tick so
    /// a slow fetch never delays the next one. The token gate keeps only the
    /// most recently issued response.
    pub async fn run(
        self: Arc<Self>,
        cancel: CancellationToken,
        sink: Arc<dyn PresentationSink>,
    ) {
        let outcome = self.refresh(true).await;
        notify_sink(&self, &sink, &outcome);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await; // the first tick completes immediately

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("refresh loop cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let engine = Arc::clone(&self);
                    let sink = Arc::clone(&sink);
                    tokio::spawn(async move {
                        let outcome = engine.refresh(false).await;
                        notify_sink(&engine, &sink, &outcome);
                    });
                }
            }
        }
    }
}

fn notify_sink(engine: &RefreshEngine, sink: &Arc<dyn PresentationSink>, outcome: &RefreshOutcome) {
    match outcome {
        RefreshOutcome::Applied { .. } => sink.registry_applied(&engine.registry()),
        RefreshOutcome::FetchFailed | RefreshOutcome::EmptySnapshot => {
            if engine.load_error() {
                sink.data_unavailable();
            }
        }
        _ => {}
    }
}
