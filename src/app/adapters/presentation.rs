//! Presentation-layer contract
//!
//! The core holds no UI dependency; the display surface (SVG plan, detail
//! panel, or the CLI watch view) implements this trait and receives registry
//! updates from the refresh loop. Interaction flows the other way through
//! [`ViewerController`](crate::app::controller::ViewerController).

use std::sync::Arc;

use crate::app::services::unit_registry::UnitRegistry;

/// Callbacks from the refresh loop into the display surface
pub trait PresentationSink: Send + Sync {
    /// A new registry was installed; re-render unit fills and recompute the
    /// active selection
    fn registry_applied(&self, registry: &Arc<UnitRegistry>);

    /// No snapshot has ever been accepted and the latest cycle failed; show
    /// the "data unavailable" state
    fn data_unavailable(&self);
}
