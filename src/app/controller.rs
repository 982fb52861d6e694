//! Viewer controller: selection state and detail-panel contents
//!
//! Owns the interaction state the display surface used to keep in ad-hoc
//! globals: the selected unit and the "data unavailable" presentation. The
//! UI calls [`select`](ViewerController::select), [`hover`](ViewerController::hover)
//! and [`hover_end`](ViewerController::hover_end) and renders whatever panel
//! comes back; it never reaches into the registry directly.

use std::sync::{Arc, RwLock};

use crate::app::services::refresh_engine::RefreshEngine;
use crate::app::services::unit_registry::UnitDetails;

/// Contents of the detail panel after an interaction
#[derive(Debug, Clone)]
pub enum DetailsPanel {
    /// No snapshot has ever been accepted and the latest cycle failed
    Unavailable,

    /// Nothing selected; prompt the visitor to pick a unit on the plan
    Prompt,

    /// The unit exists on the plan but has no feed record
    NoData { id: String },

    /// Full details for a unit and its relation closure
    Details(UnitDetails),
}

impl DetailsPanel {
    /// Plain-text rendering in the language of the display surface
    pub fn message(&self) -> String {
        match self {
            Self::Unavailable => "Не удалось загрузить данные из таблицы.".to_string(),
            Self::Prompt => "Выберите место на карте.".to_string(),
            Self::NoData { .. } => "Нет данных по месту.".to_string(),
            Self::Details(details) => {
                let mut lines = vec![
                    format!("Место: {}", details.id),
                    format!("Площадь: {} м²", details.area_display),
                    format!("Цена: {} ₽", details.price_display),
                    format!("Статус: {}", details.status_label),
                ];
                if details.related.len() > 1 {
                    lines.push(format!("Связанные: {}", details.related.join(", ")));
                }
                lines.join("\n")
            }
        }
    }
}

/// Controller owning the current selection against the live registry
pub struct ViewerController {
    engine: Arc<RefreshEngine>,
    selected: RwLock<Option<String>>,
}

impl ViewerController {
    /// Create a controller over a running (or about-to-run) engine
    pub fn new(engine: Arc<RefreshEngine>) -> Self {
        Self {
            engine,
            selected: RwLock::new(None),
        }
    }

    /// Select a unit and return its panel. The selection sticks until the
    /// next select call, so hover excursions can restore it.
    pub fn select(&self, id: &str) -> DetailsPanel {
        *self.selected.write().expect("selection lock poisoned") = Some(id.to_string());
        self.panel_for(id)
    }

    /// Show a unit's panel without disturbing the selection
    pub fn hover(&self, id: &str) -> DetailsPanel {
        self.panel_for(id)
    }

    /// Hover ended; fall back to the selected unit's panel
    pub fn hover_end(&self) -> DetailsPanel {
        self.selected_panel()
    }

    /// Panel for the current selection state, used after every registry swap
    pub fn selected_panel(&self) -> DetailsPanel {
        if self.engine.load_error() {
            return DetailsPanel::Unavailable;
        }

        let selected = self
            .selected
            .read()
            .expect("selection lock poisoned")
            .clone();
        match selected {
            Some(id) => self.panel_for(&id),
            None => DetailsPanel::Prompt,
        }
    }

    /// Currently selected identifier, if any
    pub fn selected_id(&self) -> Option<String> {
        self.selected
            .read()
            .expect("selection lock poisoned")
            .clone()
    }

    fn panel_for(&self, id: &str) -> DetailsPanel {
        let registry = self.engine.registry();
        match registry.details(id) {
            Some(details) => DetailsPanel::Details(details),
            None => DetailsPanel::NoData { id: id.to_string() },
        }
    }
}
