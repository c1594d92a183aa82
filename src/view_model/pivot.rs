use crate::model::horizon::{Horizon, ModelKind};
use crate::model::metrics::MetricsByHorizon;

use super::format::{format_importance, format_percent, PLACEHOLDER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotCell {
    pub horizon: Horizon,
    pub mae: String,
    pub directional_accuracy: String,
}

impl PivotCell {
    fn placeholder(horizon: Horizon) -> Self {
        Self {
            horizon,
            mae: PLACEHOLDER.to_string(),
            directional_accuracy: PLACEHOLDER.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.mae == PLACEHOLDER && self.directional_accuracy == PLACEHOLDER
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    pub model: ModelKind,
    pub cells: Vec<PivotCell>,
}

/// Model comparison table: one row per model, one cell per horizon, in fixed
/// order. Always `ModelKind::ALL.len()` x `Horizon::ALL.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsPivot {
    pub horizons: Vec<Horizon>,
    pub rows: Vec<PivotRow>,
}

impl MetricsPivot {
    pub fn build(metrics: &MetricsByHorizon) -> Self {
        let rows = ModelKind::ALL
            .into_iter()
            .map(|model| PivotRow {
                model,
                cells: Horizon::ALL
                    .into_iter()
                    .map(|horizon| {
                        metrics
                            .get(horizon)
                            .and_then(|h| h.model(model))
                            .map(|m| PivotCell {
                                horizon,
                                mae: format_importance(m.mae),
                                directional_accuracy: format_percent(m.directional_accuracy),
                            })
                            .unwrap_or_else(|| PivotCell::placeholder(horizon))
                    })
                    .collect(),
            })
            .collect();
        Self {
            horizons: Horizon::ALL.to_vec(),
            rows,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    pub fn cell(&self, model: ModelKind, horizon: Horizon) -> Option<&PivotCell> {
        self.rows
            .iter()
            .find(|r| r.model == model)
            .and_then(|r| r.cells.iter().find(|c| c.horizon == horizon))
    }
}
