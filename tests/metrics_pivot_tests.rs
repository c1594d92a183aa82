use forecast_board::model::horizon::{Horizon, ModelKind};
use forecast_board::model::metrics::{HorizonMetrics, MetricsByHorizon, ModelMetrics};
use forecast_board::view_model::format::PLACEHOLDER;
use forecast_board::view_model::pivot::MetricsPivot;

fn model(mae: f64, directional_accuracy: f64) -> Option<ModelMetrics> {
    Some(ModelMetrics {
        mae,
        directional_accuracy,
    })
}

#[test]
/// Verifies fixed table shape:
/// an empty metrics map still yields 4 x 3 cells, all placeholders.
fn empty_metrics_pivot_is_all_placeholders() {
    let pivot = MetricsPivot::build(&MetricsByHorizon::EMPTY);
    assert_eq!(pivot.rows.len(), ModelKind::ALL.len());
    assert_eq!(pivot.horizons, Horizon::ALL.to_vec());
    assert_eq!(pivot.cell_count(), ModelKind::ALL.len() * Horizon::ALL.len());
    for row in &pivot.rows {
        assert_eq!(row.cells.len(), Horizon::ALL.len());
        for cell in &row.cells {
            assert!(cell.is_placeholder());
            assert_eq!(cell.mae, PLACEHOLDER);
        }
    }
}

#[test]
/// Verifies partial data:
/// present model/horizon pairs are formatted, absent ones render "-".
fn partial_metrics_fill_only_present_cells() {
    let mut metrics = MetricsByHorizon::default();
    metrics.insert(
        Horizon::D1,
        HorizonMetrics {
            xgboost: model(0.00812345, 0.5234),
            ensemble: model(0.0079, 0.541),
            ..HorizonMetrics::default()
        },
    );
    metrics.insert(
        Horizon::D20,
        HorizonMetrics {
            ridge: model(0.03, 0.6),
            ..HorizonMetrics::default()
        },
    );

    let pivot = MetricsPivot::build(&metrics);
    assert_eq!(pivot.cell_count(), 12);

    let xgb_1d = pivot.cell(ModelKind::Xgboost, Horizon::D1).unwrap();
    assert_eq!(xgb_1d.mae, "0.0081");
    assert_eq!(xgb_1d.directional_accuracy, "52.3%");

    let ens_1d = pivot.cell(ModelKind::Ensemble, Horizon::D1).unwrap();
    assert_eq!(ens_1d.directional_accuracy, "54.1%");

    let ridge_20d = pivot.cell(ModelKind::Ridge, Horizon::D20).unwrap();
    assert_eq!(ridge_20d.mae, "0.0300");

    assert!(pivot.cell(ModelKind::Rf, Horizon::D1).unwrap().is_placeholder());
    assert!(pivot.cell(ModelKind::Xgboost, Horizon::D5).unwrap().is_placeholder());
    assert!(pivot.cell(ModelKind::Xgboost, Horizon::D20).unwrap().is_placeholder());
}

#[test]
fn rows_follow_fixed_model_order() {
    let pivot = MetricsPivot::build(&MetricsByHorizon::EMPTY);
    let order: Vec<ModelKind> = pivot.rows.iter().map(|r| r.model).collect();
    assert_eq!(order, ModelKind::ALL.to_vec());
    let horizons: Vec<Horizon> = pivot.rows[0].cells.iter().map(|c| c.horizon).collect();
    assert_eq!(horizons, vec![Horizon::D1, Horizon::D5, Horizon::D20]);
}
