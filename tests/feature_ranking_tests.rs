use forecast_board::model::feature::FeatureImportanceMap;
use forecast_board::view_model::features::{
    explain_feature, rank_features, truncate_name, FEATURE_DISPLAY_LIMIT,
};

fn many_features(n: usize) -> FeatureImportanceMap {
    (0..n)
        .map(|i| (format!("feature_{:02}", i), (i as f64 + 1.0) / 100.0))
        .collect()
}

#[test]
/// Verifies ranking bound and order:
/// any input size yields at most ten entries in descending score order.
fn ranking_truncates_to_display_limit_in_descending_order() {
    for n in [0usize, 1, 9, 10, 11, 25] {
        let ranked = rank_features(&many_features(n));
        assert_eq!(ranked.len(), n.min(FEATURE_DISPLAY_LIMIT));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        for (i, f) in ranked.iter().enumerate() {
            assert_eq!(f.rank, i + 1);
        }
    }
    let ranked = rank_features(&many_features(25));
    assert_eq!(ranked[0].full_name, "feature_24");
    assert_eq!(ranked[9].full_name, "feature_15");
}

#[test]
/// Verifies idempotence:
/// re-ranking the ranked output reproduces the same list.
fn ranking_is_idempotent() {
    let first = rank_features(&many_features(14));
    let again: FeatureImportanceMap = first
        .iter()
        .map(|f| (f.full_name.clone(), f.score))
        .collect();
    let second = rank_features(&again);
    assert_eq!(first, second);
}

#[test]
fn ties_break_on_name() {
    let features: FeatureImportanceMap =
        [("vix_close", 0.2), ("atr_14", 0.2), ("rsi_14", 0.5)].into_iter().collect();
    let names: Vec<String> = rank_features(&features)
        .into_iter()
        .map(|f| f.full_name)
        .collect();
    assert_eq!(names, vec!["rsi_14", "atr_14", "vix_close"]);
}

#[test]
fn long_names_are_truncated_but_full_name_is_kept() {
    let features: FeatureImportanceMap = [("treasury_10y_close", 0.4), ("rsi_14", 0.1)]
        .into_iter()
        .collect();
    let ranked = rank_features(&features);
    assert_eq!(ranked[0].display_name, "treasury_10y...");
    assert_eq!(ranked[0].full_name, "treasury_10y_close");
    assert_eq!(ranked[1].display_name, "rsi_14");

    assert_eq!(truncate_name("exactly_12ch"), "exactly_12ch");
    assert_eq!(truncate_name("thirteen_char"), "thirteen_cha...");
}

#[test]
/// Verifies glossary fallback:
/// known names get an explanation, unknown names explain themselves.
fn explanations_fall_back_to_raw_name() {
    assert_eq!(
        explain_feature("rsi_14"),
        "14-day relative strength index (overbought/oversold)"
    );
    assert_eq!(explain_feature("mystery_signal"), "mystery_signal");

    let features: FeatureImportanceMap = [("mystery_signal", 0.3)].into_iter().collect();
    let ranked = rank_features(&features);
    assert_eq!(ranked[0].explanation, "mystery_signal");
}

#[test]
fn scores_format_with_four_decimals_and_relative_width() {
    let features: FeatureImportanceMap =
        [("macd", 0.25), ("macd_diff", 0.125)].into_iter().collect();
    let ranked = rank_features(&features);
    assert_eq!(ranked[0].score_text, "0.2500");
    assert!((ranked[0].relative - 1.0).abs() < f64::EPSILON);
    assert!((ranked[1].relative - 0.5).abs() < f64::EPSILON);
}

#[test]
fn empty_map_ranks_to_empty_list() {
    assert!(rank_features(&FeatureImportanceMap::EMPTY).is_empty());
}
