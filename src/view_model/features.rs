use std::cmp::Ordering;

use crate::model::feature::FeatureImportanceMap;

use super::format::format_importance;

pub const FEATURE_DISPLAY_LIMIT: usize = 10;
pub const FEATURE_NAME_MAX_CHARS: usize = 12;
const ELLIPSIS: &str = "...";

/// Plain-language descriptions of the engineered model inputs.
static FEATURE_GLOSSARY: &[(&str, &str)] = &[
    ("return_1d", "S&P 500 return over the previous day"),
    ("return_5d", "S&P 500 return over the previous week"),
    ("return_10d", "S&P 500 return over the previous two weeks"),
    ("return_20d", "S&P 500 return over the previous month"),
    ("log_return_1d", "Log of the previous day's price ratio"),
    ("sma_10", "10-day simple moving average of the close"),
    ("sma_20", "20-day simple moving average of the close"),
    ("sma_50", "50-day simple moving average of the close"),
    ("sma_200", "200-day simple moving average of the close"),
    ("ema_10", "10-day exponential moving average of the close"),
    ("ema_20", "20-day exponential moving average of the close"),
    ("ema_50", "50-day exponential moving average of the close"),
    ("ema_200", "200-day exponential moving average of the close"),
    ("rsi_14", "14-day relative strength index (overbought/oversold)"),
    ("macd", "MACD line: 12-day EMA minus 26-day EMA"),
    ("macd_signal", "9-day EMA of the MACD line"),
    ("macd_diff", "MACD histogram: MACD minus its signal line"),
    ("bb_upper", "Upper Bollinger band (20-day, 2 std)"),
    ("bb_lower", "Lower Bollinger band (20-day, 2 std)"),
    ("bb_width", "Bollinger band width relative to the mid band"),
    ("bb_pct", "Position of the close within the Bollinger bands"),
    ("atr_14", "14-day average true range (daily range volatility)"),
    ("stoch_k", "Stochastic oscillator %K"),
    ("stoch_d", "Stochastic oscillator %D (smoothed %K)"),
    ("volatility_5", "Annualized 5-day realized volatility"),
    ("volatility_20", "Annualized 20-day realized volatility"),
    ("momentum_10", "Price change over the last 10 days"),
    ("momentum_20", "Price change over the last 20 days"),
    ("volume_sma_20", "20-day average trading volume"),
    ("volume_ratio", "Today's volume relative to its 20-day average"),
    ("vix_close", "CBOE volatility index close"),
    ("vix_change", "Daily change in the VIX"),
    ("vix_sma_10", "10-day average of the VIX"),
    ("treasury_10y_close", "10-year Treasury yield"),
    ("yield_change", "Daily change in the 10-year Treasury yield"),
    ("xlk_rel_strength", "Technology sector 5-day return minus the S&P 500's"),
    ("xlf_rel_strength", "Financials sector 5-day return minus the S&P 500's"),
    ("xle_rel_strength", "Energy sector 5-day return minus the S&P 500's"),
    ("sp500_close", "S&P 500 closing level"),
    ("sp500_high", "S&P 500 intraday high"),
    ("sp500_low", "S&P 500 intraday low"),
    ("sp500_volume", "S&P 500 traded volume"),
];

/// Explanation for `name`, or the name itself when it is not in the glossary.
pub fn explain_feature(name: &str) -> &str {
    FEATURE_GLOSSARY
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, text)| *text)
        .unwrap_or(name)
}

pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > FEATURE_NAME_MAX_CHARS {
        let head: String = name.chars().take(FEATURE_NAME_MAX_CHARS).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        name.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedFeature {
    pub rank: usize,
    pub display_name: String,
    pub full_name: String,
    pub explanation: String,
    pub score: f64,
    pub score_text: String,
    /// Score relative to the top-ranked feature, in `[0, 1]`.
    pub relative: f64,
}

/// Top features by score, descending; ties break on name.
pub fn rank_features(features: &FeatureImportanceMap) -> Vec<RankedFeature> {
    let mut entries: Vec<(&str, f64)> = features
        .iter()
        .map(|(name, score)| {
            let score = if score.is_finite() { score.max(0.0) } else { 0.0 };
            (name.as_str(), score)
        })
        .collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    entries.truncate(FEATURE_DISPLAY_LIMIT);

    let top = entries.first().map(|(_, s)| *s).unwrap_or(0.0);
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, score))| RankedFeature {
            rank: i + 1,
            display_name: truncate_name(name),
            full_name: name.to_string(),
            explanation: explain_feature(name).to_string(),
            score,
            score_text: format_importance(score),
            relative: if top > 0.0 { score / top } else { 0.0 },
        })
        .collect()
}
