use std::collections::BTreeMap;

use serde_json::Value;

use crate::source::types::value_to_f64;

/// Feature name to model-assigned importance. Storage order carries no
/// meaning; consumers rank before display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureImportanceMap(pub BTreeMap<String, f64>);

impl FeatureImportanceMap {
    pub const EMPTY: FeatureImportanceMap = FeatureImportanceMap(BTreeMap::new());

    pub fn from_raw(raw: BTreeMap<String, Value>) -> Self {
        Self(
            raw.into_iter()
                .filter(|(name, _)| !name.trim().is_empty())
                .map(|(name, v)| {
                    let score = value_to_f64(&v).unwrap_or(0.0).max(0.0);
                    (name, score)
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FeatureImportanceMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
