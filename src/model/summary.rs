use std::collections::BTreeMap;

use serde_json::Value;

/// Backtest summary passed through to the presentation layer untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryBlob(pub BTreeMap<String, Value>);

impl SummaryBlob {
    pub const EMPTY: SummaryBlob = SummaryBlob(BTreeMap::new());

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
