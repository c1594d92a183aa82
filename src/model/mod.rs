pub mod equity;
pub mod feature;
pub mod horizon;
pub mod metrics;
pub mod prediction;
pub mod summary;
