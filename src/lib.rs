pub mod aggregator;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod model;
pub mod source;
pub mod ui;
pub mod view_model;
