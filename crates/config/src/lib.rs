//! Configuration for the corvus predictor services.

mod config;

pub use config::{CONFIG, Config, get_data_path};
