//! Core module - the pure pipeline stages and their reference data

pub mod config;
pub mod consolidator;
pub mod costing;
pub mod dataset;
pub mod matcher;
pub mod pipeline;
pub mod selector;

pub use config::{ConfigError, PricingConfig};
pub use dataset::{Dataset, DatasetError};
pub use pipeline::PipelineError;
