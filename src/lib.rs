pub mod classifier;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod ml;
pub mod pipeline;
pub mod training;
pub mod types;

pub use error::{Result, SignalError};
