//! Core domain types and logic.

pub mod candle;
pub mod params;
pub mod indicator;
pub mod simulation;
pub mod metrics;
pub mod error;
