//! CLI library components for the record import pipeline.

pub mod logging;
