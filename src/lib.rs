//! sentiprobe - sentiment analysis against hosted inference models
//!
//! Sends text to an ordered list of remote sentiment models, falling back to
//! the next model on failure (with one delayed retry for models that are
//! still loading), and renders whatever classification comes back.

pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod preflight;
pub mod prober;
pub mod repl;
pub mod telemetry;
