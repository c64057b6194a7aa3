//! avcut - audio/video cutting library
//!
//! Trims a time range out of an mp3/mp4 file by driving the `ffmpeg` and
//! `ffprobe` programs. Two front-ends share the same core: an interactive
//! terminal session (`avcut`) and a small web form (`avcut-web`).

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use app::{AppContainer, CutInteractor, SubmitInteractor};
pub use config::AppConfig;
pub use domain::errors::DomainError;
pub use domain::model::{CutJob, CutReport, MediaHandle, TimePoint, TimeRange};
