//! Ball-tracking VAR system.
//!
//! Classifies the position of a tracked ball within a live video stream into
//! semantic zones (goal area, handball area, neutral) and drives a small
//! event/state machine: a persistent scoreboard, a timed freeze-frame replay
//! overlay, and per-frame overlay annotations.
//!
//! The library is pure Rust and operates on [`image::RgbaImage`] buffers; the
//! `camera` feature adds the OpenCV-backed capture/display front-end used by
//! the `var-vision` binary.

pub mod config;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod state;
pub mod utils;
pub mod vision;

#[cfg(feature = "camera")]
pub mod capture;

pub use config::Config;
pub use detection::{FrameEvent, FrameOutput, FramePipeline, MatchState};
pub use state::{Scoreboard, Side};
