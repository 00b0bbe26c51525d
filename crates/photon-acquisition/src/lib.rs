//! Acquisition pipeline modules.
//!
//! ROI extraction, per-frame photon pipeline, paced real-time driver,
//! telemetry ring buffers, NPZ history export.

pub mod pipeline;
pub mod realtime;
pub mod recorder;
pub mod roi;
pub mod telemetry;
