// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Photon Pipeline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Per-frame photon counting pipeline.
//!
//! Port of `process_frame()` in `acquisition.py`. The first
//! `baseline_frames` successful grabs feed the dark baseline; every
//! later frame is baseline-subtracted and converted to photons. A
//! dropped (incomplete or timed-out) frame still advances the frame
//! index, as in the Python loop.

use photon_calib::baseline::DarkBaseline;
use photon_calib::conversion::{adu_to_electrons, electrons_to_photons};
use photon_camera::device::{FrameSource, GrabResult};
use photon_types::config::CalibrationParams;
use photon_types::error::MonitorResult;
use photon_types::state::{BaselineStats, PhotonSample};

use crate::roi::{extract_roi, roi_mean};

/// What one frame contributed to the run.
///
/// A `Sample` with zero photons is valid data (signal darker than the
/// baseline), distinct from `Dropped`.
#[derive(Debug, Clone)]
pub enum FrameOutcome {
    /// Frame incomplete or timed out; nothing measured.
    Dropped,
    /// Frame consumed by the dark-baseline calibration phase.
    Calibrating { progress: f64 },
    /// The frame that completed the dark baseline.
    BaselineComplete(BaselineStats),
    /// Calibrated measurement.
    Sample(PhotonSample),
}

/// Baseline phase plus conversion state.
#[derive(Debug, Clone)]
pub struct PhotonPipeline {
    calibration: CalibrationParams,
    baseline: DarkBaseline,
    baseline_stats: Option<BaselineStats>,
    frame_idx: u64,
}

impl PhotonPipeline {
    pub fn new(calibration: CalibrationParams, baseline_frames: usize) -> MonitorResult<Self> {
        Ok(PhotonPipeline {
            baseline: DarkBaseline::new(baseline_frames)?,
            calibration,
            baseline_stats: None,
            frame_idx: 0,
        })
    }

    pub fn calibration(&self) -> &CalibrationParams {
        &self.calibration
    }

    pub fn is_calibrated(&self) -> bool {
        self.baseline_stats.is_some()
    }

    pub fn baseline_stats(&self) -> Option<&BaselineStats> {
        self.baseline_stats.as_ref()
    }

    /// Frames seen so far, dropped ones included.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    /// Account for a frame that produced no data.
    pub fn mark_dropped(&mut self) -> FrameOutcome {
        self.frame_idx += 1;
        FrameOutcome::Dropped
    }

    /// Feed one ROI mean through the baseline/conversion state machine.
    pub fn push_mean(&mut self, mean_adu: f64) -> MonitorResult<FrameOutcome> {
        self.frame_idx += 1;

        if !self.is_calibrated() {
            self.baseline.push(mean_adu)?;
            if self.baseline.is_complete() {
                let stats = self.baseline.finish(self.calibration.system_gain)?;
                self.baseline_stats = Some(stats);
                return Ok(FrameOutcome::BaselineComplete(stats));
            }
            return Ok(FrameOutcome::Calibrating {
                progress: self.baseline.progress(),
            });
        }

        let dark = self
            .baseline_stats
            .as_ref()
            .map(|s| s.mean_adu)
            .unwrap_or_default();
        let delta_adu = (mean_adu - dark).max(0.0);
        let electrons = adu_to_electrons(mean_adu, dark, self.calibration.system_gain);
        let photons = electrons_to_photons(electrons, self.calibration.quantum_efficiency);

        Ok(FrameOutcome::Sample(PhotonSample {
            frame_idx: self.frame_idx - 1,
            mean_adu,
            delta_adu,
            electrons,
            photons,
        }))
    }

    /// Restart the dark calibration phase. Python: `reset_calibration()`.
    pub fn reset_baseline(&mut self) {
        self.baseline.reset();
        self.baseline_stats = None;
        self.frame_idx = 0;
    }

    /// Calibration progress as a fraction in 0..=1.
    pub fn calibration_progress(&self) -> f64 {
        if self.is_calibrated() {
            return 1.0;
        }
        self.baseline.progress()
    }
}

/// Grab one frame and feed it through the pipeline.
pub fn process_frame<S: FrameSource + ?Sized>(
    source: &mut S,
    pipeline: &mut PhotonPipeline,
    roi: [usize; 2],
    timeout_ms: u64,
) -> MonitorResult<FrameOutcome> {
    match source.grab(timeout_ms)? {
        GrabResult::Frame(frame) => {
            let view = extract_roi(&frame, roi[0], roi[1])?;
            let mean = roi_mean(&view);
            pipeline.push_mean(mean)
        }
        GrabResult::Incomplete | GrabResult::Timeout => Ok(pipeline.mark_dropped()),
    }
}
