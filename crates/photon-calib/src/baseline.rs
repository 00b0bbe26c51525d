// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Dark Baseline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Dark baseline accumulator.
//!
//! Port of the calibration phase in `acquisition.py`
//! (`create_acquisition_state` / `complete_calibration` /
//! `reset_calibration`). The first N frame means are averaged with the
//! signal assumed absent; the mean becomes the dark level subtracted
//! from every subsequent measurement.

use photon_types::error::{MonitorError, MonitorResult};
use photon_types::state::BaselineStats;

/// Accumulates ROI means over the calibration phase.
#[derive(Debug, Clone)]
pub struct DarkBaseline {
    target_frames: usize,
    samples: Vec<f64>,
}

impl DarkBaseline {
    pub fn new(target_frames: usize) -> MonitorResult<Self> {
        if target_frames == 0 {
            return Err(MonitorError::Calibration(
                "baseline needs at least one frame".to_string(),
            ));
        }
        Ok(DarkBaseline {
            target_frames,
            samples: Vec::with_capacity(target_frames),
        })
    }

    /// Record one dark-phase ROI mean. Pushing past the target count is
    /// a misuse of the accumulator and is surfaced as an error.
    pub fn push(&mut self, mean_adu: f64) -> MonitorResult<()> {
        if self.is_complete() {
            return Err(MonitorError::Calibration(format!(
                "baseline already complete at {} frames",
                self.target_frames
            )));
        }
        self.samples.push(mean_adu);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.samples.len() >= self.target_frames
    }

    /// Calibration progress as a fraction in 0..=1.
    pub fn progress(&self) -> f64 {
        if self.is_complete() {
            return 1.0;
        }
        self.samples.len() as f64 / self.target_frames as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Finalize into baseline statistics. Population std, matching
    /// `np.std` defaults.
    pub fn finish(&self, system_gain: f64) -> MonitorResult<BaselineStats> {
        if !self.is_complete() {
            return Err(MonitorError::Calibration(format!(
                "baseline incomplete: {}/{} frames",
                self.samples.len(),
                self.target_frames
            )));
        }
        let n = self.samples.len() as f64;
        let mean = self.samples.iter().sum::<f64>() / n;
        let var = self.samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = var.sqrt();
        Ok(BaselineStats {
            frames: self.samples.len(),
            mean_adu: mean,
            std_adu: std,
            noise_electrons: std * system_gain,
        })
    }

    /// Discard all accumulated samples and start over.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
