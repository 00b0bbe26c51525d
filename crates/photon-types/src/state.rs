// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One acquired image.
/// Data layout is `[height, width]` (row-major), matching the NumPy
/// arrays returned by `GetNDArray()` in the PySpin monitor.
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: Array2<u16>,
    pub frame_id: u64,
    pub exposure_us: f64,
}

impl Frame {
    /// Zero-filled frame of the given geometry.
    pub fn new(height: usize, width: usize, frame_id: u64, exposure_us: f64) -> Self {
        Frame {
            data: Array2::zeros((height, width)),
            frame_id,
            exposure_us,
        }
    }

    pub fn from_array(data: Array2<u16>, frame_id: u64, exposure_us: f64) -> Self {
        Frame {
            data,
            frame_id,
            exposure_us,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Mean pixel level over the full frame [ADU].
    pub fn mean_adu(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|&v| f64::from(v)).sum();
        sum / self.data.len() as f64
    }
}

/// One converted measurement after baseline calibration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhotonSample {
    pub frame_idx: u64,
    /// Mean ROI level [ADU].
    pub mean_adu: f64,
    /// Baseline-subtracted level, clamped at 0 [ADU].
    pub delta_adu: f64,
    /// Photoelectrons per pixel.
    pub electrons: f64,
    /// Incident photons per pixel per exposure.
    pub photons: f64,
}

/// Dark baseline statistics after the calibration phase.
/// Python: complete_calibration() prints; here the numbers are data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BaselineStats {
    /// Number of frames averaged.
    pub frames: usize,
    /// Mean dark level [ADU].
    pub mean_adu: f64,
    /// Dark noise, population std [ADU].
    pub std_adu: f64,
    /// Dark noise in electrons (std × system gain).
    pub noise_electrons: f64,
}

/// End-of-run aggregate produced by the acquisition driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorReport {
    pub frames_requested: usize,
    pub frames_processed: usize,
    pub frames_dropped: usize,
    pub baseline: Option<BaselineStats>,
    /// Mean photons/pixel over post-calibration samples.
    pub mean_photons: f64,
    /// Peak photons/pixel over post-calibration samples.
    pub max_photons: f64,
    pub duration_s: f64,
    pub wall_time_ms: f64,
    pub max_step_time_us: f64,
    pub mean_jitter_us: f64,
    pub max_jitter_us: f64,
}
