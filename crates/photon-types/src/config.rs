// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, MonitorResult};

/// Top-level monitor configuration.
/// Maps 1:1 to the monitor_config.json schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub monitor_name: String,
    pub sensor: SensorConfig,
    pub calibration: CalibrationParams,
    pub acquisition: AcquisitionParams,
    #[serde(default)]
    pub telemetry: TelemetryParams,
}

/// Sensor geometry and pixel format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub model: String,
    pub width: usize,
    pub height: usize,
    pub bit_depth: u32,
}

impl SensorConfig {
    /// Largest representable ADU value for the configured pixel format.
    pub fn adu_max(&self) -> u16 {
        ((1u32 << self.bit_depth) - 1) as u16
    }
}

/// EMVA 1288 calibration parameters applied during conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationParams {
    /// System gain K [e⁻/ADU].
    pub system_gain: f64,
    /// Quantum efficiency at `wavelength_nm`, 0..=1.
    pub quantum_efficiency: f64,
    /// Wavelength of the QE measurement [nm].
    pub wavelength_nm: f64,
    /// Temporal dark noise [e⁻].
    pub read_noise_electrons: f64,
    /// Full well capacity [e⁻].
    pub saturation_electrons: f64,
}

/// Acquisition loop parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionParams {
    /// Exposure time [µs].
    pub exposure_us: f64,
    /// Centered ROI dimensions [width, height].
    pub roi: [usize; 2],
    /// Number of frames averaged for the dark baseline.
    pub baseline_frames: usize,
    /// Per-frame grab timeout [ms].
    pub timeout_ms: u64,
    /// Target loop frequency [Hz].
    pub target_hz: f64,
    /// Jitter budget [µs]; 0 disables the check.
    #[serde(default)]
    pub max_jitter_us: f64,
}

/// Telemetry history parameters (optional in JSON config).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryParams {
    /// Ring buffer capacity per channel (default: 500).
    #[serde(default = "default_history")]
    pub history: usize,
}

fn default_history() -> usize {
    500
}

impl Default for TelemetryParams {
    fn default() -> Self {
        TelemetryParams {
            history: default_history(),
        }
    }
}

impl MonitorConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> MonitorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Check every numeric bound the pipeline relies on.
    pub fn validate(&self) -> MonitorResult<()> {
        let cal = &self.calibration;
        if !cal.system_gain.is_finite() || cal.system_gain <= 0.0 {
            return Err(MonitorError::ConfigError(
                "system_gain must be finite and > 0".to_string(),
            ));
        }
        if !cal.quantum_efficiency.is_finite()
            || cal.quantum_efficiency <= 0.0
            || cal.quantum_efficiency > 1.0
        {
            return Err(MonitorError::ConfigError(
                "quantum_efficiency must be in (0, 1]".to_string(),
            ));
        }
        if cal.read_noise_electrons < 0.0 {
            return Err(MonitorError::ConfigError(
                "read_noise_electrons must be >= 0".to_string(),
            ));
        }
        if cal.saturation_electrons <= 0.0 {
            return Err(MonitorError::ConfigError(
                "saturation_electrons must be > 0".to_string(),
            ));
        }

        let acq = &self.acquisition;
        if !acq.exposure_us.is_finite() || acq.exposure_us <= 0.0 {
            return Err(MonitorError::ConfigError(
                "exposure_us must be finite and > 0".to_string(),
            ));
        }
        if acq.roi[0] == 0 || acq.roi[1] == 0 {
            return Err(MonitorError::ConfigError(
                "roi dimensions must be >= 1".to_string(),
            ));
        }
        if acq.baseline_frames == 0 {
            return Err(MonitorError::ConfigError(
                "baseline_frames must be >= 1".to_string(),
            ));
        }
        if !acq.target_hz.is_finite() || acq.target_hz <= 0.0 {
            return Err(MonitorError::ConfigError(
                "target_hz must be finite and > 0".to_string(),
            ));
        }
        if !acq.max_jitter_us.is_finite() || acq.max_jitter_us < 0.0 {
            return Err(MonitorError::ConfigError(
                "max_jitter_us must be finite and >= 0".to_string(),
            ));
        }

        let sensor = &self.sensor;
        if sensor.width == 0 || sensor.height == 0 {
            return Err(MonitorError::ConfigError(
                "sensor dimensions must be >= 1".to_string(),
            ));
        }
        if !(8..=16).contains(&sensor.bit_depth) {
            return Err(MonitorError::ConfigError(
                "bit_depth must be in 8..=16".to_string(),
            ));
        }

        if self.telemetry.history == 0 {
            return Err(MonitorError::ConfigError(
                "telemetry history must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Build path relative to the workspace root.
    /// CARGO_MANIFEST_DIR points to crates/photon-types/ at compile time,
    /// so we go up 2 levels.
    fn workspace_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
    }

    fn config_path(relative: &str) -> String {
        workspace_root().join(relative).to_string_lossy().to_string()
    }

    fn shipped_config() -> MonitorConfig {
        MonitorConfig::from_file(&config_path("monitor_config.json")).unwrap()
    }

    #[test]
    fn test_load_shipped_config() {
        let cfg = shipped_config();
        assert_eq!(cfg.monitor_name, "BFS-U3-04S2M-C Photon Monitor");
        assert_eq!(cfg.sensor.model, "BFS-U3-04S2M-C");
        assert_eq!(cfg.sensor.width, 720);
        assert_eq!(cfg.sensor.height, 540);
        assert!((cfg.calibration.system_gain - 0.35).abs() < 1e-12);
        assert!((cfg.calibration.quantum_efficiency - 0.6182).abs() < 1e-12);
        assert_eq!(cfg.acquisition.roi, [200, 200]);
        assert_eq!(cfg.acquisition.baseline_frames, 50);
        assert_eq!(cfg.telemetry.history, 500);
    }

    #[test]
    fn test_shipped_config_validates() {
        shipped_config().validate().unwrap();
    }

    #[test]
    fn test_adu_max_mono10() {
        let cfg = shipped_config();
        assert_eq!(cfg.sensor.adu_max(), 1023);
    }

    #[test]
    fn test_telemetry_section_optional() {
        let json = r#"{
            "monitor_name": "minimal",
            "sensor": {"model": "BFS-U3-04S2M-C", "width": 720, "height": 540, "bit_depth": 10},
            "calibration": {"system_gain": 0.35, "quantum_efficiency": 0.6182,
                            "wavelength_nm": 525.0, "read_noise_electrons": 3.71,
                            "saturation_electrons": 22187.0},
            "acquisition": {"exposure_us": 5000.0, "roi": [200, 200],
                            "baseline_frames": 50, "timeout_ms": 1000, "target_hz": 200.0}
        }"#;
        let cfg: MonitorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.telemetry.history, 500);
        assert!((cfg.acquisition.max_jitter_us).abs() < 1e-12);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_zero_gain() {
        let mut cfg = shipped_config();
        cfg.calibration.system_gain = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_qe_above_one() {
        let mut cfg = shipped_config();
        cfg.calibration.quantum_efficiency = 1.2;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_baseline() {
        let mut cfg = shipped_config();
        cfg.acquisition.baseline_frames = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = shipped_config();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.monitor_name, cfg2.monitor_name);
        assert_eq!(cfg.acquisition.roi, cfg2.acquisition.roi);
        assert_eq!(cfg.telemetry.history, cfg2.telemetry.history);
    }
}
