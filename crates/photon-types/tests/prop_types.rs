// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Property-Based Tests (proptest) for photon-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for photon-types using proptest.
//!
//! Covers: Frame construction invariants, sensor ADU range,
//! configuration validation bounds.

use ndarray::Array2;
use photon_types::config::{
    AcquisitionParams, CalibrationParams, MonitorConfig, SensorConfig, TelemetryParams,
};
use photon_types::state::Frame;
use proptest::prelude::*;

fn base_config() -> MonitorConfig {
    MonitorConfig {
        monitor_name: "prop".to_string(),
        sensor: SensorConfig {
            model: "BFS-U3-04S2M-C".to_string(),
            width: 720,
            height: 540,
            bit_depth: 10,
        },
        calibration: CalibrationParams {
            system_gain: 0.35,
            quantum_efficiency: 0.6182,
            wavelength_nm: 525.0,
            read_noise_electrons: 3.71,
            saturation_electrons: 22_187.0,
        },
        acquisition: AcquisitionParams {
            exposure_us: 5000.0,
            roi: [200, 200],
            baseline_frames: 50,
            timeout_ms: 1000,
            target_hz: 200.0,
            max_jitter_us: 0.0,
        },
        telemetry: TelemetryParams { history: 500 },
    }
}

// ── Frame Construction Invariants ────────────────────────────────────

proptest! {
    /// Frame dimensions match constructor arguments.
    #[test]
    fn frame_dimensions_match(
        height in 1usize..256,
        width in 1usize..256,
    ) {
        let frame = Frame::new(height, width, 0, 5000.0);

        prop_assert_eq!(frame.height(), height);
        prop_assert_eq!(frame.width(), width);
        prop_assert_eq!(frame.data.shape(), &[height, width]);
    }

    /// A constant-valued frame has that constant as its mean.
    #[test]
    fn frame_constant_mean(
        height in 1usize..64,
        width in 1usize..64,
        level in 0u16..1024,
    ) {
        let data = Array2::from_elem((height, width), level);
        let frame = Frame::from_array(data, 0, 5000.0);

        prop_assert!((frame.mean_adu() - f64::from(level)).abs() < 1e-9,
            "mean {} != level {}", frame.mean_adu(), level);
    }

    /// Frame mean is bounded by the min and max pixel values.
    #[test]
    fn frame_mean_bounded(
        height in 1usize..32,
        width in 1usize..32,
        seed in 0u16..512,
    ) {
        let data = Array2::from_shape_fn((height, width), |(r, c)| {
            seed.wrapping_add((r * 31 + c * 7) as u16) % 1024
        });
        let lo = f64::from(*data.iter().min().unwrap());
        let hi = f64::from(*data.iter().max().unwrap());
        let frame = Frame::from_array(data, 0, 5000.0);

        prop_assert!(frame.mean_adu() >= lo - 1e-9);
        prop_assert!(frame.mean_adu() <= hi + 1e-9);
    }
}

// ── Sensor ADU Range ─────────────────────────────────────────────────

proptest! {
    /// adu_max covers the full configured bit depth.
    #[test]
    fn sensor_adu_max(bit_depth in 8u32..=16) {
        let sensor = SensorConfig {
            model: "BFS-U3-04S2M-C".to_string(),
            width: 720,
            height: 540,
            bit_depth,
        };
        prop_assert_eq!(u32::from(sensor.adu_max()), (1u32 << bit_depth) - 1);
    }
}

// ── Configuration Validation Bounds ──────────────────────────────────

proptest! {
    /// Any positive gain and QE in (0, 1] validates.
    #[test]
    fn config_accepts_valid_calibration(
        gain in 0.01f64..10.0,
        qe in 0.01f64..=1.0,
    ) {
        let mut cfg = base_config();
        cfg.calibration.system_gain = gain;
        cfg.calibration.quantum_efficiency = qe;
        prop_assert!(cfg.validate().is_ok());
    }

    /// Non-positive target frequencies are rejected.
    #[test]
    fn config_rejects_bad_target_hz(hz in -1000.0f64..=0.0) {
        let mut cfg = base_config();
        cfg.acquisition.target_hz = hz;
        prop_assert!(cfg.validate().is_err());
    }

    /// QE above 1 is rejected.
    #[test]
    fn config_rejects_qe_above_one(qe in 1.0001f64..10.0) {
        let mut cfg = base_config();
        cfg.calibration.quantum_efficiency = qe;
        prop_assert!(cfg.validate().is_err());
    }

    /// Zero-sized ROI is rejected in either dimension.
    #[test]
    fn config_rejects_zero_roi(w in 0usize..2, h in 0usize..2) {
        prop_assume!(w == 0 || h == 0);
        let mut cfg = base_config();
        cfg.acquisition.roi = [w, h];
        prop_assert!(cfg.validate().is_err());
    }
}
