// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Simulated Sensor
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Simulated IMX287 frame source.
//!
//! Stands in for the hardware camera in tests and dry runs. Per pixel:
//! photoelectrons ~ Poisson(flux × exposure × QE), clamped at the full
//! well, converted to ADU through the system gain, plus the dark level
//! and Gaussian dark noise, quantized into the configured bit depth.
//! Seeded, so every run is reproducible.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};

use photon_types::config::{CalibrationParams, SensorConfig};
use photon_types::error::{MonitorError, MonitorResult};
use photon_types::state::Frame;

use crate::device::{DeviceInfo, FrameSource, GrabResult};

/// Serial reported by the simulated TL device.
const SIM_SERIAL: &str = "00000000";

/// Tunables of the synthetic scene and transfer reliability.
#[derive(Debug, Clone)]
pub struct SimulatorOptions {
    /// Dark (offset) level [ADU].
    pub dark_level_adu: f64,
    /// Gaussian dark noise sigma [ADU].
    pub dark_noise_adu: f64,
    /// Illumination: signal photons per pixel per microsecond.
    pub flux_photons_per_us: f64,
    /// Probability that a grab returns an incomplete transfer.
    pub incomplete_prob: f64,
    pub seed: u64,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        SimulatorOptions {
            dark_level_adu: 100.0,
            dark_noise_adu: 2.0,
            flux_photons_per_us: 0.0,
            incomplete_prob: 0.0,
            seed: 7,
        }
    }
}

/// Simulated BFS-U3-04S2M-C.
pub struct SimulatedSensor {
    model: String,
    width: usize,
    height: usize,
    adu_max: f64,
    gain: f64,
    quantum_efficiency: f64,
    saturation_electrons: f64,
    exposure_us: f64,
    opts: SimulatorOptions,
    dark_noise: Normal<f64>,
    rng: StdRng,
    acquiring: bool,
    next_frame_id: u64,
}

impl SimulatedSensor {
    pub fn new(
        sensor: &SensorConfig,
        calibration: &CalibrationParams,
        exposure_us: f64,
        opts: SimulatorOptions,
    ) -> MonitorResult<Self> {
        if !exposure_us.is_finite() || exposure_us <= 0.0 {
            return Err(MonitorError::ConfigError(
                "exposure_us must be finite and > 0".to_string(),
            ));
        }
        if !opts.dark_level_adu.is_finite() || opts.dark_level_adu < 0.0 {
            return Err(MonitorError::ConfigError(
                "dark_level_adu must be finite and >= 0".to_string(),
            ));
        }
        if !opts.flux_photons_per_us.is_finite() || opts.flux_photons_per_us < 0.0 {
            return Err(MonitorError::ConfigError(
                "flux_photons_per_us must be finite and >= 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&opts.incomplete_prob) {
            return Err(MonitorError::ConfigError(
                "incomplete_prob must be in 0..=1".to_string(),
            ));
        }
        let dark_noise = Normal::new(0.0, opts.dark_noise_adu)
            .map_err(|e| MonitorError::ConfigError(format!("dark_noise_adu: {e}")))?;

        Ok(SimulatedSensor {
            model: sensor.model.clone(),
            width: sensor.width,
            height: sensor.height,
            adu_max: f64::from(sensor.adu_max()),
            gain: calibration.system_gain,
            quantum_efficiency: calibration.quantum_efficiency,
            saturation_electrons: calibration.saturation_electrons,
            exposure_us,
            rng: StdRng::seed_from_u64(opts.seed),
            opts,
            dark_noise,
            acquiring: false,
            next_frame_id: 0,
        })
    }

    /// Expected photoelectrons per pixel at the current exposure.
    fn lambda_electrons(&self) -> f64 {
        self.opts.flux_photons_per_us * self.exposure_us * self.quantum_efficiency
    }

    fn synthesize(&mut self) -> Frame {
        let lambda = self.lambda_electrons();
        let shot = if lambda > 0.0 {
            Some(Poisson::new(lambda).expect("lambda > 0"))
        } else {
            None
        };

        let mut data = Array2::zeros((self.height, self.width));
        for v in data.iter_mut() {
            let electrons = match &shot {
                Some(dist) => dist.sample(&mut self.rng).min(self.saturation_electrons),
                None => 0.0,
            };
            let adu = self.opts.dark_level_adu
                + self.dark_noise.sample(&mut self.rng)
                + electrons / self.gain;
            *v = adu.round().clamp(0.0, self.adu_max) as u16;
        }

        let frame = Frame::from_array(data, self.next_frame_id, self.exposure_us);
        self.next_frame_id += 1;
        frame
    }
}

impl FrameSource for SimulatedSensor {
    fn info(&self) -> DeviceInfo {
        DeviceInfo {
            model: self.model.clone(),
            serial: SIM_SERIAL.to_string(),
            vendor: "FLIR".to_string(),
        }
    }

    fn configure_exposure(&mut self, exposure_us: f64) -> MonitorResult<()> {
        if !exposure_us.is_finite() || exposure_us <= 0.0 {
            return Err(MonitorError::ConfigError(
                "exposure_us must be finite and > 0".to_string(),
            ));
        }
        self.exposure_us = exposure_us;
        Ok(())
    }

    fn begin_acquisition(&mut self) -> MonitorResult<()> {
        if self.acquiring {
            return Err(MonitorError::CameraUnavailable(
                "acquisition already running".to_string(),
            ));
        }
        self.acquiring = true;
        Ok(())
    }

    fn grab(&mut self, _timeout_ms: u64) -> MonitorResult<GrabResult> {
        if !self.acquiring {
            return Err(MonitorError::CameraUnavailable(
                "acquisition not started".to_string(),
            ));
        }
        if self.opts.incomplete_prob > 0.0 && self.rng.gen::<f64>() < self.opts.incomplete_prob {
            self.next_frame_id += 1;
            return Ok(GrabResult::Incomplete);
        }
        Ok(GrabResult::Frame(self.synthesize()))
    }

    fn end_acquisition(&mut self) -> MonitorResult<()> {
        self.acquiring = false;
        Ok(())
    }
}
