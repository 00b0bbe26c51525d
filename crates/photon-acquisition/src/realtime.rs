// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Real-Time Acquisition Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Paced acquisition loop.
//!
//! The Python monitor drove acquisition from a Qt timer with
//! `interval_ms=0` and took whatever cadence the GUI thread allowed.
//! Here the loop is paced deterministically: fixed target frequency,
//! per-tick jitter measurement against the ideal tick instant, and an
//! optional jitter budget that aborts the run when violated.

use std::thread;
use std::time::{Duration, Instant};

use photon_calib::snr::photon_snr;
use photon_camera::device::FrameSource;
use photon_types::config::MonitorConfig;
use photon_types::error::{MonitorError, MonitorResult};
use photon_types::state::MonitorReport;

use crate::pipeline::{process_frame, FrameOutcome, PhotonPipeline};
use crate::telemetry::PhotonTelemetry;

/// Configuration for the paced driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub target_hz: f64,
    /// Jitter budget [µs]; 0 disables the check.
    pub max_jitter_us: f64,
    pub use_busy_wait: bool,
}

/// Paced photon-counting monitor loop.
pub struct MonitorDriver<S: FrameSource> {
    pub source: S,
    pub pipeline: PhotonPipeline,
    pub telemetry: PhotonTelemetry,
    pub config: DriverConfig,
    roi: [usize; 2],
    timeout_ms: u64,
}

impl<S: FrameSource> MonitorDriver<S> {
    pub fn new(
        source: S,
        pipeline: PhotonPipeline,
        telemetry: PhotonTelemetry,
        config: DriverConfig,
        roi: [usize; 2],
        timeout_ms: u64,
    ) -> Self {
        Self {
            source,
            pipeline,
            telemetry,
            config,
            roi,
            timeout_ms,
        }
    }

    /// Assemble a driver from a validated monitor configuration.
    /// Configures the source exposure as a side effect.
    pub fn from_config(config: &MonitorConfig, mut source: S) -> MonitorResult<Self> {
        config.validate()?;
        source.configure_exposure(config.acquisition.exposure_us)?;
        let pipeline = PhotonPipeline::new(
            config.calibration.clone(),
            config.acquisition.baseline_frames,
        )?;
        let telemetry = PhotonTelemetry::new(config.telemetry.history);
        Ok(Self::new(
            source,
            pipeline,
            telemetry,
            DriverConfig {
                target_hz: config.acquisition.target_hz,
                max_jitter_us: config.acquisition.max_jitter_us,
                use_busy_wait: false,
            },
            config.acquisition.roi,
            config.acquisition.timeout_ms,
        ))
    }

    /// Execute a monitoring run of `duration_s` seconds.
    pub fn run(&mut self, duration_s: f64) -> MonitorResult<MonitorReport> {
        self.run_with_observer(duration_s, |_| {})
    }

    /// Execute a run, invoking `observer` after every tick.
    pub fn run_with_observer<F>(
        &mut self,
        duration_s: f64,
        mut observer: F,
    ) -> MonitorResult<MonitorReport>
    where
        F: FnMut(&FrameOutcome),
    {
        if !duration_s.is_finite() || duration_s <= 0.0 {
            return Err(MonitorError::ConfigError(
                "duration_s must be finite and > 0".to_string(),
            ));
        }
        if !self.config.target_hz.is_finite() || self.config.target_hz <= 0.0 {
            return Err(MonitorError::ConfigError(
                "target_hz must be finite and > 0".to_string(),
            ));
        }
        if !self.config.max_jitter_us.is_finite() || self.config.max_jitter_us < 0.0 {
            return Err(MonitorError::ConfigError(
                "max_jitter_us must be finite and >= 0".to_string(),
            ));
        }

        let steps = (duration_s * self.config.target_hz) as usize;
        if steps == 0 {
            return Err(MonitorError::ConfigError(format!(
                "duration {duration_s}s is shorter than one frame period",
            )));
        }

        self.source.begin_acquisition()?;
        let result = self.drive(steps, duration_s, &mut observer);
        let ended = self.source.end_acquisition();
        let report = result?;
        ended?;
        Ok(report)
    }

    fn drive<F>(
        &mut self,
        steps: usize,
        duration_s: f64,
        observer: &mut F,
    ) -> MonitorResult<MonitorReport>
    where
        F: FnMut(&FrameOutcome),
    {
        let step_duration = Duration::from_secs_f64(1.0 / self.config.target_hz);
        let mut next_tick = Instant::now();
        let t_start = Instant::now();

        let mut processed = 0usize;
        let mut dropped = 0usize;
        let mut photon_sum = 0.0;
        let mut photon_samples = 0usize;
        let mut max_photons = 0.0f64;
        let mut max_step_us = 0.0f64;
        let mut jitter_sum = 0.0;
        let mut jitter_max = 0.0f64;

        let qe = self.pipeline.calibration().quantum_efficiency;
        let read_noise = self.pipeline.calibration().read_noise_electrons;

        for _ in 0..steps {
            if self.config.use_busy_wait {
                while Instant::now() < next_tick {
                    std::hint::spin_loop();
                }
            } else if let Some(wait) = next_tick.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }

            let tick_started_at = Instant::now();
            let jitter_us = if tick_started_at >= next_tick {
                (tick_started_at - next_tick).as_secs_f64() * 1_000_000.0
            } else {
                (next_tick - tick_started_at).as_secs_f64() * 1_000_000.0
            };
            if self.config.max_jitter_us > 0.0 && jitter_us > self.config.max_jitter_us {
                return Err(MonitorError::TimingViolation(format!(
                    "tick jitter exceeded threshold: jitter_us={:.3} > allowed={:.3}",
                    jitter_us, self.config.max_jitter_us
                )));
            }
            jitter_sum += jitter_us;
            jitter_max = jitter_max.max(jitter_us);

            let t_step = Instant::now();
            let outcome = process_frame(
                &mut self.source,
                &mut self.pipeline,
                self.roi,
                self.timeout_ms,
            )?;

            match &outcome {
                FrameOutcome::Dropped => dropped += 1,
                FrameOutcome::Calibrating { .. } | FrameOutcome::BaselineComplete(_) => {
                    processed += 1
                }
                FrameOutcome::Sample(sample) => {
                    processed += 1;
                    let snr = photon_snr(sample.photons, qe, read_noise);
                    self.telemetry.record(sample.photons, sample.mean_adu, snr);
                    photon_sum += sample.photons;
                    photon_samples += 1;
                    max_photons = max_photons.max(sample.photons);
                }
            }
            observer(&outcome);

            max_step_us = max_step_us.max(t_step.elapsed().as_secs_f64() * 1_000_000.0);
            next_tick += step_duration;
        }

        let wall_time_ms = t_start.elapsed().as_secs_f64() * 1000.0;
        let mean_photons = if photon_samples > 0 {
            photon_sum / photon_samples as f64
        } else {
            0.0
        };

        Ok(MonitorReport {
            frames_requested: steps,
            frames_processed: processed,
            frames_dropped: dropped,
            baseline: self.pipeline.baseline_stats().copied(),
            mean_photons,
            max_photons,
            duration_s,
            wall_time_ms,
            max_step_time_us: max_step_us,
            mean_jitter_us: jitter_sum / steps as f64,
            max_jitter_us: jitter_max,
        })
    }
}
