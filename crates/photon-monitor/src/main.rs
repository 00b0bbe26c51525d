// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Monitor CLI
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Real-time photon counting monitor for the BFS-U3-04S2M-C.
//!
//! Loads the monitor configuration, paces the simulated sensor at the
//! configured frequency, logs dark-baseline calibration and periodic
//! photon samples, and can export the telemetry history to a NumPy
//! `.npz` archive for offline plotting.

use clap::Parser;
use tracing::{error, info, warn};

use photon_acquisition::pipeline::FrameOutcome;
use photon_acquisition::realtime::MonitorDriver;
use photon_acquisition::recorder::write_history;
use photon_camera::device::FrameSource;
use photon_camera::simulator::{SimulatedSensor, SimulatorOptions};
use photon_types::config::MonitorConfig;
use photon_types::error::MonitorResult;

/// Log one sample line every this many frames. Python: 100.
const SAMPLE_LOG_INTERVAL: u64 = 100;

#[derive(Parser, Debug)]
#[command(
    name = "photon-monitor",
    about = "Real-time photon counting monitor (BFS-U3-04S2M-C, EMVA 1288 calibrated)"
)]
struct Cli {
    /// Monitor configuration JSON.
    #[arg(long, default_value = "monitor_config.json")]
    config: String,

    /// Run duration [s].
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Simulated illumination [photons/pixel/exposure].
    #[arg(long, default_value_t = 0.0)]
    flux: f64,

    /// Seed for the simulated sensor.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Probability of an incomplete frame transfer.
    #[arg(long, default_value_t = 0.0)]
    drop_rate: f64,

    /// Busy-wait between ticks instead of sleeping.
    #[arg(long)]
    busy_wait: bool,

    /// Write the telemetry history to this .npz path at exit.
    #[arg(long)]
    output: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run(&Cli::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> MonitorResult<()> {
    let config = MonitorConfig::from_file(&cli.config)?;
    config.validate()?;

    let exposure_us = config.acquisition.exposure_us;
    let cam = SimulatedSensor::new(
        &config.sensor,
        &config.calibration,
        exposure_us,
        SimulatorOptions {
            flux_photons_per_us: cli.flux / exposure_us,
            incomplete_prob: cli.drop_rate,
            seed: cli.seed,
            ..SimulatorOptions::default()
        },
    )?;

    let device = cam.info();
    info!(
        "camera detected: {} (serial {}, vendor {})",
        device.model, device.serial, device.vendor
    );
    info!("exposure time set to {exposure_us} us");

    let mut driver = MonitorDriver::from_config(&config, cam)?;
    driver.config.use_busy_wait = cli.busy_wait;

    info!(
        "acquiring {} frames for dark baseline calibration",
        config.acquisition.baseline_frames
    );

    let report = driver.run_with_observer(cli.duration, |outcome| match outcome {
        FrameOutcome::Dropped => warn!("frame incomplete; skipping"),
        FrameOutcome::Calibrating { .. } => {}
        FrameOutcome::BaselineComplete(stats) => {
            info!(
                "baseline calibration complete: mean dark {:.2} ADU | noise {:.2} ADU ({:.2} e-)",
                stats.mean_adu, stats.std_adu, stats.noise_electrons
            );
            info!("now acquiring signal frames");
        }
        FrameOutcome::Sample(s) => {
            if s.frame_idx % SAMPLE_LOG_INTERVAL == 0 {
                info!(
                    "frame {}: {:.1} photons/px | ADU {:.1} | delta {:.1}",
                    s.frame_idx, s.photons, s.mean_adu, s.delta_adu
                );
            }
        }
    })?;

    info!(
        "run complete: {}/{} frames processed, {} dropped, wall time {:.1} ms",
        report.frames_processed,
        report.frames_requested,
        report.frames_dropped,
        report.wall_time_ms
    );
    info!(
        "photons/px: mean {:.1} | max {:.1} (history mean {:.1})",
        report.mean_photons,
        report.max_photons,
        driver.telemetry.mean_photons()
    );
    info!(
        "timing: mean jitter {:.1} us | max jitter {:.1} us | max step {:.1} us",
        report.mean_jitter_us, report.max_jitter_us, report.max_step_time_us
    );

    if let Some(path) = &cli.output {
        write_history(path, &driver.telemetry)?;
        info!("telemetry history written to {path}");
    }

    Ok(())
}
