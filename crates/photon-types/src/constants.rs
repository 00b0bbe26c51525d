// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! EMVA 1288 measured parameters for the BFS-U3-04S2M-C camera
//! (Sony IMX287 sensor, monochrome).
//!
//! Source: FLIR EMVA imaging performance data,
//! <https://softwareservices.flir.com/BFS-U3-04S2/latest/EMVA/EMVA.html>

/// System gain K [e⁻/ADU]. Python: 0.35.
pub const SYSTEM_GAIN: f64 = 0.35;

/// Quantum efficiency at 525 nm. Python: 0.6182 (61.82%).
pub const QE_AT_525NM: f64 = 0.6182;

/// Wavelength of the QE measurement [nm].
pub const QE_WAVELENGTH_NM: f64 = 525.0;

/// Tolerance window around the QE measurement wavelength [nm]. Python: 50.
pub const QE_WINDOW_NM: f64 = 50.0;

/// Saturation capacity (full well) [e⁻]. Python: 22187.
pub const SATURATION_ELECTRONS: f64 = 22_187.0;

/// Temporal dark (read) noise [e⁻]. Python: 3.71.
pub const READ_NOISE_ELECTRONS: f64 = 3.71;

/// IMX287 active array width [px].
pub const SENSOR_WIDTH: usize = 720;

/// IMX287 active array height [px].
pub const SENSOR_HEIGHT: usize = 540;

/// ADC resolution of the Mono10 pixel format [bits].
pub const SENSOR_BIT_DEPTH: u32 = 10;
