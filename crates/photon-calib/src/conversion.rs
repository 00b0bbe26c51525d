// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — ADU Conversion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! ADU → electron → photon conversion.
//!
//! Port of `photon_conversion.py`.
//! The conversion follows the EMVA 1288 standard:
//! 1. ADU → electrons: multiply by system gain [e⁻/ADU]
//! 2. electrons → photons: divide by quantum efficiency
//!
//! `photons = max(signal_adu − dark_adu, 0) × gain / QE`
//!
//! A signal darker than the baseline clamps to zero photons. The result
//! represents photons incident on the sensor, not photons absorbed, and
//! assumes the shot-noise-limited regime (signal ≫ read noise).

use ndarray::Array2;
use photon_types::constants::{QE_AT_525NM, QE_WAVELENGTH_NM, QE_WINDOW_NM};

/// QE lookup result. `extrapolated` flags wavelengths outside the
/// measured ±50 nm window, where the 525 nm value is the best we have.
#[derive(Debug, Clone, Copy)]
pub struct QeEstimate {
    pub qe: f64,
    pub extrapolated: bool,
}

/// Convert a mean ADU level to photoelectrons.
pub fn adu_to_electrons(signal_adu: f64, dark_adu: f64, gain: f64) -> f64 {
    let delta_adu = (signal_adu - dark_adu).max(0.0);
    delta_adu * gain
}

/// Convert photoelectrons to incident photons.
pub fn electrons_to_photons(electrons: f64, quantum_efficiency: f64) -> f64 {
    electrons / quantum_efficiency
}

/// Convert a mean ADU level to incident photons.
pub fn adu_to_photons(signal_adu: f64, dark_adu: f64, gain: f64, quantum_efficiency: f64) -> f64 {
    electrons_to_photons(adu_to_electrons(signal_adu, dark_adu, gain), quantum_efficiency)
}

/// Per-pixel conversion of a full ADU map.
pub fn adu_to_photons_frame(
    signal_adu: &Array2<f64>,
    dark_adu: f64,
    gain: f64,
    quantum_efficiency: f64,
) -> Array2<f64> {
    signal_adu.mapv(|v| adu_to_photons(v, dark_adu, gain, quantum_efficiency))
}

/// Quantum efficiency at a given wavelength.
///
/// Only the 525 nm value is measured; within ±50 nm of that the value
/// is returned as-is, outside the window it is flagged as extrapolated.
/// For accurate multi-wavelength work the full IMX287 QE curve from the
/// sensor datasheet is required.
pub fn qe_at_wavelength(wavelength_nm: f64) -> QeEstimate {
    QeEstimate {
        qe: QE_AT_525NM,
        extrapolated: (wavelength_nm - QE_WAVELENGTH_NM).abs() >= QE_WINDOW_NM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photon_types::constants::SYSTEM_GAIN;

    #[test]
    fn test_adu_to_photons_reference_value() {
        // (1000 - 100) × 0.35 / 0.6182 = 509.54...
        let photons = adu_to_photons(1000.0, 100.0, SYSTEM_GAIN, QE_AT_525NM);
        assert!((photons - 509.5438).abs() < 1e-3, "photons = {photons}");
    }

    #[test]
    fn test_negative_delta_clamps_to_zero() {
        let photons = adu_to_photons(90.0, 100.0, SYSTEM_GAIN, QE_AT_525NM);
        assert!((photons).abs() < 1e-12, "darker than baseline → 0: {photons}");
    }

    #[test]
    fn test_electron_photon_chain() {
        let e = adu_to_electrons(1000.0, 100.0, SYSTEM_GAIN);
        assert!((e - 315.0).abs() < 1e-10);
        let p = electrons_to_photons(e, QE_AT_525NM);
        assert!(p > e, "QE < 1 → more photons than electrons");
    }

    #[test]
    fn test_frame_conversion_matches_scalar() {
        let map = Array2::from_shape_fn((4, 4), |(r, c)| 100.0 + (r * 4 + c) as f64 * 50.0);
        let photons = adu_to_photons_frame(&map, 100.0, SYSTEM_GAIN, QE_AT_525NM);
        for (v, p) in map.iter().zip(photons.iter()) {
            let expected = adu_to_photons(*v, 100.0, SYSTEM_GAIN, QE_AT_525NM);
            assert!((p - expected).abs() < 1e-12);
        }
        // Pixel at baseline converts to exactly zero
        assert!((photons[[0, 0]]).abs() < 1e-12);
    }

    #[test]
    fn test_qe_lookup_inside_window() {
        let est = qe_at_wavelength(525.0);
        assert!(!est.extrapolated);
        assert!((est.qe - QE_AT_525NM).abs() < 1e-12);

        let est = qe_at_wavelength(560.0);
        assert!(!est.extrapolated, "within ±50 nm");
    }

    #[test]
    fn test_qe_lookup_outside_window() {
        let est = qe_at_wavelength(850.0);
        assert!(est.extrapolated);
        assert!((est.qe - QE_AT_525NM).abs() < 1e-12, "still returns 525 nm value");
    }
}
