//! Signal-to-noise ratio for photon-counting measurements.
//!
//! Port of `calculate_snr()` in `photon_conversion.py`.
//! Shot noise plus read noise:
//! `SNR = S / sqrt(S + σ_read²)` with `S = photons × QE` in electrons.

use ndarray::Array2;

/// SNR of a photon-counting measurement. Returns 0 when the noise
/// denominator vanishes (zero signal with zero read noise).
pub fn photon_snr(signal_photons: f64, quantum_efficiency: f64, read_noise_electrons: f64) -> f64 {
    let signal_electrons = signal_photons * quantum_efficiency;
    let noise_electrons = (signal_electrons + read_noise_electrons.powi(2)).sqrt();
    if noise_electrons > 0.0 {
        signal_electrons / noise_electrons
    } else {
        0.0
    }
}

/// Per-pixel SNR map.
pub fn photon_snr_frame(
    signal_photons: &Array2<f64>,
    quantum_efficiency: f64,
    read_noise_electrons: f64,
) -> Array2<f64> {
    signal_photons.mapv(|p| photon_snr(p, quantum_efficiency, read_noise_electrons))
}
