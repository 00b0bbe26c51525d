// -------------------------------------------------------------------------
// SCPN Photon Counter -- Conversion Benchmark
// Measures the per-frame ADU map conversion and SNR map at ROI sizes
// matching the 200x200 default and the full IMX287 frame.
// -------------------------------------------------------------------------

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use photon_calib::conversion::adu_to_photons_frame;
use photon_calib::snr::photon_snr_frame;
use photon_types::constants::{QE_AT_525NM, READ_NOISE_ELECTRONS, SYSTEM_GAIN};
use std::hint::black_box;

/// Synthetic ADU map with structure so the clamp branch is exercised.
fn make_map(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(r, c)| {
        90.0 + ((r * 13 + c * 7) % 512) as f64
    })
}

fn bench_adu_to_photons_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("adu_to_photons_frame");
    for n in [100usize, 200, 540] {
        let map = make_map(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &map, |b, map| {
            b.iter(|| {
                black_box(adu_to_photons_frame(
                    black_box(map),
                    100.0,
                    SYSTEM_GAIN,
                    QE_AT_525NM,
                ))
            })
        });
    }
    group.finish();
}

fn bench_photon_snr_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("photon_snr_frame");
    for n in [100usize, 200] {
        let photons = make_map(n).mapv(|v| v * SYSTEM_GAIN / QE_AT_525NM);
        group.bench_with_input(BenchmarkId::from_parameter(n), &photons, |b, p| {
            b.iter(|| {
                black_box(photon_snr_frame(
                    black_box(p),
                    QE_AT_525NM,
                    READ_NOISE_ELECTRONS,
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_adu_to_photons_frame, bench_photon_snr_frame);
criterion_main!(benches);
