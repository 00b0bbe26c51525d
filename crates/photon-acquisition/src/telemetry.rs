// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Circular Telemetry Buffer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Zero-allocation circular buffer for per-frame telemetry.
//!
//! Replaces the unbounded plot lists of `visualization.py`: capacity is
//! the plot-history limit (`limit_plot_history`), applied on push
//! instead of trimmed after the fact.

use serde::{Deserialize, Serialize};

/// A fixed-size circular buffer for a single telemetry channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryChannel {
    data: Vec<f64>,
    capacity: usize,
    head: usize,
    count: usize,
}

impl TelemetryChannel {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity],
            capacity,
            head: 0,
            count: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        if self.count < self.capacity {
            self.count += 1;
        }
    }

    /// Returns the data in chronological order (oldest to newest).
    pub fn get_view(&self) -> Vec<f64> {
        let mut result = Vec::with_capacity(self.count);
        if self.count < self.capacity {
            result.extend_from_slice(&self.data[0..self.count]);
        } else {
            // Read from head to end, then from 0 to head
            result.extend_from_slice(&self.data[self.head..self.capacity]);
            result.extend_from_slice(&self.data[0..self.head]);
        }
        result
    }

    pub fn latest(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let idx = if self.head == 0 {
            self.capacity - 1
        } else {
            self.head - 1
        };
        self.data[idx]
    }

    /// Mean of the retained window.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.get_view().iter().sum::<f64>() / self.count as f64
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }
}

/// Per-frame monitor channels: photon count, raw ROI level, SNR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotonTelemetry {
    pub photons: TelemetryChannel,
    pub mean_adu: TelemetryChannel,
    pub snr: TelemetryChannel,
}

impl PhotonTelemetry {
    pub fn new(capacity: usize) -> Self {
        Self {
            photons: TelemetryChannel::new(capacity),
            mean_adu: TelemetryChannel::new(capacity),
            snr: TelemetryChannel::new(capacity),
        }
    }

    pub fn record(&mut self, photons: f64, mean_adu: f64, snr: f64) {
        self.photons.push(photons);
        self.mean_adu.push(mean_adu);
        self.snr.push(snr);
    }

    /// Mean photons/pixel over the retained window.
    /// Python: the live text overlay of `update_plot()`.
    pub fn mean_photons(&self) -> f64 {
        self.photons.mean()
    }

    pub fn clear(&mut self) {
        self.photons.clear();
        self.mean_adu.clear();
        self.snr.clear();
    }
}
