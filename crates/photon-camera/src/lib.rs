// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Photon Camera
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Camera abstraction and simulated IMX287 sensor.
//!
//! The vendor GenTL/Spinnaker layer stays outside this codebase; every
//! consumer programs against [`device::FrameSource`].

pub mod device;
pub mod simulator;

pub use device::{DeviceInfo, FrameSource, GrabResult};
pub use simulator::{SimulatedSensor, SimulatorOptions};
