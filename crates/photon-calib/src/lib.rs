// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Photon Calib
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! EMVA 1288 conversion math and dark-baseline statistics.

pub mod baseline;
pub mod conversion;
pub mod snr;
