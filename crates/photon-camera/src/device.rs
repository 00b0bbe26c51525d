// ─────────────────────────────────────────────────────────────────────
// SCPN Photon Counter — Device Interface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Frame source seam.
//!
//! Port of the camera surface used by `camera.py` and `acquisition.py`:
//! initialize/configure exposure, begin acquisition, grab with timeout,
//! end acquisition, TL-device identity reads.

use photon_types::error::MonitorResult;
use photon_types::state::Frame;

/// Device identity, mirror of the TL-device node map reads
/// (`DeviceModelName`, `DeviceSerialNumber`, `DeviceVendorName`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub model: String,
    pub serial: String,
    pub vendor: String,
}

/// Outcome of one grab attempt.
///
/// `Incomplete` is a transfer that finished with an invalid payload —
/// the monitor skips the frame and moves on (`IsIncomplete()` in the
/// original). `Timeout` means no frame arrived within the deadline.
#[derive(Debug, Clone)]
pub enum GrabResult {
    Frame(Frame),
    Incomplete,
    Timeout,
}

/// A device that produces frames.
///
/// Lifecycle: `configure_exposure` → `begin_acquisition` → `grab`* →
/// `end_acquisition`. Grabbing outside an active acquisition is an
/// error; `end_acquisition` is idempotent.
///
/// Transient conditions (incomplete transfer, timeout) are data, not
/// errors: they come back as [`GrabResult`] variants. Implementations
/// reserve `MonitorError::Acquisition` for device faults and
/// `MonitorError::CameraUnavailable` for lifecycle violations.
pub trait FrameSource {
    fn info(&self) -> DeviceInfo;

    /// Fixed manual exposure [µs]; auto-exposure is always off.
    fn configure_exposure(&mut self, exposure_us: f64) -> MonitorResult<()>;

    fn begin_acquisition(&mut self) -> MonitorResult<()>;

    fn grab(&mut self, timeout_ms: u64) -> MonitorResult<GrabResult>;

    fn end_acquisition(&mut self) -> MonitorResult<()>;
}
