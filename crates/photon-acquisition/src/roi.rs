//! Centered region-of-interest extraction.
//!
//! Port of `extract_roi()` in `acquisition.py`.

use ndarray::{s, ArrayView2};
use photon_types::error::{MonitorError, MonitorResult};
use photon_types::state::Frame;

/// Borrow the centered `roi_w × roi_h` window of a frame.
///
/// The window is anchored at `(w/2 - roi_w/2, h/2 - roi_h/2)`, matching
/// the NumPy slice in `extract_roi()`. An ROI larger than the frame in
/// either dimension is rejected.
pub fn extract_roi(frame: &Frame, roi_w: usize, roi_h: usize) -> MonitorResult<ArrayView2<'_, u16>> {
    let h = frame.height();
    let w = frame.width();
    if roi_w > w || roi_h > h {
        return Err(MonitorError::RoiOutOfBounds {
            roi_w,
            roi_h,
            width: w,
            height: h,
        });
    }

    let x0 = w / 2 - roi_w / 2;
    let y0 = h / 2 - roi_h / 2;
    Ok(frame.data.slice(s![y0..y0 + roi_h, x0..x0 + roi_w]))
}

/// Mean level of an ROI view [ADU].
pub fn roi_mean(view: &ArrayView2<'_, u16>) -> f64 {
    if view.is_empty() {
        return 0.0;
    }
    let sum: f64 = view.iter().map(|&v| f64::from(v)).sum();
    sum / view.len() as f64
}
