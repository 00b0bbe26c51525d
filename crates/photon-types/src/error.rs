use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("ROI {roi_w}x{roi_h} exceeds frame {width}x{height}")]
    RoiOutOfBounds {
        roi_w: usize,
        roi_h: usize,
        width: usize,
        height: usize,
    },

    #[error("Acquisition error at frame {frame}: {message}")]
    Acquisition { frame: u64, message: String },

    #[error("Calibration error: {0}")]
    Calibration(String),

    #[error("Timing violation: {0}")]
    TimingViolation(String),

    #[error("History export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MonitorResult<T> = Result<T, MonitorError>;
