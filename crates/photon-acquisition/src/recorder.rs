//! NPZ export of the telemetry history.
//!
//! The Python monitor plotted live through PyQtGraph; the Rust monitor
//! is headless and persists the same three traces to a NumPy `.npz`
//! archive for offline plotting.

use std::fs::File;

use ndarray::Array1;
use ndarray_npy::{NpzReader, NpzWriter};
use photon_types::error::{MonitorError, MonitorResult};

use crate::telemetry::PhotonTelemetry;

/// Chronological channel traces as written to disk.
#[derive(Debug, Clone)]
pub struct HistoryArchive {
    pub photons: Array1<f64>,
    pub mean_adu: Array1<f64>,
    pub snr: Array1<f64>,
}

/// Write the retained telemetry window to `path`.
pub fn write_history(path: &str, telemetry: &PhotonTelemetry) -> MonitorResult<()> {
    let file = File::create(path)?;
    let mut writer = NpzWriter::new(file);

    let photons = Array1::from_vec(telemetry.photons.get_view());
    let mean_adu = Array1::from_vec(telemetry.mean_adu.get_view());
    let snr = Array1::from_vec(telemetry.snr.get_view());

    writer
        .add_array("photons", &photons)
        .map_err(|e| MonitorError::Export(format!("photons: {e}")))?;
    writer
        .add_array("mean_adu", &mean_adu)
        .map_err(|e| MonitorError::Export(format!("mean_adu: {e}")))?;
    writer
        .add_array("snr", &snr)
        .map_err(|e| MonitorError::Export(format!("snr: {e}")))?;
    writer
        .finish()
        .map_err(|e| MonitorError::Export(e.to_string()))?;
    Ok(())
}

/// Read a history archive back from `path`.
pub fn read_history(path: &str) -> MonitorResult<HistoryArchive> {
    let file = File::open(path)?;
    let mut npz = NpzReader::new(file)
        .map_err(|e| MonitorError::Export(format!("failed to open npz '{path}': {e}")))?;

    Ok(HistoryArchive {
        photons: read_channel(&mut npz, "photons")?,
        mean_adu: read_channel(&mut npz, "mean_adu")?,
        snr: read_channel(&mut npz, "snr")?,
    })
}

fn read_channel(npz: &mut NpzReader<File>, key: &str) -> MonitorResult<Array1<f64>> {
    npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(key))
        .map_err(|e| MonitorError::Export(format!("failed to read {key} from npz: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path() -> std::path::PathBuf {
        let epoch_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "photon_history_{}_{}.npz",
            std::process::id(),
            epoch_ns
        ))
    }

    #[test]
    fn test_history_roundtrip() {
        let mut telemetry = PhotonTelemetry::new(100);
        for i in 0..10 {
            let photons = 500.0 + i as f64;
            telemetry.record(photons, 280.0 + i as f64, 17.0);
        }

        let path = temp_path();
        write_history(path.to_str().unwrap(), &telemetry).unwrap();

        let archive = read_history(path.to_str().unwrap()).unwrap();
        assert_eq!(archive.photons.len(), 10);
        assert_eq!(archive.mean_adu.len(), 10);
        assert_eq!(archive.snr.len(), 10);
        assert!((archive.photons[0] - 500.0).abs() < 1e-12);
        assert!((archive.photons[9] - 509.0).abs() < 1e-12);
        assert!((archive.mean_adu[3] - 283.0).abs() < 1e-12);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_wrapped_window_exports_chronologically() {
        let mut telemetry = PhotonTelemetry::new(4);
        for i in 0..7 {
            telemetry.record(i as f64, 0.0, 0.0);
        }

        let path = temp_path();
        write_history(path.to_str().unwrap(), &telemetry).unwrap();
        let archive = read_history(path.to_str().unwrap()).unwrap();

        assert_eq!(archive.photons.len(), 4);
        assert_eq!(archive.photons.to_vec(), vec![3.0, 4.0, 5.0, 6.0]);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_history_exports_empty_arrays() {
        let telemetry = PhotonTelemetry::new(8);
        let path = temp_path();
        write_history(path.to_str().unwrap(), &telemetry).unwrap();
        let archive = read_history(path.to_str().unwrap()).unwrap();
        assert_eq!(archive.photons.len(), 0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_read_missing_file_is_error() {
        assert!(read_history("/nonexistent/photon_history.npz").is_err());
    }
}
