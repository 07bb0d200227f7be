//! Test helpers for writing rank requests into temporary workspaces.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory holding a single `request.json`.
pub(super) struct RequestWorkspace {
    _dir: TempDir,
    root: Utf8PathBuf,
    request_path: Utf8PathBuf,
}

impl RequestWorkspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");
        Self {
            _dir: dir,
            root,
            request_path,
        }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn request_path(&self) -> &Utf8Path {
        &self.request_path
    }

    pub(super) fn write_request(&self, request: &Value) {
        let payload = serde_json::to_string_pretty(request).expect("serialize request");
        write_utf8(&self.request_path, payload.as_bytes());
    }
}

/// Boundary record for a one-degree box whose south-west corner is
/// `(lat, lon)`, covering 2020.
pub(super) fn record_json(id: &str, lat: f64, lon: f64) -> Value {
    #[expect(clippy::float_arithmetic, reason = "box corners are offsets")]
    let (max_lat, max_lon) = (lat + 1.0, lon + 1.0);
    json!({
        "id": id,
        "bounding_box": [lat, max_lat, lon, max_lon],
        "vector_shape": [[lon, lat], [max_lon, lat], [max_lon, max_lat]],
        "time_interval": ["2020-01-01T00:00:00Z", "2020-12-31T00:00:00Z"],
    })
}

/// Request with a query near the origin and three candidates at growing
/// distances.
pub(super) fn sample_request() -> Value {
    json!({
        "query": record_json("query", 10.0, 10.0),
        "candidates": [
            record_json("far", -50.0, 120.0),
            record_json("same", 10.0, 10.0),
            record_json("near", 11.0, 10.0),
        ],
    })
}
