//! File I/O around the pipeline.
//!
//! - Readers for the two channel logs and the JSON sidecar.
//! - [`write_physio`]: the FSL text file (tab-delimited, `%.9f`).
//! - [`DiagnosticsWriter`]: a safetensors dump of intermediate traces.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{PhysioError, Result};
use crate::table::AlignedTable;

/// Extension of the emitted FSL file.
pub const PHYSIO_EXTENSION: &str = "physio";

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> PhysioError + '_ {
    move |source| PhysioError::Io { path: path.to_path_buf(), source }
}

/// Read a channel log fully into memory.
pub fn read_channel_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(io_err(path))
}

/// Read and parse the JSON sidecar.
pub fn read_metadata_file(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(io_err(path))?;
    Ok(serde_json::from_str(&text)?)
}

/// `<out_dir>/<metadata stem>.physio`.
pub fn physio_path(metadata_path: &Path, out_dir: &Path) -> PathBuf {
    let stem = metadata_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "physio".into());
    out_dir.join(format!("{stem}.{PHYSIO_EXTENSION}"))
}

/// Write `table` as tab-separated rows with nine decimals per value.
pub fn write_physio(table: &AlignedTable, path: &Path) -> Result<()> {
    let mut buf = String::with_capacity(table.n_rows() * 4 * 16);
    for row in table.to_array().rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.9}")).collect();
        buf.push_str(&line.join("\t"));
        buf.push('\n');
    }
    let file = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(file);
    w.write_all(buf.as_bytes()).map_err(io_err(path))?;
    w.flush().map_err(io_err(path))?;
    Ok(())
}

// ── Diagnostics ──────────────────────────────────────────────────────────────

/// Minimal safetensors writer for `F64` and `I64` vectors.
///
/// ```rust,no_run
/// use physlog::io::DiagnosticsWriter;
/// use std::path::Path;
/// let mut w = DiagnosticsWriter::new();
/// w.add_f64("pulse", &[1.0, 2.0, 3.0]);
/// w.add_i64("pulse_axis", &[0, 20, 40]);
/// w.write(Path::new("/tmp/steps.safetensors")).unwrap();
/// ```
#[derive(Default)]
pub struct DiagnosticsWriter {
    entries: Vec<(String, &'static str, usize, Vec<u8>)>,
}

impl DiagnosticsWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_f64(&mut self, name: &str, data: &[f64]) {
        let bytes = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), "F64", data.len(), bytes));
    }

    pub fn add_i64(&mut self, name: &str, data: &[i64]) {
        let bytes = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), "I64", data.len(), bytes));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header: u64 LE length, JSON map padded with spaces to 8 bytes; then data.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut header = serde_json::Map::new();
        let mut offset = 0usize;
        for (name, dtype, n, data) in &self.entries {
            header.insert(
                name.clone(),
                serde_json::json!({
                    "dtype": dtype,
                    "shape": [n],
                    "data_offsets": [offset, offset + data.len()],
                }),
            );
            offset += data.len();
        }
        let mut hdr = serde_json::to_vec(&header)?;
        hdr.resize(hdr.len().div_ceil(8) * 8, b' ');

        let file = File::create(path).map_err(io_err(path))?;
        let mut w = BufWriter::new(file);
        w.write_all(&(hdr.len() as u64).to_le_bytes()).map_err(io_err(path))?;
        w.write_all(&hdr).map_err(io_err(path))?;
        for (_, _, _, data) in &self.entries {
            w.write_all(data).map_err(io_err(path))?;
        }
        w.flush().map_err(io_err(path))?;
        Ok(())
    }
}
