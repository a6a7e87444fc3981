// NVIDIA GPUs via `nvidia-smi --query-gpu` (CSV, MiB and percent units)

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::instrument;

use super::{GpuProvider, GpuReading};
use crate::units::BYTES_PER_MB;

/// Resolved through `PATH`.
pub const DEFAULT_BINARY: &str = "nvidia-smi";

const QUERY: &str = "--query-gpu=index,name,memory.total,memory.used,memory.free,utilization.gpu,temperature.gpu";
const FORMAT: &str = "--format=csv,noheader,nounits";

/// Number of numeric columns after the name.
const TRAILING_FIELDS: usize = 5;

#[derive(Debug, Clone)]
pub struct NvidiaSmiProvider {
    binary: PathBuf,
}

impl NvidiaSmiProvider {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self) -> std::io::Result<Output> {
        let result = Command::new(&self.binary).args([QUERY, FORMAT]).output();

        #[cfg(target_os = "windows")]
        {
            if result.is_err() && self.binary.as_os_str() == DEFAULT_BINARY {
                return Command::new(r"C:\Windows\System32\nvidia-smi.exe")
                    .args([QUERY, FORMAT])
                    .output();
            }
        }

        result
    }
}

impl GpuProvider for NvidiaSmiProvider {
    fn backend(&self) -> &'static str {
        "nvidia"
    }

    #[instrument(skip(self), fields(repo = "nvidia-smi", operation = "enumerate"))]
    fn enumerate(&self) -> Result<Vec<GpuReading>> {
        let output = self
            .run()
            .with_context(|| format!("failed to run {}", self.binary.display()))?;
        anyhow::ensure!(
            output.status.success(),
            "{} exited with {}: {}",
            self.binary.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        let stdout = String::from_utf8(output.stdout).context("nvidia-smi output is not UTF-8")?;
        let gpus = parse_query_output(&stdout)?;
        tracing::debug!(count = gpus.len(), "enumerated NVIDIA GPUs");
        Ok(gpus)
    }
}

/// Parse `--format=csv,noheader,nounits` output, one device per line, in reported order.
pub(crate) fn parse_query_output(stdout: &str) -> Result<Vec<GpuReading>> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            parse_line(line).with_context(|| format!("malformed nvidia-smi line {:?}", line))
        })
        .collect()
}

fn parse_line(line: &str) -> Result<GpuReading> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    anyhow::ensure!(
        fields.len() >= TRAILING_FIELDS + 2,
        "expected {} fields, got {}",
        TRAILING_FIELDS + 2,
        fields.len()
    );
    let n = fields.len();
    // Names may contain commas; everything between index and the numeric tail is the name.
    let name = fields[1..n - TRAILING_FIELDS].join(", ");
    let tail = &fields[n - TRAILING_FIELDS..];

    let index = fields[0]
        .parse::<u32>()
        .with_context(|| format!("invalid index {:?}", fields[0]))?;

    Ok(GpuReading {
        index,
        name,
        memory_total_bytes: mib_to_bytes(reading(tail[0])?),
        memory_used_bytes: mib_to_bytes(reading(tail[1])?),
        memory_free_bytes: mib_to_bytes(reading(tail[2])?),
        utilization_percent: reading(tail[3])?.unwrap_or(0.0),
        temperature_c: reading(tail[4])?.map(|t| t.round() as i64),
    })
}

/// `[N/A]`, `[Not Supported]` and friends mean the sensor is unreadable.
fn reading(field: &str) -> Result<Option<f64>> {
    if field.is_empty() || field.starts_with('[') || field.eq_ignore_ascii_case("N/A") {
        return Ok(None);
    }
    field
        .parse::<f64>()
        .map(Some)
        .with_context(|| format!("invalid number {:?}", field))
}

fn mib_to_bytes(mib: Option<f64>) -> u64 {
    match mib {
        Some(v) if v.is_finite() && v > 0.0 => (v * BYTES_PER_MB).round() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn parses_single_device() {
        let out = "0, NVIDIA GeForce RTX 3090, 24576, 1024, 23552, 37, 61\n";
        let gpus = parse_query_output(out).unwrap();
        assert_eq!(gpus.len(), 1);
        let g = &gpus[0];
        assert_eq!(g.index, 0);
        assert_eq!(g.name, "NVIDIA GeForce RTX 3090");
        assert_eq!(g.memory_total_bytes, 24576 * MIB);
        assert_eq!(g.memory_used_bytes, 1024 * MIB);
        assert_eq!(g.memory_free_bytes, 23552 * MIB);
        assert_eq!(g.utilization_percent, 37.0);
        assert_eq!(g.temperature_c, Some(61));
    }

    #[test]
    fn unreadable_temperature_is_none() {
        let out = "0, Tesla T4, 15360, 0, 15360, 0, [N/A]\n";
        let gpus = parse_query_output(out).unwrap();
        assert_eq!(gpus[0].temperature_c, None);

        let out = "0, Tesla T4, 15360, 0, 15360, [Not Supported], [Not Supported]\n";
        let gpus = parse_query_output(out).unwrap();
        assert_eq!(gpus[0].temperature_c, None);
        assert_eq!(gpus[0].utilization_percent, 0.0);
    }

    #[test]
    fn keeps_reported_order_and_skips_blank_lines() {
        let out = "1, B, 8192, 0, 8192, 5, 40\n\n0, A, 4096, 2048, 2048, 90, 70\n";
        let gpus = parse_query_output(out).unwrap();
        let ids: Vec<u32> = gpus.iter().map(|g| g.index).collect();
        assert_eq!(ids, vec![1, 0]);
        assert_eq!(gpus[1].name, "A");
    }

    #[test]
    fn names_with_commas_survive() {
        let out = "0, Quadro RTX 4000, Mobile, 8192, 100, 8092, 3, 45\n";
        let gpus = parse_query_output(out).unwrap();
        assert_eq!(gpus[0].name, "Quadro RTX 4000, Mobile");
        assert_eq!(gpus[0].memory_used_bytes, 100 * MIB);
    }

    #[test]
    fn empty_output_means_no_devices() {
        assert!(parse_query_output("").unwrap().is_empty());
        assert!(parse_query_output("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn malformed_lines_are_errors() {
        assert!(parse_query_output("No devices were found\n").is_err());
        assert!(parse_query_output("x, A, 1, 1, 0, 0, 0\n").is_err());
        assert!(parse_query_output("0, A, lots, 1, 0, 0, 0\n").is_err());
    }

    #[test]
    fn missing_binary_is_an_error() {
        let provider = NvidiaSmiProvider::new("/nonexistent/nvidia-smi");
        assert!(provider.enumerate().is_err());
    }
}
