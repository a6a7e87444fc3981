// Per-device GPU record

use serde::{Deserialize, Serialize};

/// One GPU as enumerated by the vendor backend. Memory figures are MB (1024²).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub id: u32,
    pub name: String,
    pub memory_total_mb: f64,
    pub memory_used_mb: f64,
    pub memory_free_mb: f64,
    pub gpu_utilization_percent: f64,
    /// `null` when the sensor is unreadable.
    pub temperature_c: Option<i64>,
}
