// System identity, CPU, memory, disk and the aggregate snapshot

use serde::{Deserialize, Serialize};

use super::GpuInfo;

/// Platform identity as `uname` reports it. Empty strings when unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub system_name: String,
    pub node_name: String,
    pub os_release: String,
    pub os_version: String,
    pub machine_type: String,
    pub processor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub processor_name: String,
    /// `null` when the platform cannot report physical cores.
    pub physical_cores: Option<u32>,
    pub logical_cores: u32,
    pub cpu_frequency_mhz: f64,
    pub cpu_usage_percent: f64,
}

/// Physical memory in GB (1024³), 2dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_gb: f64,
    pub available_gb: f64,
    pub used_gb: f64,
    pub utilization_percent: f64,
}

/// Usage of the reported volume in GB (1024³), 2dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub utilization_percent: f64,
}

/// One point-in-time read of all host metrics. Built per call and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub system: SystemInfo,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub disk: DiskInfo,
    /// Empty when no supported GPU or driver is present.
    pub gpu: Vec<GpuInfo>,
}
