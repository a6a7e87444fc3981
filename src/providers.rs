// Collaborator interfaces queried by the snapshot aggregator.
//
// Each provider reports native units; conversion and clamping happen in the aggregator.

use std::path::PathBuf;

pub use crate::gpu_repo::{GpuProvider, GpuReading};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsIdentity {
    pub system_name: String,
    pub node_name: String,
    pub os_release: String,
    pub os_version: String,
    pub machine_type: String,
    pub processor: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuReading {
    /// Human-readable brand string, if the CPU identification source has one.
    pub brand: Option<String>,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    /// Nominal frequency; 0 when unknown.
    pub frequency_mhz: f64,
    /// Usage sampled over the provider's blocking window.
    pub usage_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReading {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskReading {
    pub mount_point: PathBuf,
    pub total_bytes: u64,
    pub free_bytes: u64,
}

pub trait OsIdentityProvider: Send + Sync {
    fn identity(&self) -> anyhow::Result<OsIdentity>;
}

pub trait CpuProvider: Send + Sync {
    /// May block for the sampling window.
    fn read_cpu(&self) -> anyhow::Result<CpuReading>;
}

pub trait MemoryProvider: Send + Sync {
    fn read_memory(&self) -> anyhow::Result<MemoryReading>;
}

pub trait DiskProvider: Send + Sync {
    fn read_disk(&self) -> anyhow::Result<DiskReading>;
}
