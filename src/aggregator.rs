// Snapshot aggregation: query each provider once, normalize units, assemble the record

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::config::AppConfig;
use crate::error::{Domain, SnapshotError};
use crate::gpu_repo;
use crate::models::{CpuInfo, DiskInfo, GpuInfo, MemoryInfo, SystemInfo, SystemSnapshot};
use crate::providers::{
    CpuProvider, CpuReading, DiskProvider, DiskReading, GpuProvider, GpuReading, MemoryProvider,
    MemoryReading, OsIdentity, OsIdentityProvider,
};
use crate::sysinfo_repo::SysinfoRepo;
use crate::units::{
    bytes_to_gb, bytes_to_mb, clamp_percent, non_negative, round2, utilization_percent,
};

/// Builds [`SystemSnapshot`]s from five independent providers.
///
/// OS identity, CPU, memory and disk are mandatory: any failure aborts the call.
/// GPU is optional: failures are logged and reported as an empty list.
pub struct SnapshotAggregator {
    os: Box<dyn OsIdentityProvider>,
    cpu: Box<dyn CpuProvider>,
    memory: Box<dyn MemoryProvider>,
    disk: Box<dyn DiskProvider>,
    gpu: Box<dyn GpuProvider>,
}

impl SnapshotAggregator {
    pub fn new(
        os: impl OsIdentityProvider + 'static,
        cpu: impl CpuProvider + 'static,
        memory: impl MemoryProvider + 'static,
        disk: impl DiskProvider + 'static,
        gpu: impl GpuProvider + 'static,
    ) -> Self {
        Self {
            os: Box::new(os),
            cpu: Box::new(cpu),
            memory: Box::new(memory),
            disk: Box::new(disk),
            gpu: Box::new(gpu),
        }
    }

    /// Live providers: sysinfo for the mandatory domains, the configured GPU backend.
    pub fn from_config(config: &AppConfig) -> Self {
        let repo = SysinfoRepo::new(
            Duration::from_millis(config.sampling.cpu_sample_ms),
            config.disk.resolved_path(),
        );
        tracing::info!(
            cpu_sample_ms = repo.cpu_sample().as_millis() as u64,
            disk = %repo.disk_path().display(),
            gpu = ?config.gpu.backend,
            "snapshot providers configured"
        );
        Self {
            os: Box::new(repo.clone()),
            cpu: Box::new(repo.clone()),
            memory: Box::new(repo.clone()),
            disk: Box::new(repo),
            gpu: gpu_repo::from_config(&config.gpu),
        }
    }

    /// Take one snapshot. Blocks for the CPU sampling window.
    #[instrument(skip(self), fields(operation = "get_system_info"))]
    pub fn get_system_info(&self) -> Result<SystemSnapshot, SnapshotError> {
        let identity = self
            .os
            .identity()
            .map_err(|e| SnapshotError::provider(Domain::System, e))?;
        let cpu = self
            .cpu
            .read_cpu()
            .map_err(|e| SnapshotError::provider(Domain::Cpu, e))?;
        let memory = self
            .memory
            .read_memory()
            .map_err(|e| SnapshotError::provider(Domain::Memory, e))?;
        let disk = self
            .disk
            .read_disk()
            .map_err(|e| SnapshotError::provider(Domain::Disk, e))?;
        let gpu = match self.gpu.enumerate() {
            Ok(readings) => readings,
            Err(e) => {
                tracing::debug!(
                    backend = self.gpu.backend(),
                    "GPU enumeration unavailable: {:#}",
                    e
                );
                Vec::new()
            }
        };

        Ok(SystemSnapshot {
            cpu: format_cpu(cpu, &identity.processor),
            system: format_system(identity),
            memory: format_memory(memory),
            disk: format_disk(disk),
            gpu: format_gpus(gpu),
        })
    }

    /// Run [`get_system_info`](Self::get_system_info) on the blocking pool.
    pub async fn snapshot(self: &Arc<Self>) -> Result<SystemSnapshot, SnapshotError> {
        let this = Arc::clone(self);
        tokio::task::spawn_blocking(move || this.get_system_info()).await?
    }
}

fn format_system(identity: OsIdentity) -> SystemInfo {
    SystemInfo {
        system_name: identity.system_name,
        node_name: identity.node_name,
        os_release: identity.os_release,
        os_version: identity.os_version,
        machine_type: identity.machine_type,
        processor: identity.processor,
    }
}

fn format_cpu(reading: CpuReading, os_processor: &str) -> CpuInfo {
    let processor_name = reading
        .brand
        .filter(|b| !b.trim().is_empty())
        .or_else(|| Some(os_processor.trim().to_string()).filter(|p| !p.is_empty()))
        .unwrap_or_else(|| "Unknown".into());

    CpuInfo {
        processor_name,
        physical_cores: reading
            .physical_cores
            .map(|n| n.min(u32::MAX as usize) as u32),
        logical_cores: reading.logical_cores.clamp(1, u32::MAX as usize) as u32,
        cpu_frequency_mhz: round2(non_negative(reading.frequency_mhz)),
        cpu_usage_percent: round2(clamp_percent(reading.usage_percent)),
    }
}

fn format_memory(reading: MemoryReading) -> MemoryInfo {
    let total = reading.total_bytes;
    let available = reading.available_bytes.min(total);
    let used = total - available;
    let total_gb = bytes_to_gb(total);
    let available_gb = bytes_to_gb(available);

    MemoryInfo {
        total_gb,
        available_gb,
        // From the rounded figures so used + available == total after rounding.
        used_gb: round2(non_negative(total_gb - available_gb)),
        utilization_percent: utilization_percent(used, total),
    }
}

fn format_disk(reading: DiskReading) -> DiskInfo {
    let total = reading.total_bytes;
    let free = reading.free_bytes.min(total);
    let used = total - free;
    let total_gb = bytes_to_gb(total);
    let free_gb = bytes_to_gb(free);

    DiskInfo {
        total_gb,
        used_gb: round2(non_negative(total_gb - free_gb)),
        free_gb,
        utilization_percent: utilization_percent(used, total),
    }
}

fn format_gpus(mut readings: Vec<GpuReading>) -> Vec<GpuInfo> {
    readings.sort_by_key(|g| g.index);
    readings
        .into_iter()
        .map(|g| GpuInfo {
            id: g.index,
            name: g.name,
            memory_total_mb: bytes_to_mb(g.memory_total_bytes),
            memory_used_mb: bytes_to_mb(g.memory_used_bytes),
            memory_free_mb: bytes_to_mb(g.memory_free_bytes),
            gpu_utilization_percent: round2(clamp_percent(g.utilization_percent)),
            temperature_c: g.temperature_c,
        })
        .collect()
}
