// Host metrics via sysinfo: identity, CPU, memory and one disk volume

mod linux;

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sysinfo::{CpuRefreshKind, Disks, System};
use tracing::instrument;

use crate::providers::{
    CpuProvider, CpuReading, DiskProvider, DiskReading, MemoryProvider, MemoryReading, OsIdentity,
    OsIdentityProvider,
};

/// CPU usage sampling window used when none is configured.
pub const DEFAULT_CPU_SAMPLE: Duration = Duration::from_millis(200);

/// Implements the mandatory providers on top of `sysinfo`.
///
/// Holds configuration only; every read builds fresh `System`/`Disks` handles.
#[derive(Debug, Clone)]
pub struct SysinfoRepo {
    cpu_sample: Duration,
    disk_path: PathBuf,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new(DEFAULT_CPU_SAMPLE, default_disk_path())
    }
}

impl SysinfoRepo {
    /// The sampling window is raised to sysinfo's minimum update interval if shorter.
    pub fn new(cpu_sample: Duration, disk_path: PathBuf) -> Self {
        Self {
            cpu_sample: cpu_sample.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
            disk_path,
        }
    }

    pub fn cpu_sample(&self) -> Duration {
        self.cpu_sample
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }
}

/// The OS root volume: `/` on Unix, the system drive on Windows.
pub fn default_disk_path() -> PathBuf {
    if cfg!(windows) {
        let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".into());
        PathBuf::from(format!("{}\\", drive))
    } else {
        PathBuf::from("/")
    }
}

/// Index of the mount point that contains `target` (longest matching prefix).
pub(crate) fn containing_mount(mounts: &[&Path], target: &Path) -> Option<usize> {
    mounts
        .iter()
        .enumerate()
        .filter(|(_, m)| target.starts_with(m))
        .max_by_key(|(_, m)| m.as_os_str().len())
        .map(|(i, _)| i)
}

/// Kernel name the way `uname -s` spells it.
fn system_name() -> String {
    if let Some(ostype) = linux::read_kernel_field_linux("ostype") {
        return ostype;
    }
    match std::env::consts::OS {
        "linux" => "Linux".into(),
        "macos" => "Darwin".into(),
        "windows" => "Windows".into(),
        other => System::name().unwrap_or_else(|| other.to_string()),
    }
}

impl OsIdentityProvider for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "identity"))]
    fn identity(&self) -> anyhow::Result<OsIdentity> {
        let mut sys = System::new();
        sys.refresh_cpu_list(CpuRefreshKind::nothing());
        let processor = sys
            .cpus()
            .first()
            .map(|c| c.vendor_id().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| std::env::consts::ARCH.to_string());
        let os_release = linux::read_kernel_field_linux("osrelease")
            .or_else(System::kernel_version)
            .unwrap_or_default();
        let os_version = linux::read_kernel_field_linux("version")
            .or_else(System::os_version)
            .unwrap_or_default();

        Ok(OsIdentity {
            system_name: system_name(),
            node_name: System::host_name().unwrap_or_default(),
            os_release,
            os_version,
            machine_type: std::env::consts::ARCH.to_string(),
            processor,
        })
    }
}

impl CpuProvider for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "read_cpu"))]
    fn read_cpu(&self) -> anyhow::Result<CpuReading> {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        std::thread::sleep(self.cpu_sample);
        sys.refresh_cpu_all();

        let logical_cores = match sys.cpus().len() {
            0 => std::thread::available_parallelism()
                .context("platform reports no logical CPUs")?
                .get(),
            n => n,
        };
        let brand = sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(linux::read_cpu_model_linux);
        let frequency_mhz = sys.cpus().first().map(|c| c.frequency()).unwrap_or(0) as f64;

        Ok(CpuReading {
            brand,
            physical_cores: System::physical_core_count(),
            logical_cores,
            frequency_mhz,
            usage_percent: sys.global_cpu_usage() as f64,
        })
    }
}

impl MemoryProvider for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "read_memory"))]
    fn read_memory(&self) -> anyhow::Result<MemoryReading> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        anyhow::ensure!(total > 0, "platform reported zero total memory");

        Ok(MemoryReading {
            total_bytes: total,
            available_bytes: sys.available_memory(),
        })
    }
}

impl DiskProvider for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "read_disk", path = %self.disk_path.display()))]
    fn read_disk(&self) -> anyhow::Result<DiskReading> {
        let disks = Disks::new_with_refreshed_list();
        let mounts: Vec<&Path> = disks.list().iter().map(|d| d.mount_point()).collect();
        let index = containing_mount(&mounts, &self.disk_path)
            .with_context(|| format!("no mounted volume contains {}", self.disk_path.display()))?;
        let disk = &disks.list()[index];

        let total = disk.total_space();
        anyhow::ensure!(
            total > 0,
            "volume {} reports zero capacity",
            disk.mount_point().display()
        );

        Ok(DiskReading {
            mount_point: disk.mount_point().to_path_buf(),
            total_bytes: total,
            free_bytes: disk.available_space(),
        })
    }
}
