// Shared test helpers: providers with fixed readings
#![allow(dead_code)]

use std::path::PathBuf;
use sysinfo_server::aggregator::SnapshotAggregator;
use sysinfo_server::providers::*;

pub const GIB: u64 = 1024 * 1024 * 1024;
pub const MIB: u64 = 1024 * 1024;

/// A provider that always returns the same reading, or always fails with the given message.
pub struct Fixed<T>(pub Result<T, &'static str>);

impl<T: Clone> Fixed<T> {
    pub fn ok(value: T) -> Self {
        Self(Ok(value))
    }

    pub fn err(msg: &'static str) -> Self {
        Self(Err(msg))
    }

    fn get(&self) -> anyhow::Result<T> {
        self.0.clone().map_err(anyhow::Error::msg)
    }
}

impl OsIdentityProvider for Fixed<OsIdentity> {
    fn identity(&self) -> anyhow::Result<OsIdentity> {
        self.get()
    }
}

impl CpuProvider for Fixed<CpuReading> {
    fn read_cpu(&self) -> anyhow::Result<CpuReading> {
        self.get()
    }
}

impl MemoryProvider for Fixed<MemoryReading> {
    fn read_memory(&self) -> anyhow::Result<MemoryReading> {
        self.get()
    }
}

impl DiskProvider for Fixed<DiskReading> {
    fn read_disk(&self) -> anyhow::Result<DiskReading> {
        self.get()
    }
}

impl GpuProvider for Fixed<Vec<GpuReading>> {
    fn backend(&self) -> &'static str {
        "fixed"
    }

    fn enumerate(&self) -> anyhow::Result<Vec<GpuReading>> {
        self.get()
    }
}

pub fn identity() -> OsIdentity {
    OsIdentity {
        system_name: "Linux".into(),
        node_name: "devbox".into(),
        os_release: "6.8.0-45-generic".into(),
        os_version: "#45-Ubuntu SMP PREEMPT_DYNAMIC".into(),
        machine_type: "x86_64".into(),
        processor: "GenuineIntel".into(),
    }
}

pub fn cpu() -> CpuReading {
    CpuReading {
        brand: Some("Intel(R) Core(TM) i7-9750H CPU @ 2.60GHz".into()),
        physical_cores: Some(6),
        logical_cores: 12,
        frequency_mhz: 2592.0,
        usage_percent: 17.456,
    }
}

pub fn memory(total_bytes: u64, available_bytes: u64) -> MemoryReading {
    MemoryReading {
        total_bytes,
        available_bytes,
    }
}

pub fn disk(total_bytes: u64, free_bytes: u64) -> DiskReading {
    DiskReading {
        mount_point: PathBuf::from("/"),
        total_bytes,
        free_bytes,
    }
}

pub fn gpu(index: u32, name: &str, temperature_c: Option<i64>) -> GpuReading {
    GpuReading {
        index,
        name: name.into(),
        memory_total_bytes: 8192 * MIB,
        memory_used_bytes: 2048 * MIB,
        memory_free_bytes: 6144 * MIB,
        utilization_percent: 33.0,
        temperature_c,
    }
}

/// Healthy host: 32 GiB RAM with 18.5 GiB available, 512 GiB disk with 200 GiB free, no GPU.
pub struct FakeHost {
    pub os: Fixed<OsIdentity>,
    pub cpu: Fixed<CpuReading>,
    pub memory: Fixed<MemoryReading>,
    pub disk: Fixed<DiskReading>,
    pub gpu: Fixed<Vec<GpuReading>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            os: Fixed::ok(identity()),
            cpu: Fixed::ok(cpu()),
            memory: Fixed::ok(memory(32 * GIB, 18 * GIB + GIB / 2)),
            disk: Fixed::ok(disk(512 * GIB, 200 * GIB)),
            gpu: Fixed::ok(vec![]),
        }
    }
}

impl FakeHost {
    pub fn into_aggregator(self) -> SnapshotAggregator {
        SnapshotAggregator::new(self.os, self.cpu, self.memory, self.disk, self.gpu)
    }
}
