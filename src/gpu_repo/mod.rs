// GPU enumeration: the provider seam, a null backend and backend selection

mod nvidia;

pub use nvidia::{DEFAULT_BINARY as DEFAULT_NVIDIA_SMI, NvidiaSmiProvider};

use crate::config::{GpuBackend, GpuConfig};

/// One device as reported by a vendor backend, in native units.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuReading {
    /// Enumeration index; snapshots list devices in this order.
    pub index: u32,
    pub name: String,
    pub memory_total_bytes: u64,
    pub memory_used_bytes: u64,
    pub memory_free_bytes: u64,
    /// Load in percent.
    pub utilization_percent: f64,
    pub temperature_c: Option<i64>,
}

/// Vendor-specific GPU backend. Errors are absorbed by the aggregator as an empty list.
pub trait GpuProvider: Send + Sync {
    fn backend(&self) -> &'static str;

    fn enumerate(&self) -> anyhow::Result<Vec<GpuReading>>;
}

/// Backend used when GPU reporting is disabled or no vendor library is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGpuProvider;

impl GpuProvider for NullGpuProvider {
    fn backend(&self) -> &'static str {
        "none"
    }

    fn enumerate(&self) -> anyhow::Result<Vec<GpuReading>> {
        Ok(Vec::new())
    }
}

pub fn from_config(config: &GpuConfig) -> Box<dyn GpuProvider> {
    match config.backend {
        GpuBackend::Auto | GpuBackend::Nvidia => {
            Box::new(NvidiaSmiProvider::new(config.nvidia_smi.clone()))
        }
        GpuBackend::None => Box::new(NullGpuProvider),
    }
}
