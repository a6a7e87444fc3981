use serde::Deserialize;
use std::path::PathBuf;

use crate::gpu_repo::DEFAULT_NVIDIA_SMI;
use crate::sysinfo_repo::{DEFAULT_CPU_SAMPLE, default_disk_path};

/// get_sysinfo blocks for the CPU sampling window, so it stays sub-second.
const MAX_CPU_SAMPLE_MS: u64 = 999;

/// Every section is optional; an absent config file means all defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sampling: SamplingConfig,
    pub disk: DiskConfig,
    pub gpu: GpuConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// MCP over stdin/stdout.
    #[default]
    Stdio,
    /// Plain JSON over HTTP.
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub transport: Transport,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            host: "127.0.0.1".into(),
            port: 8085,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    pub cpu_sample_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            cpu_sample_ms: DEFAULT_CPU_SAMPLE.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiskConfig {
    /// Volume to report; `None` means the OS root volume.
    pub path: Option<PathBuf>,
}

impl DiskConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_disk_path)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuBackend {
    /// Try NVIDIA; any failure reports no GPUs.
    #[default]
    Auto,
    Nvidia,
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GpuConfig {
    pub backend: GpuBackend,
    /// Path or name of the `nvidia-smi` binary.
    pub nvidia_smi: PathBuf,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            backend: GpuBackend::Auto,
            nvidia_smi: PathBuf::from(DEFAULT_NVIDIA_SMI),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` when it is set, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(std::env::var("CONFIG_FILE").ok().as_deref())
    }

    /// Only an explicitly named file is read; nothing is picked up from the working directory.
    pub fn load_from(config_file: Option<&str>) -> anyhow::Result<Self> {
        match config_file.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => Self::load_from_path(path),
            None => {
                tracing::debug!("CONFIG_FILE not set, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            self.sampling.cpu_sample_ms > 0 && self.sampling.cpu_sample_ms <= MAX_CPU_SAMPLE_MS,
            "sampling.cpu_sample_ms must be between 1 and {}, got {}",
            MAX_CPU_SAMPLE_MS,
            self.sampling.cpu_sample_ms
        );
        if let Some(path) = &self.disk.path {
            anyhow::ensure!(
                path.is_absolute(),
                "disk.path must be absolute, got {}",
                path.display()
            );
        }
        anyhow::ensure!(
            !self.gpu.nvidia_smi.as_os_str().is_empty(),
            "gpu.nvidia_smi must be non-empty"
        );
        Ok(())
    }
}
