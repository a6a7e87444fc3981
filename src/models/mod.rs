// Snapshot records returned by get_sysinfo

mod gpu;
mod system;

pub use gpu::GpuInfo;
pub use system::{CpuInfo, DiskInfo, MemoryInfo, SystemInfo, SystemSnapshot};
