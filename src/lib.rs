// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod error;
pub mod gpu_repo;
pub mod mcp;
pub mod models;
pub mod providers;
pub mod routes;
pub mod sysinfo_repo;
pub mod units;
pub mod version;
