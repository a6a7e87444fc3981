// Build-time identity from Cargo.toml, shared by the MCP and HTTP surfaces

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// `"<name> <version>"`, served at `GET /` and logged at startup.
pub fn banner() -> String {
    format!("{} {}", NAME, VERSION)
}
