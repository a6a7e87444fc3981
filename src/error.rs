// Snapshot error taxonomy

use std::fmt;

/// Mandatory sub-domains of a snapshot. GPU is optional and never fails a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    System,
    Cpu,
    Memory,
    Disk,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::System => "system",
            Domain::Cpu => "cpu",
            Domain::Memory => "memory",
            Domain::Disk => "disk",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// A mandatory provider failed; no partial snapshot is produced.
    #[error("{domain} metrics unavailable: {source:#}")]
    Provider {
        domain: Domain,
        #[source]
        source: anyhow::Error,
    },

    #[error("snapshot task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SnapshotError {
    pub fn provider(domain: Domain, source: anyhow::Error) -> Self {
        Self::Provider { domain, source }
    }

    /// The failed sub-domain, if the error came from a provider.
    pub fn domain(&self) -> Option<Domain> {
        match self {
            Self::Provider { domain, .. } => Some(*domain),
            Self::Task(_) => None,
        }
    }
}
