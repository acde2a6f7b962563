//! Simulated external data-source connectors.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::CredentiaError, parse_variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStatus {
    Healthy,
    Degraded,
    Down,
}

impl ConnectorStatus {
    pub const ALL: [ConnectorStatus; 3] = [
        ConnectorStatus::Healthy,
        ConnectorStatus::Degraded,
        ConnectorStatus::Down,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectorStatus::Healthy => "healthy",
            ConnectorStatus::Degraded => "degraded",
            ConnectorStatus::Down => "down",
        }
    }
}

impl fmt::Display for ConnectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorStatus {
    type Err = CredentiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&ConnectorStatus::ALL, ConnectorStatus::as_str, "connector status", s)
    }
}

/// A simulated registry or licensing-board integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ConnectorStatus,
    pub last_check_at: DateTime<Utc>,
    /// Round-trip latency of the last probe. Always 0 while `Down`.
    pub latency_ms: u32,
    pub uptime_pct: f64,
    pub notes: String,
}
