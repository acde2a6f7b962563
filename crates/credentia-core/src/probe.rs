//! Simulated connector health probes.
//!
//! A probe draws three independent samples: one deciding `degraded`, one
//! deciding `down`, and one for latency jitter. `down` wins when both fire.

use credentia_contracts::connector::ConnectorStatus;

use crate::traits::ProbeRng;

pub const DEGRADED_PROBABILITY: f64 = 0.3;
pub const DOWN_PROBABILITY: f64 = 0.08;

/// Latency never reported below this while reachable.
pub const LATENCY_FLOOR_MS: u32 = 120;
/// Jitter is drawn from `[0, JITTER_SPAN_MS)`.
pub const JITTER_SPAN_MS: u32 = 400;

/// Raw samples for one probe, each in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRoll {
    pub degraded: f64,
    pub down: f64,
    pub jitter: f64,
}

impl ProbeRoll {
    pub fn draw(rng: &mut dyn ProbeRng) -> Self {
        Self {
            degraded: rng.unit(),
            down: rng.unit(),
            jitter: rng.unit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: ConnectorStatus,
    pub latency_ms: u32,
    pub notes: &'static str,
}

/// Operator note for a probe that ended in `status`.
pub fn notes_for(status: ConnectorStatus) -> &'static str {
    match status {
        ConnectorStatus::Healthy => "Probe succeeded. Responses within SLA.",
        ConnectorStatus::Degraded => "Elevated latency or partial responses. Retries recommended.",
        ConnectorStatus::Down => "Probe failed. Source unreachable; falling back to cached results.",
    }
}

/// Resolve a probe roll against the connector's current latency.
pub fn resolve(current_latency_ms: u32, roll: ProbeRoll) -> ProbeOutcome {
    let status = if roll.down < DOWN_PROBABILITY {
        ConnectorStatus::Down
    } else if roll.degraded < DEGRADED_PROBABILITY {
        ConnectorStatus::Degraded
    } else {
        ConnectorStatus::Healthy
    };

    let latency_ms = match status {
        ConnectorStatus::Down => 0,
        _ => {
            let jitter = (roll.jitter.clamp(0.0, 1.0) * f64::from(JITTER_SPAN_MS)).floor() as i64;
            let jitter = jitter.min(i64::from(JITTER_SPAN_MS) - 1);
            let candidate = i64::from(current_latency_ms) - i64::from(LATENCY_FLOOR_MS) + jitter;
            u32::try_from(candidate.max(i64::from(LATENCY_FLOOR_MS))).unwrap_or(u32::MAX)
        }
    };

    ProbeOutcome {
        status,
        latency_ms,
        notes: notes_for(status),
    }
}
