//! Records of applied store mutations.
//!
//! The directory appends one `StoreAction` per mutation that actually changed
//! state. Lookups that miss (unknown ids) produce no action.

use serde::{Deserialize, Serialize};

use crate::{
    alert::AlertStatus, connector::ConnectorStatus, policy::PolicyRulePatch,
    provider::VerificationStatus,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreAction {
    /// `mock_approve` moved the provider to `verified`.
    ProviderApproved {
        provider_id: String,
        previous_status: VerificationStatus,
        risk_before: u8,
        risk_after: u8,
    },

    /// `mock_request_more_info` moved the provider to `pending`.
    MoreInfoRequested {
        provider_id: String,
        previous_status: VerificationStatus,
        risk_before: u8,
        risk_after: u8,
    },

    AlertStatusChanged {
        alert_id: String,
        from: AlertStatus,
        to: AlertStatus,
    },

    ConnectorPinged {
        connector_id: String,
        status: ConnectorStatus,
        latency_ms: u32,
    },

    PolicyRuleUpdated { patch: PolicyRulePatch },
}

impl StoreAction {
    /// Short machine name, matching the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreAction::ProviderApproved { .. } => "provider_approved",
            StoreAction::MoreInfoRequested { .. } => "more_info_requested",
            StoreAction::AlertStatusChanged { .. } => "alert_status_changed",
            StoreAction::ConnectorPinged { .. } => "connector_pinged",
            StoreAction::PolicyRuleUpdated { .. } => "policy_rule_updated",
        }
    }

    /// The id of the record this action touched.
    pub fn subject_id(&self) -> &str {
        match self {
            StoreAction::ProviderApproved { provider_id, .. }
            | StoreAction::MoreInfoRequested { provider_id, .. } => provider_id,
            StoreAction::AlertStatusChanged { alert_id, .. } => alert_id,
            StoreAction::ConnectorPinged { connector_id, .. } => connector_id,
            StoreAction::PolicyRuleUpdated { patch } => &patch.id,
        }
    }
}
