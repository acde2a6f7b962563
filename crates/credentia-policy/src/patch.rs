//! Partial-patch merge for policy rules.

use credentia_contracts::{
    policy::{PolicyRule, PolicyRulePatch},
    provider::MAX_RISK_SCORE,
};

/// Return a copy of `rule` with every field present in `patch` overridden.
///
/// The patch's `id` selects the rule and is never copied onto it. A
/// `risk_max` above 100 is clamped to 100.
pub fn apply_patch(rule: &PolicyRule, patch: &PolicyRulePatch) -> PolicyRule {
    let mut next = rule.clone();
    if let Some(name) = &patch.name {
        next.name = name.clone();
    }
    if let Some(enabled) = patch.enabled {
        next.enabled = enabled;
    }
    if let Some(auto_approve) = patch.auto_approve {
        next.auto_approve = auto_approve;
    }
    if let Some(risk_max) = patch.risk_max {
        next.risk_max = risk_max.min(MAX_RISK_SCORE);
    }
    if let Some(sources) = &patch.required_sources {
        next.required_sources = sources.clone();
    }
    if let Some(manual) = patch.if_any_fails_require_manual_review {
        next.if_any_fails_require_manual_review = manual;
    }
    next
}

/// Parse operator input for a risk ceiling.
///
/// Accepts any finite number, floors it and clamps it into `0..=100`.
/// Blank, non-numeric or non-finite input yields `None`, meaning "leave the
/// rule unchanged".
pub fn parse_risk_max(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let n: f64 = trimmed.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    let clamped = n.floor().clamp(0.0, f64::from(MAX_RISK_SCORE));
    Some(clamped as u8)
}
