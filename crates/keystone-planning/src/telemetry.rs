//! Business counters for the planning engine.
//!
//! Recorded through the `metrics` facade; the host application decides
//! whether an exporter is installed. Set `OBSERVABILITY_ENABLED=false` to
//! skip recording entirely.

use std::sync::OnceLock;

use metrics::counter;

static ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_enabled() -> bool {
    *ENABLED.get_or_init(|| match std::env::var("OBSERVABILITY_ENABLED") {
        Ok(value) => !matches!(value.to_lowercase().as_str(), "false" | "0"),
        Err(_) => true,
    })
}

pub fn track_draft_generated(risk_signals: usize) {
    if is_enabled() {
        counter!("drafts_generated_total").increment(1);
        counter!("draft_risk_signals_total").increment(risk_signals as u64);
    }
}

pub fn track_draft_committed(lesson_plans: usize) {
    if is_enabled() {
        counter!("drafts_committed_total").increment(1);
        counter!("lesson_plans_scaffolded_total").increment(lesson_plans as u64);
    }
}

pub fn track_draft_discarded() {
    if is_enabled() {
        counter!("drafts_discarded_total").increment(1);
    }
}

/// `reason` is `"missing"` or `"mismatch"`.
pub fn track_confirmation_rejected(reason: &'static str) {
    if is_enabled() {
        counter!("draft_confirmations_rejected_total", "reason" => reason).increment(1);
    }
}
