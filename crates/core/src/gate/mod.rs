//! # Human-Intervention Gate
//!
//! Synchronous approval checkpoints: a decision prompt goes out, the
//! workflow blocks until a response string comes back from the configured
//! [`InterventionHandler`], and the raw response is classified into a
//! structured [`InterventionResult`].
//!
//! Classification is deliberately permissive: anything that is not an
//! explicit rejection or modification counts as approval. That
//! default-approve policy comes from the interactive prompt design ("you
//! can also provide additional feedback") and is a known safety smell -
//! an unattended gate never blocks the workflow.

pub mod handlers;

pub use handlers::{ConsoleHandler, DemoHandler, ScriptedHandler};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What kind of decision is being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    /// Generic decision approval
    Approval,
    /// Validation of an inner team's deliverable
    OutputValidation,
    /// Approval of the cross-team integration plan
    Coordination,
    /// Approval of the resource allocation plan
    ResourceAllocation,
    /// Validation of the final consolidated deliverable
    FinalValidation,
    /// Review of proposed constraints
    ConstraintSetting,
    /// Request for additional context
    ContextAddition,
}

/// The prompt presented to the human (or the demo stand-in)
#[derive(Debug, Clone, Serialize)]
pub struct InterventionPrompt {
    pub kind: InterventionKind,
    /// Short label for the decision, e.g. "coordination_approval"
    pub label: String,
    /// Free-text context shown alongside the decision
    pub context: String,
}

/// Structured result of one human intervention
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionResult {
    pub approved: bool,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_decision: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl InterventionResult {
    pub fn approved(feedback: impl Into<String>) -> Self {
        Self {
            approved: true,
            feedback: feedback.into(),
            additional_context: None,
            constraints: Vec::new(),
            override_decision: None,
            timestamp: Utc::now(),
        }
    }

    pub fn rejected(feedback: impl Into<String>) -> Self {
        Self {
            approved: false,
            ..Self::approved(feedback)
        }
    }

    fn with_override(mut self, decision: impl Into<String>) -> Self {
        self.override_decision = Some(decision.into());
        self
    }

    fn with_constraints(mut self, constraints: Vec<String>) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Classify a raw response string into an approval decision.
///
/// Vocabulary (case-insensitive): `approve`/`yes`/`y` approve,
/// `reject`/`no`/`n` reject, a `modify` prefix rejects with the remainder
/// as the override decision. Everything else - including an empty string -
/// approves with the raw text kept as feedback.
pub fn classify(raw: &str) -> InterventionResult {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();

    match lower.as_str() {
        "approve" | "yes" | "y" => InterventionResult::approved(trimmed),
        "reject" | "no" | "n" => InterventionResult::rejected(trimmed),
        _ if lower.starts_with("modify") => {
            let rest = trimmed["modify".len()..]
                .trim_start_matches(':')
                .trim()
                .to_string();
            InterventionResult::rejected(trimmed).with_override(rest)
        }
        // Default-approve: treat anything else as feedback with implicit
        // approval.
        _ => InterventionResult::approved(trimmed),
    }
}

/// Source of raw response strings for the gate.
///
/// Implementations: [`DemoHandler`] (canned choices), [`ConsoleHandler`]
/// (interactive stdin), [`ScriptedHandler`] (queued responses for tests).
#[async_trait]
pub trait InterventionHandler: Send + Sync {
    /// Produce a raw response for the given prompt. Blocks the workflow
    /// until a response is available.
    async fn respond(&self, prompt: &InterventionPrompt) -> Result<String>;
}

/// One entry in the gate's append-only intervention history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionRecord {
    pub timestamp: DateTime<Utc>,
    pub kind: InterventionKind,
    pub label: String,
    pub response: String,
    pub approved: bool,
}

/// The gate itself: one handler, an enforced response timeout and the
/// intervention history.
pub struct Gate {
    handler: Box<dyn InterventionHandler>,
    timeout: Duration,
    history: Vec<InterventionRecord>,
}

impl Gate {
    pub fn new(handler: Box<dyn InterventionHandler>, timeout: Duration) -> Self {
        Self {
            handler,
            timeout,
            history: Vec::new(),
        }
    }

    /// Present a decision and block until it is resolved.
    ///
    /// Never fails: a handler error or an expired timeout resolves to the
    /// default-approve result, with the reason recorded as feedback.
    pub async fn request(
        &mut self,
        kind: InterventionKind,
        label: impl Into<String>,
        context: impl Into<String>,
    ) -> InterventionResult {
        let prompt = InterventionPrompt {
            kind,
            label: label.into(),
            context: context.into(),
        };

        let result = match tokio::time::timeout(self.timeout, self.handler.respond(&prompt)).await
        {
            Ok(Ok(raw)) => classify(&raw),
            Ok(Err(e)) => {
                tracing::warn!(label = %prompt.label, error = %e, "intervention handler failed");
                InterventionResult::approved(format!("no usable response ({e}); approved by default"))
            }
            Err(_) => {
                tracing::warn!(
                    label = %prompt.label,
                    timeout_secs = self.timeout.as_secs(),
                    "intervention timed out"
                );
                InterventionResult::approved("no response before timeout; approved by default")
            }
        };

        self.history.push(InterventionRecord {
            timestamp: result.timestamp,
            kind: prompt.kind,
            label: prompt.label,
            response: result.feedback.clone(),
            approved: result.approved,
        });

        result
    }

    /// Present a proposed constraint list for review.
    ///
    /// The response protocol mirrors the interactive prompt: `accept`
    /// keeps the proposal, `add:`/`remove:` edit it, `replace:` swaps it,
    /// and any other non-empty text is read as a `;`-separated list.
    pub async fn request_constraints(
        &mut self,
        proposed: &[String],
        context: impl Into<String>,
    ) -> InterventionResult {
        let listing = proposed
            .iter()
            .map(|c| format!("- {c}"))
            .collect::<Vec<_>>()
            .join("\n");
        let result = self
            .request(
                InterventionKind::ConstraintSetting,
                "constraint_setting",
                format!("{}\n\nProposed constraints:\n{listing}", context.into()),
            )
            .await;

        let raw = result.feedback.clone();
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();
        let constraints = if lower == "accept" || lower.is_empty() {
            proposed.to_vec()
        } else if lower.starts_with("add:") {
            let mut updated = proposed.to_vec();
            updated.push(trimmed["add:".len()..].trim().to_string());
            updated
        } else if lower.starts_with("remove:") {
            let target = trimmed["remove:".len()..].trim();
            proposed
                .iter()
                .filter(|c| !c.eq_ignore_ascii_case(target))
                .cloned()
                .collect()
        } else if lower.starts_with("replace:") {
            split_constraints(&trimmed["replace:".len()..])
        } else {
            split_constraints(trimmed)
        };

        InterventionResult::approved(raw).with_constraints(constraints)
    }

    /// Ask for additional context; `none` means nothing to add.
    pub async fn request_context(&mut self, current_context: impl Into<String>) -> InterventionResult {
        let result = self
            .request(
                InterventionKind::ContextAddition,
                "context_addition",
                current_context.into(),
            )
            .await;

        let raw = result.feedback.clone();
        if raw.trim().eq_ignore_ascii_case("none") || raw.trim().is_empty() {
            InterventionResult::approved(raw)
        } else {
            let mut out = InterventionResult::approved(raw.clone());
            out.additional_context = Some(raw);
            out
        }
    }

    /// Append-only record of every intervention this gate has resolved
    pub fn history(&self) -> &[InterventionRecord] {
        &self.history
    }

    pub fn intervention_count(&self) -> usize {
        self.history.len()
    }
}

fn split_constraints(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_approval_vocabulary() {
        assert!(classify("approve").approved);
        assert!(classify("YES").approved);
        assert!(classify("y").approved);
    }

    #[test]
    fn test_classify_rejection_vocabulary() {
        assert!(!classify("reject").approved);
        assert!(!classify("No").approved);
        assert!(!classify("n").approved);
    }

    #[test]
    fn test_classify_modify_carries_override() {
        let result = classify("modify: shorten timeline");
        assert!(!result.approved);
        assert_eq!(result.override_decision.as_deref(), Some("shorten timeline"));

        let no_colon = classify("Modify use a smaller budget");
        assert!(!no_colon.approved);
        assert_eq!(
            no_colon.override_decision.as_deref(),
            Some("use a smaller budget")
        );
    }

    #[test]
    fn test_classify_defaults_to_approval() {
        assert!(classify("").approved);
        assert!(classify("looks interesting, keep an eye on budget").approved);
    }

    #[tokio::test]
    async fn test_gate_records_history() {
        let handler = ScriptedHandler::new(vec!["approve".into(), "reject".into()]);
        let mut gate = Gate::new(Box::new(handler), Duration::from_secs(5));

        let first = gate
            .request(InterventionKind::Approval, "first", "ctx")
            .await;
        let second = gate
            .request(InterventionKind::Approval, "second", "ctx")
            .await;

        assert!(first.approved);
        assert!(!second.approved);
        assert_eq!(gate.intervention_count(), 2);
        assert_eq!(gate.history()[1].label, "second");
    }

    #[tokio::test]
    async fn test_gate_timeout_applies_default_approve() {
        struct Stalled;

        #[async_trait]
        impl InterventionHandler for Stalled {
            async fn respond(&self, _prompt: &InterventionPrompt) -> Result<String> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("never".into())
            }
        }

        let mut gate = Gate::new(Box::new(Stalled), Duration::from_millis(10));
        let result = gate
            .request(InterventionKind::Approval, "stalled", "ctx")
            .await;

        assert!(result.approved);
        assert!(result.feedback.contains("timeout"));
        assert_eq!(gate.intervention_count(), 1);
    }

    #[tokio::test]
    async fn test_context_addition() {
        let handler = ScriptedHandler::new(vec![
            "none".into(),
            "the launch window moved to October".into(),
        ]);
        let mut gate = Gate::new(Box::new(handler), Duration::from_secs(5));

        let nothing = gate.request_context("current plan").await;
        assert!(nothing.approved);
        assert!(nothing.additional_context.is_none());

        let added = gate.request_context("current plan").await;
        assert!(added.approved);
        assert_eq!(
            added.additional_context.as_deref(),
            Some("the launch window moved to October")
        );
    }

    #[tokio::test]
    async fn test_constraint_protocol() {
        let proposed = vec!["stay under budget".to_string(), "weekly reviews".to_string()];

        let handler = ScriptedHandler::new(vec![
            "accept".into(),
            "add: hire a contractor".into(),
            "replace: ship in Q3; freeze scope".into(),
        ]);
        let mut gate = Gate::new(Box::new(handler), Duration::from_secs(5));

        let accepted = gate.request_constraints(&proposed, "review").await;
        assert_eq!(accepted.constraints, proposed);

        let added = gate.request_constraints(&proposed, "review").await;
        assert_eq!(added.constraints.len(), 3);
        assert_eq!(added.constraints[2], "hire a contractor");

        let replaced = gate.request_constraints(&proposed, "review").await;
        assert_eq!(
            replaced.constraints,
            vec!["ship in Q3".to_string(), "freeze scope".to_string()]
        );
    }
}
