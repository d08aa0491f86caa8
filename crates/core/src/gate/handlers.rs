//! # Intervention Handlers
//!
//! Response sources for the gate: canned demo choices, an interactive
//! console prompt, and a scripted queue for tests.

use super::{InterventionHandler, InterventionPrompt};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Canned approval responses used when no human is attached.
///
/// The gate classifies these as implicit approvals, so a demo run always
/// flows end to end.
const DEMO_RESPONSES: [&str; 4] = [
    "Approved - excellent analysis and recommendations",
    "Approved with minor suggestions for improvement",
    "Approved - meets all requirements",
    "Approved - innovative approach, well executed",
];

/// Picks a pseudo-random canned response for each prompt
#[derive(Debug, Default)]
pub struct DemoHandler;

#[async_trait]
impl InterventionHandler for DemoHandler {
    async fn respond(&self, prompt: &InterventionPrompt) -> Result<String> {
        let choice = DEMO_RESPONSES[rand_u32() as usize % DEMO_RESPONSES.len()];
        tracing::info!(label = %prompt.label, response = choice, "demo intervention");
        Ok(choice.to_string())
    }
}

/// Interactive handler that prints the prompt and reads one line from
/// stdin. The blocking read runs on the blocking thread pool so the
/// runtime stays responsive (the gate's timeout still applies).
#[derive(Debug)]
pub struct ConsoleHandler {
    role: String,
    team_context: String,
}

impl ConsoleHandler {
    pub fn new(role: impl Into<String>, team_context: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            team_context: team_context.into(),
        }
    }
}

#[async_trait]
impl InterventionHandler for ConsoleHandler {
    async fn respond(&self, prompt: &InterventionPrompt) -> Result<String> {
        let banner = "=".repeat(60);
        println!(
            "\n{banner}\nHUMAN INTERVENTION REQUIRED\n{banner}\n\n\
             Role: {}\nTeam Context: {}\nTimestamp: {}\n\n\
             Decision: {}\n\n{}\n\n{banner}\nPlease provide your response:",
            self.role,
            self.team_context,
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            prompt.label,
            prompt.context,
        );

        let line = tokio::task::spawn_blocking(|| {
            let mut buf = String::new();
            std::io::stdin().read_line(&mut buf).map(|_| buf)
        })
        .await
        .context("stdin reader task failed")?
        .context("failed to read response from stdin")?;

        Ok(line.trim_end().to_string())
    }
}

/// Queued responses for deterministic tests; an empty queue yields an
/// empty string, which the gate classifies as a default approval.
#[derive(Debug, Default)]
pub struct ScriptedHandler {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedHandler {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl InterventionHandler for ScriptedHandler {
    async fn respond(&self, _prompt: &InterventionPrompt) -> Result<String> {
        let mut queue = self
            .responses
            .lock()
            .map_err(|e| anyhow::anyhow!("response queue poisoned: {e}"))?;
        Ok(queue.pop_front().unwrap_or_default())
    }
}

/// Simple random number (not cryptographic)
fn rand_u32() -> u32 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};
    RandomState::new().build_hasher().finish() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{classify, InterventionKind};

    fn prompt() -> InterventionPrompt {
        InterventionPrompt {
            kind: InterventionKind::Approval,
            label: "test".into(),
            context: "ctx".into(),
        }
    }

    #[tokio::test]
    async fn test_demo_handler_always_approves() {
        let handler = DemoHandler;
        for _ in 0..8 {
            let raw = handler.respond(&prompt()).await.unwrap();
            assert!(classify(&raw).approved);
        }
    }

    #[tokio::test]
    async fn test_scripted_handler_drains_then_defaults() {
        let handler = ScriptedHandler::new(vec!["reject".into()]);
        assert_eq!(handler.respond(&prompt()).await.unwrap(), "reject");
        // Exhausted queue falls back to the empty string.
        assert_eq!(handler.respond(&prompt()).await.unwrap(), "");
    }
}
