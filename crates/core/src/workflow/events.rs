//! # Workflow Events
//!
//! Event types emitted while a project cycle runs, for streaming to a
//! UI or log consumer.

use crate::teams::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of workflow event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowEventKind {
    /// Project cycle started
    WorkflowStarted,
    /// An inner team started working
    TeamStarted,
    /// An inner team produced its deliverable
    TeamCompleted,
    /// An inner team degraded to an error deliverable
    TeamFailed,
    /// A human gate is blocking the workflow
    InterventionRequired,
    /// The human gate resolved
    InterventionResolved,
    /// Outer coordination started
    CoordinationStarted,
    /// Outer coordination produced its result
    CoordinationCompleted,
    /// Project cycle completed
    WorkflowCompleted,
    /// Project cycle failed
    WorkflowFailed,
}

/// An event in the workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEvent {
    /// Unique event ID
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: WorkflowEventKind,
    /// Component that produced this event
    pub source: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub team: Option<TeamId>,
}

impl WorkflowEvent {
    pub fn new(kind: WorkflowEventKind, source: &str) -> Self {
        Self {
            id: uuid_v4(),
            timestamp: Utc::now(),
            kind,
            source: source.to_string(),
            data: None,
            team: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_team(mut self, team: TeamId) -> Self {
        self.team = Some(team);
        self
    }
}

/// Generate a simple UUID v4
fn uuid_v4() -> String {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos();
    format!("{:x}-{:x}", nanos, rand_u32())
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

    #[test]
    fn test_event_builder() {
        let event = WorkflowEvent::new(WorkflowEventKind::TeamStarted, "coordinator")
            .with_team(TeamId::ResearchAnalysis);

        assert_eq!(event.source, "coordinator");
        assert_eq!(event.team, Some(TeamId::ResearchAnalysis));
        assert!(!event.id.is_empty());
    }
}
