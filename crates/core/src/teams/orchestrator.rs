//! # Inner Team Orchestrator
//!
//! Runs one inner team against its requirements brief and keeps the
//! append-only execution history. A generator failure is degraded into an
//! in-band error deliverable - team execution never propagates an error
//! to the caller.

use super::templates::{DeliverableGenerator, TemplateGenerator};
use super::{TeamId, TeamResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry in the execution history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub timestamp: DateTime<Utc>,
    pub team: TeamId,
    pub agent_count: usize,
    pub output_len: usize,
    pub success: bool,
}

/// Aggregated execution metrics across all teams
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamPerformanceMetrics {
    pub total_executions: usize,
    pub successful_executions: usize,
    pub average_result_length: f64,
    pub team_breakdown: BTreeMap<String, TeamBreakdown>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamBreakdown {
    pub executions: usize,
    pub success_rate: f64,
    pub average_agents: f64,
}

/// Orchestrates inner-team execution
pub struct InnerTeamOrchestrator {
    generator: Box<dyn DeliverableGenerator>,
    history: Vec<ExecutionRecord>,
}

impl Default for InnerTeamOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl InnerTeamOrchestrator {
    pub fn new() -> Self {
        Self::with_generator(Box::new(TemplateGenerator))
    }

    pub fn with_generator(generator: Box<dyn DeliverableGenerator>) -> Self {
        Self {
            generator,
            history: Vec::new(),
        }
    }

    /// Execute one team's workflow against a requirements brief.
    ///
    /// Always returns a result: a generator error is logged and converted
    /// into an error-text deliverable with `success = false`.
    pub fn execute_team(&mut self, team: TeamId, brief: &str, agents: &[String]) -> TeamResult {
        let (deliverable, success) = match self.generator.generate(team, brief, agents) {
            Ok(text) => (text, true),
            Err(e) => {
                tracing::error!(team = team.as_str(), error = %e, "team workflow failed");
                (
                    format!("ERROR in {} execution: {e}", team.display_name()),
                    false,
                )
            }
        };

        self.history.push(ExecutionRecord {
            timestamp: Utc::now(),
            team,
            agent_count: agents.len(),
            output_len: deliverable.len(),
            success,
        });

        TeamResult {
            team,
            deliverable,
            agents: agents.to_vec(),
            timestamp: Utc::now(),
            success,
        }
    }

    pub fn history(&self) -> &[ExecutionRecord] {
        &self.history
    }

    pub fn reset_history(&mut self) {
        self.history.clear();
    }

    /// Derive performance metrics from the execution history
    pub fn metrics(&self) -> TeamPerformanceMetrics {
        let mut metrics = TeamPerformanceMetrics {
            total_executions: self.history.len(),
            successful_executions: self.history.iter().filter(|r| r.success).count(),
            ..Default::default()
        };

        if self.history.is_empty() {
            return metrics;
        }

        metrics.average_result_length = self
            .history
            .iter()
            .map(|r| r.output_len as f64)
            .sum::<f64>()
            / self.history.len() as f64;

        for record in &self.history {
            let entry = metrics
                .team_breakdown
                .entry(record.team.as_str().to_string())
                .or_default();
            entry.executions += 1;
            entry.average_agents += record.agent_count as f64;
            if record.success {
                entry.success_rate += 1.0;
            }
        }
        for entry in metrics.team_breakdown.values_mut() {
            entry.success_rate /= entry.executions as f64;
            entry.average_agents /= entry.executions as f64;
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct FailingGenerator;

    impl DeliverableGenerator for FailingGenerator {
        fn generate(&self, _team: TeamId, _brief: &str, _agents: &[String]) -> anyhow::Result<String> {
            Err(anyhow!("template store unavailable"))
        }
    }

    #[test]
    fn test_execute_team_returns_nonempty_success() {
        let mut orch = InnerTeamOrchestrator::new();
        let agents = vec!["ResearchSpecialist".to_string(), "DataAnalyst".to_string()];
        let result = orch.execute_team(TeamId::ResearchAnalysis, "launch a product", &agents);

        assert!(result.success);
        assert!(!result.deliverable.is_empty());
        assert_eq!(result.agents.len(), 2);
        assert_eq!(orch.history().len(), 1);
        assert!(orch.history()[0].success);
    }

    #[test]
    fn test_generator_failure_degrades_to_error_deliverable() {
        let mut orch = InnerTeamOrchestrator::with_generator(Box::new(FailingGenerator));
        let result = orch.execute_team(TeamId::CreativeDesign, "brief", &[]);

        assert!(!result.success);
        assert!(result.deliverable.contains("ERROR"));
        assert!(result.deliverable.contains("template store unavailable"));
        assert!(!orch.history()[0].success);
    }

    #[test]
    fn test_metrics_aggregate_history() {
        let mut orch = InnerTeamOrchestrator::new();
        let agents = vec!["A".to_string(), "B".to_string()];
        for team in TeamId::all() {
            orch.execute_team(team, "brief", &agents);
        }
        orch.execute_team(TeamId::ResearchAnalysis, "brief", &agents);

        let metrics = orch.metrics();
        assert_eq!(metrics.total_executions, 4);
        assert_eq!(metrics.successful_executions, 4);
        assert!(metrics.average_result_length > 0.0);

        let research = &metrics.team_breakdown["research_analysis"];
        assert_eq!(research.executions, 2);
        assert!((research.success_rate - 1.0).abs() < f64::EPSILON);
        assert!((research.average_agents - 2.0).abs() < f64::EPSILON);

        orch.reset_history();
        assert!(orch.history().is_empty());
        assert_eq!(orch.metrics().total_executions, 0);
    }
}
