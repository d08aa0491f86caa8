//! # Top-Level Coordinator
//!
//! Drives one full project cycle: inner-team execution with per-team
//! validation gates, outer coordination, final deliverable assembly,
//! performance metrics and the cumulative system state. Any error inside
//! the cycle is caught here, recorded on the result, and the partial
//! result is still returned and kept in project history.

use super::events::{WorkflowEvent, WorkflowEventKind};
use super::pipeline::Pipeline;
use crate::agents::Roster;
use crate::config::MosaicConfig;
use crate::gate::{Gate, InterventionKind, InterventionRecord};
use crate::outer::{CoordinationResult, OuterCoordinator, QualityScorer};
use crate::scenario::{self, ProjectRequirements, ScenarioId};
use crate::teams::{DeliverableGenerator, InnerTeamOrchestrator, TeamId, TeamResult};
use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::mpsc;

/// Performance figures for one completed cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub execution_time_seconds: f64,
    pub teams_executed: usize,
    pub human_interventions: usize,
    pub deliverable_length: usize,
    /// Per-team overall quality scores
    pub quality_scores: BTreeMap<String, f64>,
    pub average_time_per_team: f64,
    pub average_quality_score: f64,
    /// Interventions per executed team
    pub intervention_rate: f64,
    /// Deliverable characters produced per second of wall-clock time
    pub deliverable_efficiency: f64,
}

/// Everything one project cycle produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub scenario: ScenarioId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub requirements: ProjectRequirements,
    pub team_results: Vec<TeamResult>,
    pub coordination: Option<CoordinationResult>,
    pub final_deliverable: String,
    pub interventions: Vec<InterventionRecord>,
    pub metrics: Option<PerformanceMetrics>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Cumulative counters across every project this coordinator has run
#[derive(Debug, Clone, Serialize)]
pub struct SystemState {
    pub initialized_at: DateTime<Utc>,
    pub total_projects: u64,
    pub successful_projects: u64,
    pub total_execution_time_secs: f64,
    pub total_teams_executed: u64,
    pub total_interventions: u64,
    pub average_execution_time_secs: f64,
    pub average_teams_per_project: f64,
    pub average_interventions_per_project: f64,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            initialized_at: Utc::now(),
            total_projects: 0,
            successful_projects: 0,
            total_execution_time_secs: 0.0,
            total_teams_executed: 0,
            total_interventions: 0,
            average_execution_time_secs: 0.0,
            average_teams_per_project: 0.0,
            average_interventions_per_project: 0.0,
        }
    }
}

impl SystemState {
    fn update(&mut self, result: &WorkflowResult) {
        self.total_projects += 1;
        if result.success {
            self.successful_projects += 1;
        }

        let duration = result
            .ended_at
            .map(|end| (end - result.started_at).num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0);
        self.total_execution_time_secs += duration;
        self.total_teams_executed += result.team_results.len() as u64;
        self.total_interventions += result.interventions.len() as u64;

        let projects = self.total_projects as f64;
        self.average_execution_time_secs = self.total_execution_time_secs / projects;
        self.average_teams_per_project = self.total_teams_executed as f64 / projects;
        self.average_interventions_per_project = self.total_interventions as f64 / projects;
    }

    pub fn success_rate(&self) -> f64 {
        self.successful_projects as f64 / (self.total_projects.max(1)) as f64
    }
}

/// The top-level coordinator owning the whole agent hierarchy
pub struct MosaicCoordinator {
    config: MosaicConfig,
    roster: Roster,
    inner: InnerTeamOrchestrator,
    outer: OuterCoordinator,
    gate: Gate,
    event_tx: Option<mpsc::Sender<WorkflowEvent>>,
    events: Vec<WorkflowEvent>,
    pipeline: Pipeline,
    system_state: SystemState,
    project_history: Vec<WorkflowResult>,
}

impl MosaicCoordinator {
    pub fn new(config: MosaicConfig, gate: Gate) -> Self {
        Self {
            config,
            roster: Roster::standard(),
            inner: InnerTeamOrchestrator::new(),
            outer: OuterCoordinator::new(),
            gate,
            event_tx: None,
            events: Vec::new(),
            pipeline: Pipeline::new(),
            system_state: SystemState::default(),
            project_history: Vec::new(),
        }
    }

    /// Stream events to a channel while running
    pub fn with_event_channel(mut self, tx: mpsc::Sender<WorkflowEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Replace the default deliverable generator
    pub fn with_generator(mut self, generator: Box<dyn DeliverableGenerator>) -> Self {
        self.inner = InnerTeamOrchestrator::with_generator(generator);
        self
    }

    /// Replace the default quality scorer
    pub fn with_scorer(mut self, scorer: Box<dyn QualityScorer>) -> Self {
        self.outer = OuterCoordinator::with_scorer(scorer);
        self
    }

    async fn emit(&mut self, event: WorkflowEvent) {
        self.events.push(event.clone());
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Run one complete project cycle for a scenario.
    ///
    /// Never fails outright: an error anywhere in the cycle is recorded
    /// on the result, the workflow is marked unsuccessful, and whatever
    /// was produced before the failure is returned and kept in history.
    #[tracing::instrument(skip(self), fields(scenario = scenario_id.as_str()))]
    pub async fn run_project(&mut self, scenario_id: ScenarioId) -> WorkflowResult {
        let requirements = scenario::requirements(scenario_id, self.config.default_caps.clone());
        let gate_start = self.gate.intervention_count();
        self.pipeline = Pipeline::new();

        self.emit(WorkflowEvent::new(
            WorkflowEventKind::WorkflowStarted,
            "coordinator",
        ))
        .await;

        let mut result = WorkflowResult {
            scenario: scenario_id,
            started_at: Utc::now(),
            ended_at: None,
            requirements: requirements.clone(),
            team_results: Vec::new(),
            coordination: None,
            final_deliverable: String::new(),
            interventions: Vec::new(),
            metrics: None,
            success: false,
            error: None,
        };

        match self.execute_phases(&requirements, gate_start, &mut result).await {
            Ok(()) => {
                result.success = true;
                self.emit(WorkflowEvent::new(
                    WorkflowEventKind::WorkflowCompleted,
                    "coordinator",
                ))
                .await;
            }
            Err(e) => {
                tracing::error!(error = %e, "project workflow failed");
                result.error = Some(e.to_string());
                self.pipeline.fail();
                self.emit(
                    WorkflowEvent::new(WorkflowEventKind::WorkflowFailed, "coordinator")
                        .with_data(serde_json::json!({ "error": e.to_string() })),
                )
                .await;
            }
        }

        result.ended_at = Some(Utc::now());
        result.interventions = self.gate.history()[gate_start..].to_vec();

        self.system_state.update(&result);
        self.project_history.push(result.clone());

        result
    }

    async fn execute_phases(
        &mut self,
        requirements: &ProjectRequirements,
        gate_start: usize,
        result: &mut WorkflowResult,
    ) -> Result<()> {
        // Phase 1: inner team execution, each followed by its validation
        // gate
        let teams: Vec<TeamId> = TeamId::all()
            .into_iter()
            .take(self.config.max_inner_teams)
            .collect();

        for team in teams {
            self.emit(WorkflowEvent::new(WorkflowEventKind::TeamStarted, "coordinator").with_team(team))
                .await;

            let mut agents = self.roster.team_member_names(team);
            agents.truncate(self.config.max_agents_per_team);
            let brief = scenario::team_brief(team, requirements);

            let started = std::time::Instant::now();
            let team_result = self.inner.execute_team(team, &brief, &agents);

            let kind = if team_result.success {
                WorkflowEventKind::TeamCompleted
            } else {
                WorkflowEventKind::TeamFailed
            };
            self.emit(WorkflowEvent::new(kind, "coordinator").with_team(team))
                .await;

            self.emit(
                WorkflowEvent::new(WorkflowEventKind::InterventionRequired, "coordinator")
                    .with_team(team),
            )
            .await;
            let preview: String = team_result.deliverable.chars().take(400).collect();
            let validation = self
                .gate
                .request(
                    InterventionKind::OutputValidation,
                    format!("{}_output_validation", team.as_str()),
                    format!(
                        "Team: {}\nAgents involved: {}\n\nOutput to validate:\n{preview}",
                        team.display_name(),
                        agents.join(", "),
                    ),
                )
                .await;
            self.emit(
                WorkflowEvent::new(WorkflowEventKind::InterventionResolved, "coordinator")
                    .with_team(team),
            )
            .await;

            if !validation.approved {
                tracing::warn!(
                    team = team.as_str(),
                    feedback = %validation.feedback,
                    "team output requires revision"
                );
            }

            self.roster.record_team_task(
                team,
                validation.approved && team_result.success,
                started.elapsed().as_secs_f64() * 1000.0,
            );
            result.team_results.push(team_result);
        }
        self.pipeline.advance();

        // Phase 2: outer coordination
        ensure!(
            !result.team_results.is_empty(),
            "coordination requires at least one team deliverable"
        );
        self.emit(WorkflowEvent::new(
            WorkflowEventKind::CoordinationStarted,
            "coordinator",
        ))
        .await;
        let coordination = self
            .outer
            .coordinate(&mut self.gate, &result.team_results, requirements)
            .await;
        self.emit(WorkflowEvent::new(
            WorkflowEventKind::CoordinationCompleted,
            "coordinator",
        ))
        .await;
        self.pipeline.advance();

        // Phase 3: final deliverable assembly plus the closing validation
        // gate
        let interventions_so_far = self.gate.intervention_count() - gate_start;
        let deliverable = build_final_deliverable(
            result.scenario,
            requirements,
            &result.team_results,
            &coordination,
            interventions_so_far,
        );
        result.coordination = Some(coordination);

        let preview: String = deliverable.chars().take(600).collect();
        let validation = self
            .gate
            .request(
                InterventionKind::FinalValidation,
                "final_output_validation",
                format!("Consolidated Output (preview):\n{preview}"),
            )
            .await;
        if !validation.approved {
            tracing::warn!(feedback = %validation.feedback, "final output requires revision");
        }
        result.final_deliverable = deliverable;
        self.pipeline.advance();

        // Phase 4: performance analysis
        result.metrics = Some(compute_metrics(
            result,
            self.gate.intervention_count() - gate_start,
        ));
        self.pipeline.advance();

        Ok(())
    }

    /// Phase the most recent run finished in
    pub fn phase(&self) -> super::pipeline::WorkflowPhase {
        self.pipeline.phase
    }

    pub fn system_state(&self) -> &SystemState {
        &self.system_state
    }

    pub fn project_history(&self) -> &[WorkflowResult] {
        &self.project_history
    }

    pub fn events(&self) -> &[WorkflowEvent] {
        &self.events
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn outer(&self) -> &OuterCoordinator {
        &self.outer
    }

    pub fn inner(&self) -> &InnerTeamOrchestrator {
        &self.inner
    }

    /// Render the system-wide status report
    pub fn system_report(&self) -> String {
        let state = &self.system_state;
        let inner_metrics = self.inner.metrics();

        format!(
            "\
SYSTEM REPORT
Generated: {now}

SYSTEM OVERVIEW:
- Total Projects Executed: {total}
- Successful Projects: {successful}
- Success Rate: {rate:.1}%
- Initialized: {init}

PERFORMANCE METRICS:
- Average Execution Time: {avg_time:.1} seconds
- Average Teams per Project: {avg_teams:.1}
- Average Human Interventions: {avg_interventions:.1}

INNER TEAM PERFORMANCE:
- Total Team Executions: {executions}
- Successful Executions: {successes}
- Average Result Length: {avg_len:.0} characters

OUTER COORDINATION STATUS:
- Completed Teams: {completed}
- Overall Quality Score: {quality:.1}/100

RECENT ACTIVITY:
- Last Project: {last}
- Project History: {history} projects
",
            now = Utc::now().format("%Y-%m-%d %H:%M:%S"),
            total = state.total_projects,
            successful = state.successful_projects,
            rate = state.success_rate() * 100.0,
            init = state.initialized_at.to_rfc3339(),
            avg_time = state.average_execution_time_secs,
            avg_teams = state.average_teams_per_project,
            avg_interventions = state.average_interventions_per_project,
            executions = inner_metrics.total_executions,
            successes = inner_metrics.successful_executions,
            avg_len = inner_metrics.average_result_length,
            completed = self.outer.status().completed_teams.len(),
            quality = self.outer.overall_quality_score(),
            last = self
                .project_history
                .last()
                .map(|r| r.scenario.as_str())
                .unwrap_or("None"),
            history = self.project_history.len(),
        )
    }
}

/// Assemble the final consolidated deliverable
fn build_final_deliverable(
    scenario_id: ScenarioId,
    requirements: &ProjectRequirements,
    team_results: &[TeamResult],
    coordination: &CoordinationResult,
    intervention_count: usize,
) -> String {
    let border = "=".repeat(80);
    let rule = "-".repeat(50);
    let meta = scenario::scenario(scenario_id);

    let mut out = format!(
        "\
{border}
FINAL PROJECT DELIVERABLE
{border}

Project: {name}
Generated: {now}

EXECUTIVE SUMMARY:
This deliverable integrates the specialized inner-team outputs with
outer-team coordination and human oversight into one consolidated plan.

PROJECT OVERVIEW:
{overview}

INTEGRATED TEAM CONTRIBUTIONS:
",
        name = meta.name,
        now = Utc::now().format("%Y-%m-%d %H:%M:%S"),
        overview = serde_json::to_string_pretty(&requirements.details)
            .unwrap_or_else(|_| requirements.details.to_string()),
    );

    for record in team_results {
        let excerpt: String = record.deliverable.chars().take(1000).collect();
        let ellipsis = if record.deliverable.chars().count() > 1000 {
            "..."
        } else {
            ""
        };
        out.push_str(&format!(
            "\n{title} TEAM CONTRIBUTION:\n{rule}\n{excerpt}{ellipsis}\n",
            title = record.team.display_name().to_uppercase(),
        ));
    }

    out.push_str(&format!("\nCOORDINATION AND INTEGRATION INSIGHTS:\n{rule}\n"));
    if let Some(integration) = &coordination.integration {
        let excerpt: String = integration.plan_text.chars().take(500).collect();
        out.push_str(&format!("Integration Strategy:\n{excerpt}...\n"));
    }

    if !coordination.recommendations.is_empty() {
        out.push_str("\nStrategic Recommendations:\n");
        for (i, rec) in coordination.recommendations.iter().take(10).enumerate() {
            out.push_str(&format!("{}. {rec}\n", i + 1));
        }
    }

    if let Some(review) = &coordination.quality {
        out.push_str(&format!("\nQUALITY ASSESSMENT SUMMARY:\n{rule}\n"));
        for assessment in &review.assessments {
            let status = if assessment.passed() {
                "APPROVED"
            } else {
                "NEEDS REVIEW"
            };
            out.push_str(&format!(
                "{}: {:.1}/100 {status}\n",
                assessment.team.display_name(),
                assessment.overall_score,
            ));
        }
    }

    out.push_str(&format!(
        "\nHUMAN OVERSIGHT SUMMARY:
{rule}
Strategic human intervention points covered quality validation at each
team level, coordination approval, resource allocation and final
deliverable validation.

Total human interventions: {intervention_count}

NEXT STEPS AND IMPLEMENTATION:
{rule}
1. Review and approve final deliverable
2. Initiate implementation based on team recommendations
3. Establish monitoring and feedback mechanisms
4. Plan regular review and optimization cycles
5. Document lessons learned for future projects

{border}
END OF DELIVERABLE
{border}
",
    ));

    out
}

fn compute_metrics(result: &WorkflowResult, interventions: usize) -> PerformanceMetrics {
    let duration = (Utc::now() - result.started_at).num_milliseconds() as f64 / 1000.0;
    let teams = result.team_results.len();

    let quality_scores: BTreeMap<String, f64> = result
        .coordination
        .as_ref()
        .and_then(|c| c.quality.as_ref())
        .map(|q| {
            q.assessments
                .iter()
                .map(|a| (a.team.as_str().to_string(), a.overall_score))
                .collect()
        })
        .unwrap_or_default();

    let average_quality_score = if quality_scores.is_empty() {
        0.0
    } else {
        quality_scores.values().sum::<f64>() / quality_scores.len() as f64
    };

    PerformanceMetrics {
        execution_time_seconds: duration,
        teams_executed: teams,
        human_interventions: interventions,
        deliverable_length: result.final_deliverable.len(),
        quality_scores,
        average_time_per_team: if teams > 0 { duration / teams as f64 } else { 0.0 },
        average_quality_score,
        intervention_rate: if teams > 0 {
            interventions as f64 / teams as f64
        } else {
            0.0
        },
        deliverable_efficiency: if duration > 0.0 {
            result.final_deliverable.len() as f64 / duration
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{DemoHandler, ScriptedHandler};
    use std::time::Duration;

    fn demo_coordinator() -> MosaicCoordinator {
        let gate = Gate::new(Box::new(DemoHandler), Duration::from_secs(5));
        MosaicCoordinator::new(MosaicConfig::default(), gate)
    }

    #[tokio::test]
    async fn test_full_cycle_produces_complete_result() {
        let mut coordinator = demo_coordinator();
        let result = coordinator.run_project(ScenarioId::ProductLaunch).await;

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.team_results.len(), 3);
        assert!(result.team_results.iter().all(|r| r.success));
        assert!(result.coordination.is_some());
        assert!(result.final_deliverable.contains("FINAL PROJECT DELIVERABLE"));

        // 3 team validations + 2 coordination gates + 1 final validation
        assert_eq!(result.interventions.len(), 6);
        assert_eq!(coordinator.phase(), crate::workflow::WorkflowPhase::Complete);

        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.teams_executed, 3);
        assert_eq!(metrics.quality_scores.len(), 3);
        assert!((metrics.intervention_rate - 2.0).abs() < f64::EPSILON);

        let state = coordinator.system_state();
        assert_eq!(state.total_projects, 1);
        assert_eq!(state.successful_projects, 1);
        assert!((state.average_teams_per_project - 3.0).abs() < f64::EPSILON);
        assert_eq!(coordinator.project_history().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_cycle_still_returns_partial_result() {
        let gate = Gate::new(Box::new(DemoHandler), Duration::from_secs(5));
        let config = MosaicConfig {
            max_inner_teams: 0,
            ..MosaicConfig::default()
        };
        let mut coordinator = MosaicCoordinator::new(config, gate);

        let result = coordinator.run_project(ScenarioId::ProductLaunch).await;

        assert!(!result.success);
        assert!(result.error.is_some());
        assert_eq!(coordinator.phase(), crate::workflow::WorkflowPhase::Failed);
        assert!(result.team_results.is_empty());
        assert!(result.coordination.is_none());
        assert!(result.metrics.is_none());

        // Counted in system state and history despite the failure
        let state = coordinator.system_state();
        assert_eq!(state.total_projects, 1);
        assert_eq!(state.successful_projects, 0);
        assert_eq!(coordinator.project_history().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_validations_do_not_stop_the_workflow() {
        // Every gate rejects; the run still completes with all
        // artifacts, mirroring the advisory nature of validation
        // feedback.
        let rejections = vec!["reject".to_string(); 6];
        let gate = Gate::new(
            Box::new(ScriptedHandler::new(rejections)),
            Duration::from_secs(5),
        );
        let mut coordinator = MosaicCoordinator::new(MosaicConfig::default(), gate);

        let result = coordinator.run_project(ScenarioId::ProductLaunch).await;

        assert!(result.success);
        assert_eq!(result.interventions.len(), 6);
        assert!(result.interventions.iter().all(|i| !i.approved));

        // Rejected validations count against agent approval rates
        for agent in coordinator.roster().team_members(TeamId::ResearchAnalysis) {
            assert_eq!(agent.stats.tasks_completed, 1);
            assert_eq!(agent.stats.approvals, 0);
        }
    }

    #[tokio::test]
    async fn test_crisis_scenario_switches_recommendations() {
        let mut coordinator = demo_coordinator();
        let result = coordinator.run_project(ScenarioId::CrisisManagement).await;

        let recommendations = &result.coordination.unwrap().recommendations;
        assert!(recommendations.iter().any(|r| r.contains("rapid response")));
    }

    #[tokio::test]
    async fn test_system_state_running_averages_across_projects() {
        let mut coordinator = demo_coordinator();
        coordinator.run_project(ScenarioId::ProductLaunch).await;
        coordinator.run_project(ScenarioId::CrisisManagement).await;

        let state = coordinator.system_state();
        assert_eq!(state.total_projects, 2);
        assert_eq!(state.total_teams_executed, 6);
        assert!((state.average_teams_per_project - 3.0).abs() < f64::EPSILON);
        assert!((state.average_interventions_per_project - 6.0).abs() < f64::EPSILON);
        assert!((state.success_rate() - 1.0).abs() < f64::EPSILON);

        let report = coordinator.system_report();
        assert!(report.contains("Total Projects Executed: 2"));
        assert!(report.contains("crisis_management"));
    }

    #[tokio::test]
    async fn test_events_are_streamed() {
        let (tx, mut rx) = mpsc::channel(256);
        let gate = Gate::new(Box::new(DemoHandler), Duration::from_secs(5));
        let mut coordinator =
            MosaicCoordinator::new(MosaicConfig::default(), gate).with_event_channel(tx);

        coordinator.run_project(ScenarioId::ProductLaunch).await;
        drop(coordinator);

        let mut kinds = Vec::new();
        while let Some(event) = rx.recv().await {
            kinds.push(event.kind);
        }
        assert_eq!(kinds.first(), Some(&WorkflowEventKind::WorkflowStarted));
        assert!(kinds.contains(&WorkflowEventKind::CoordinationCompleted));
        assert_eq!(kinds.last(), Some(&WorkflowEventKind::WorkflowCompleted));
    }
}
