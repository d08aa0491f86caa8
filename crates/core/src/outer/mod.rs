//! # Outer Coordination
//!
//! The cross-team layer above the inner teams: integration planning,
//! resource allocation, quality review and recommendation synthesis, run
//! as four ordered, non-retryable steps. Integration and allocation each
//! pass through one human gate; quality review and recommendations do
//! not (the interactive design earmarks quality decisions for human
//! validation, but the review step itself has no checkpoint - kept
//! as-is for flow compatibility).
//!
//! The steps share only read access to the team results, so no step's
//! outcome can block a later step; coordination always produces a
//! result.

pub mod integration;
pub mod quality;
pub mod recommend;
pub mod resources;

pub use integration::{DependencyRelation, analyze_dependencies, integration_order};
pub use quality::{HeuristicScorer, QualityAssessment, QualityScorer, PASS_THRESHOLD};
pub use resources::{AllocationLine, AllocationStatus, Priority, ResourceCaps, ResourceRequest};

use crate::gate::{Gate, InterventionKind};
use crate::scenario::ProjectRequirements;
use crate::teams::{TeamId, TeamResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One human decision taken during coordination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinationDecision {
    pub kind: String,
    pub approved: bool,
    pub feedback: String,
}

/// Artifacts of the integration-planning step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationPlan {
    pub dependencies: DependencyRelation,
    pub order: Vec<TeamId>,
    pub plan_text: String,
}

/// Artifacts of the resource-allocation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePlan {
    pub requests: Vec<ResourceRequest>,
    pub analysis: resources::ResourceAnalysis,
    pub allocations: Vec<AllocationLine>,
    pub plan_text: String,
}

/// Artifacts of the quality-review step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReview {
    pub assessments: Vec<QualityAssessment>,
    pub report_text: String,
}

/// Everything one coordination pass produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinationResult {
    pub timestamp: DateTime<Utc>,
    pub steps_completed: Vec<String>,
    pub decisions: Vec<CoordinationDecision>,
    pub integration: Option<IntegrationPlan>,
    pub resources: Option<ResourcePlan>,
    pub quality: Option<QualityReview>,
    pub recommendations: Vec<String>,
}

/// Per-team quality standing tracked across coordinations
#[derive(Debug, Clone, Serialize)]
pub struct TeamQualityStatus {
    pub team: TeamId,
    pub score: f64,
    pub passed: bool,
    pub last_assessed: DateTime<Utc>,
}

/// Project-level bookkeeping owned by the outer coordinator
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectStatus {
    pub active_teams: Vec<TeamId>,
    pub completed_teams: Vec<TeamId>,
    pub quality_status: Vec<TeamQualityStatus>,
    pub resources_allocated: bool,
}

/// Coordinates the inner teams at the project level
pub struct OuterCoordinator {
    scorer: Box<dyn QualityScorer>,
    history: Vec<CoordinationResult>,
    status: ProjectStatus,
}

impl Default for OuterCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl OuterCoordinator {
    pub fn new() -> Self {
        Self::with_scorer(Box::new(HeuristicScorer))
    }

    /// Use a custom quality scorer instead of the heuristic default
    pub fn with_scorer(scorer: Box<dyn QualityScorer>) -> Self {
        Self {
            scorer,
            history: Vec::new(),
            status: ProjectStatus::default(),
        }
    }

    /// Run the four coordination steps over the team deliverables.
    ///
    /// Steps 1 and 2 each block on one human gate; steps 3 and 4 run
    /// straight through. Always returns a result.
    pub async fn coordinate(
        &mut self,
        gate: &mut Gate,
        team_results: &[TeamResult],
        requirements: &ProjectRequirements,
    ) -> CoordinationResult {
        tracing::info!(teams = team_results.len(), "coordinating project execution");

        let mut result = CoordinationResult {
            timestamp: Utc::now(),
            steps_completed: Vec::new(),
            decisions: Vec::new(),
            integration: None,
            resources: None,
            quality: None,
            recommendations: Vec::new(),
        };

        let outputs: Vec<(TeamId, &str)> = team_results
            .iter()
            .map(|r| (r.team, r.deliverable.as_str()))
            .collect();

        // Step 1: team coordination and integration planning
        let dependencies = analyze_dependencies(&outputs);
        let order = integration_order(&dependencies);
        let plan_text = integration::render_plan(&dependencies, &order);

        let decision = gate
            .request(
                InterventionKind::Coordination,
                "coordination_approval",
                format!(
                    "{}\n\nProposed Coordination Plan:\n{plan_text}",
                    summarize_outputs(team_results)
                ),
            )
            .await;
        result.decisions.push(CoordinationDecision {
            kind: "coordination_approval".to_string(),
            approved: decision.approved,
            feedback: decision.feedback,
        });
        result.integration = Some(IntegrationPlan {
            dependencies,
            order,
            plan_text,
        });
        result.steps_completed.push("Integration plan created".to_string());

        // Step 2: resource allocation and management
        let requests: Vec<ResourceRequest> = team_results
            .iter()
            .map(|r| resources::derive_request(r.team, r.deliverable.len()))
            .collect();
        let analysis = resources::analyze_requests(&requests);
        let allocations = resources::allocate(&requests, &requirements.caps);
        let plan_text = resources::render_plan(&analysis, &allocations, &requirements.caps);

        let decision = gate
            .request(
                InterventionKind::ResourceAllocation,
                "resource_allocation",
                format!("Resource Requests:\n{}", summarize_requests(&requests)),
            )
            .await;
        result.decisions.push(CoordinationDecision {
            kind: "resource_allocation".to_string(),
            approved: decision.approved,
            feedback: decision.feedback,
        });
        result.resources = Some(ResourcePlan {
            requests,
            analysis,
            allocations,
            plan_text,
        });
        result
            .steps_completed
            .push("Resource allocation completed".to_string());

        // Step 3: quality assurance
        let assessments: Vec<QualityAssessment> = team_results
            .iter()
            .map(|r| quality::assess(self.scorer.as_ref(), r.team, &r.deliverable))
            .collect();
        let report_text = quality::render_report(&assessments);
        result.quality = Some(QualityReview {
            assessments,
            report_text,
        });
        result
            .steps_completed
            .push("Quality assessment completed".to_string());

        // Step 4: final recommendations
        result.recommendations = recommend::synthesize(
            &outputs,
            result
                .resources
                .as_ref()
                .map(|r| r.requests.as_slice())
                .unwrap_or_default(),
            &requirements.caps,
            result
                .quality
                .as_ref()
                .map(|q| q.assessments.as_slice())
                .unwrap_or_default(),
            requirements.is_crisis(),
        );
        result
            .steps_completed
            .push("Final recommendations generated".to_string());

        self.update_status(team_results, &result);
        self.history.push(result.clone());

        result
    }

    fn update_status(&mut self, team_results: &[TeamResult], result: &CoordinationResult) {
        self.status.active_teams = team_results.iter().map(|r| r.team).collect();
        for record in team_results {
            if !self.status.completed_teams.contains(&record.team) {
                self.status.completed_teams.push(record.team);
            }
        }
        self.status.resources_allocated = result.resources.is_some();

        if let Some(review) = &result.quality {
            for assessment in &review.assessments {
                let entry = TeamQualityStatus {
                    team: assessment.team,
                    score: assessment.overall_score,
                    passed: assessment.passed(),
                    last_assessed: assessment.timestamp,
                };
                match self
                    .status
                    .quality_status
                    .iter_mut()
                    .find(|s| s.team == assessment.team)
                {
                    Some(existing) => *existing = entry,
                    None => self.status.quality_status.push(entry),
                }
            }
        }
    }

    pub fn status(&self) -> &ProjectStatus {
        &self.status
    }

    pub fn history(&self) -> &[CoordinationResult] {
        &self.history
    }

    /// Mean of the tracked per-team quality scores
    pub fn overall_quality_score(&self) -> f64 {
        if self.status.quality_status.is_empty() {
            return 0.0;
        }
        self.status.quality_status.iter().map(|s| s.score).sum::<f64>()
            / self.status.quality_status.len() as f64
    }

    /// Render the project coordination dashboard
    pub fn dashboard(&self) -> String {
        let mut out = format!(
            "\
PROJECT COORDINATION DASHBOARD
Generated: {}

PROJECT OVERVIEW:
- Active Teams: {}
- Completed Teams: {}
- Overall Quality Score: {:.1}/100
- Resource Status: {}

TEAM STATUS:
",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            self.status.active_teams.len(),
            self.status.completed_teams.len(),
            self.overall_quality_score(),
            if self.status.resources_allocated {
                "ALLOCATED"
            } else {
                "PENDING"
            },
        );

        for status in &self.status.quality_status {
            out.push_str(&format!(
                "- {}: {} ({:.1}/100)\n",
                status.team.display_name(),
                if status.passed {
                    "PASS"
                } else {
                    "NEEDS_IMPROVEMENT"
                },
                status.score,
            ));
        }

        out.push_str(&format!(
            "\nCOORDINATION ACTIVITIES:\n\
             - Total Coordination Sessions: {}\n\
             - Last Coordination: {}\n\n\
             NEXT ACTIONS:\n\
             - Monitor team progress and quality metrics\n\
             - Review resource utilization and adjust as needed\n\
             - Prepare for final integration and delivery\n",
            self.history.len(),
            self.history
                .last()
                .map(|c| c.timestamp.to_rfc3339())
                .unwrap_or_else(|| "None".to_string()),
        ));

        out
    }

    /// Reset coordination bookkeeping for a fresh project
    pub fn reset(&mut self) {
        self.history.clear();
        self.status = ProjectStatus::default();
    }
}

fn summarize_outputs(team_results: &[TeamResult]) -> String {
    let mut summary = String::from("Team Outputs Summary:\n");
    for record in team_results {
        let preview: String = record.deliverable.chars().take(200).collect();
        summary.push_str(&format!("{}: {preview}...\n", record.team.as_str()));
    }
    summary
}

fn summarize_requests(requests: &[ResourceRequest]) -> String {
    requests
        .iter()
        .map(|r| {
            format!(
                "{}: {} (priority: {})",
                r.team.as_str(),
                r.description,
                r.priority.as_str()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
