//! # Resource Allocation
//!
//! Derives per-team resource requests from deliverable size, analyzes
//! the combined demand, and greedily allocates within the project caps
//! in priority order. Requests that would breach a cap are escalated to
//! a human decision, never silently dropped.

use crate::teams::TeamId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Request priority with its allocation weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Project-level resource ceilings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCaps {
    pub budget: u64,
    pub timeline_weeks: u32,
}

impl Default for ResourceCaps {
    fn default() -> Self {
        Self {
            budget: 500_000,
            timeline_weeks: 12,
        }
    }
}

/// A single team's resource request, derived from its output size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub team: TeamId,
    pub budget: u64,
    pub time_weeks: u32,
    pub priority: Priority,
    pub description: String,
    pub personnel: Vec<String>,
    pub justification: String,
}

fn base_budget(team: TeamId) -> u64 {
    match team {
        TeamId::ResearchAnalysis => 75_000,
        TeamId::CreativeDesign => 100_000,
        TeamId::TechnicalImplementation => 200_000,
    }
}

fn base_timeline(team: TeamId) -> u32 {
    match team {
        TeamId::ResearchAnalysis => 4,
        TeamId::CreativeDesign => 6,
        TeamId::TechnicalImplementation => 10,
    }
}

fn base_priority(team: TeamId) -> Priority {
    match team {
        TeamId::ResearchAnalysis => Priority::High,
        TeamId::CreativeDesign => Priority::Medium,
        TeamId::TechnicalImplementation => Priority::High,
    }
}

fn personnel_for(team: TeamId) -> Vec<String> {
    let names: &[&str] = match team {
        TeamId::ResearchAnalysis => &["Senior Researcher", "Data Analyst", "Research Coordinator"],
        TeamId::CreativeDesign => &["Creative Director", "Content Strategist", "Visual Designer"],
        TeamId::TechnicalImplementation => {
            &["Tech Lead", "Senior Developer", "QA Engineer", "DevOps Engineer"]
        }
    };
    names.iter().map(|n| n.to_string()).collect()
}

/// Output length is the complexity proxy, capped at a 2x scale factor.
pub fn complexity_factor(output_len: usize) -> f64 {
    (output_len as f64 / 1000.0).min(2.0)
}

/// Derive a request for one team from its deliverable size
pub fn derive_request(team: TeamId, output_len: usize) -> ResourceRequest {
    let factor = complexity_factor(output_len);
    ResourceRequest {
        team,
        budget: (base_budget(team) as f64 * factor) as u64,
        time_weeks: (base_timeline(team) as f64 * factor) as u32,
        priority: base_priority(team),
        description: format!(
            "Resources for {} implementation",
            team.display_name().to_lowercase()
        ),
        personnel: personnel_for(team),
        justification: format!("Based on output complexity and scope: {output_len} chars"),
    }
}

/// Combined view over all team requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceAnalysis {
    pub total_budget_requested: u64,
    pub total_time_requested: u32,
    pub personnel_conflicts: Vec<PersonnelConflict>,
}

/// The same person requested by more than one team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelConflict {
    pub person: String,
    pub teams: Vec<TeamId>,
}

/// Analyze total demand and personnel contention across requests
pub fn analyze_requests(requests: &[ResourceRequest]) -> ResourceAnalysis {
    let mut personnel: Vec<(String, Vec<TeamId>)> = Vec::new();
    for request in requests {
        for person in &request.personnel {
            match personnel.iter_mut().find(|(name, _)| name == person) {
                Some((_, teams)) => teams.push(request.team),
                None => personnel.push((person.clone(), vec![request.team])),
            }
        }
    }

    ResourceAnalysis {
        total_budget_requested: requests.iter().map(|r| r.budget).sum(),
        total_time_requested: requests.iter().map(|r| r.time_weeks).sum(),
        personnel_conflicts: personnel
            .into_iter()
            .filter(|(_, teams)| teams.len() > 1)
            .map(|(person, teams)| PersonnelConflict { person, teams })
            .collect(),
    }
}

/// Outcome of the greedy allocation pass for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    Approved,
    RequiresHumanDecision,
}

impl AllocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStatus::Approved => "APPROVED",
            AllocationStatus::RequiresHumanDecision => "REQUIRES_HUMAN_DECISION",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationLine {
    pub team: TeamId,
    pub priority: Priority,
    pub budget: u64,
    pub time_weeks: u32,
    pub status: AllocationStatus,
}

/// Greedy allocation in descending priority weight (stable on ties).
///
/// A request is approved only while both running totals stay within the
/// caps; otherwise it is marked for a human decision and does not count
/// against the totals.
pub fn allocate(requests: &[ResourceRequest], caps: &ResourceCaps) -> Vec<AllocationLine> {
    let mut ordered: Vec<&ResourceRequest> = requests.iter().collect();
    ordered.sort_by_key(|r| Reverse(r.priority.weight()));

    let mut allocated_budget: u64 = 0;
    let mut allocated_time: u32 = 0;
    let mut lines = Vec::with_capacity(ordered.len());

    for request in ordered {
        let budget_fits = allocated_budget + request.budget <= caps.budget;
        let time_fits = allocated_time + request.time_weeks <= caps.timeline_weeks;

        let status = if budget_fits && time_fits {
            allocated_budget += request.budget;
            allocated_time += request.time_weeks;
            AllocationStatus::Approved
        } else {
            AllocationStatus::RequiresHumanDecision
        };

        lines.push(AllocationLine {
            team: request.team,
            priority: request.priority,
            budget: request.budget,
            time_weeks: request.time_weeks,
            status,
        });
    }

    lines
}

/// Render the allocation plan document
pub fn render_plan(
    analysis: &ResourceAnalysis,
    lines: &[AllocationLine],
    caps: &ResourceCaps,
) -> String {
    let mut plan = format!(
        "\
RESOURCE ALLOCATION PLAN
Generated: {}

RESOURCE ANALYSIS:
- Total Budget Requested: ${}
- Available Budget: ${}
- Total Time Requested: {} weeks
- Available Timeline: {} weeks

PRIORITY-BASED ALLOCATION:
",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
        analysis.total_budget_requested,
        caps.budget,
        analysis.total_time_requested,
        caps.timeline_weeks,
    );

    for line in lines {
        plan.push_str(&format!(
            "\n{}:\n- Priority: {}\n- Budget Request: ${}\n- Time Request: {} weeks\n- Status: {}\n",
            line.team.as_str().to_uppercase(),
            line.priority.as_str(),
            line.budget,
            line.time_weeks,
            line.status.as_str(),
        ));
    }

    if analysis.personnel_conflicts.is_empty() {
        plan.push_str("\nCONFLICT RESOLUTION NEEDED:\n- none\n");
    } else {
        plan.push_str("\nCONFLICT RESOLUTION NEEDED:\n");
        for conflict in &analysis.personnel_conflicts {
            let teams = conflict
                .teams
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            plan.push_str(&format!("- {} requested by: {teams}\n", conflict.person));
        }
    }

    plan.push_str(
        "\nHUMAN DECISIONS REQUIRED:\n\
         - Approve high-priority allocations\n\
         - Resolve personnel conflicts\n\
         - Decide on over-budget requests\n\
         - Set final timeline constraints\n",
    );

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_factor_is_capped() {
        assert!((complexity_factor(800) - 0.8).abs() < 1e-9);
        assert!((complexity_factor(1200) - 1.2).abs() < 1e-9);
        assert!((complexity_factor(1500) - 1.5).abs() < 1e-9);
        assert!((complexity_factor(5000) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_derive_request_scales_base_rates() {
        let research = derive_request(TeamId::ResearchAnalysis, 800);
        assert_eq!(research.budget, 60_000);
        assert_eq!(research.time_weeks, 3);
        assert_eq!(research.priority, Priority::High);

        let creative = derive_request(TeamId::CreativeDesign, 1200);
        assert_eq!(creative.budget, 120_000);
        assert_eq!(creative.time_weeks, 7);

        let technical = derive_request(TeamId::TechnicalImplementation, 1500);
        assert_eq!(technical.budget, 300_000);
        assert_eq!(technical.time_weeks, 15);
        assert_eq!(technical.personnel.len(), 4);
    }

    #[test]
    fn test_allocation_never_exceeds_caps() {
        let caps = ResourceCaps {
            budget: 500_000,
            timeline_weeks: 12,
        };
        let requests = vec![
            derive_request(TeamId::ResearchAnalysis, 800),
            derive_request(TeamId::CreativeDesign, 1200),
            derive_request(TeamId::TechnicalImplementation, 1500),
        ];

        let lines = allocate(&requests, &caps);

        let (mut budget, mut time) = (0u64, 0u32);
        for line in &lines {
            if line.status == AllocationStatus::Approved {
                budget += line.budget;
                time += line.time_weeks;
            }
        }
        assert!(budget <= caps.budget);
        assert!(time <= caps.timeline_weeks);

        // Priority order: the two high-priority teams come first
        // (stable), technical breaches the timeline and is escalated,
        // creative still fits afterwards.
        assert_eq!(lines[0].team, TeamId::ResearchAnalysis);
        assert_eq!(lines[0].status, AllocationStatus::Approved);
        assert_eq!(lines[1].team, TeamId::TechnicalImplementation);
        assert_eq!(lines[1].status, AllocationStatus::RequiresHumanDecision);
        assert_eq!(lines[2].team, TeamId::CreativeDesign);
        assert_eq!(lines[2].status, AllocationStatus::Approved);
    }

    #[test]
    fn test_allocation_orders_high_medium_low() {
        let caps = ResourceCaps {
            budget: 1_000_000,
            timeline_weeks: 100,
        };
        let mut requests = vec![
            derive_request(TeamId::ResearchAnalysis, 1000),
            derive_request(TeamId::CreativeDesign, 1000),
            derive_request(TeamId::TechnicalImplementation, 1000),
        ];
        requests[0].priority = Priority::High;
        requests[1].priority = Priority::Medium;
        requests[2].priority = Priority::Low;

        let lines = allocate(&requests, &caps);
        assert_eq!(lines[0].priority, Priority::High);
        assert_eq!(lines[1].priority, Priority::Medium);
        assert_eq!(lines[2].priority, Priority::Low);
    }

    #[test]
    fn test_escalated_requests_are_never_dropped() {
        let caps = ResourceCaps {
            budget: 1,
            timeline_weeks: 1,
        };
        let requests = vec![
            derive_request(TeamId::ResearchAnalysis, 1000),
            derive_request(TeamId::CreativeDesign, 1000),
        ];

        let lines = allocate(&requests, &caps);
        assert_eq!(lines.len(), 2);
        assert!(lines
            .iter()
            .all(|l| l.status == AllocationStatus::RequiresHumanDecision));
    }

    #[test]
    fn test_personnel_conflicts_detected() {
        let mut first = derive_request(TeamId::ResearchAnalysis, 1000);
        let mut second = derive_request(TeamId::CreativeDesign, 1000);
        first.personnel = vec!["Shared Lead".to_string()];
        second.personnel = vec!["Shared Lead".to_string(), "Designer".to_string()];

        let analysis = analyze_requests(&[first, second]);
        assert_eq!(analysis.personnel_conflicts.len(), 1);
        assert_eq!(analysis.personnel_conflicts[0].person, "Shared Lead");
        assert_eq!(analysis.personnel_conflicts[0].teams.len(), 2);
    }
}
