//! # Agent Roster
//!
//! Flat, data-driven descriptors for every agent in the system: twelve
//! inner-team agents (three specialist triads plus one human-expert
//! liaison per team) and three outer coordination agents. No behavior
//! lives here beyond bookkeeping counters - deliverables are produced by
//! the team orchestrator, decisions by the human gate.

use crate::teams::TeamId;
use serde::Serialize;

/// Where an agent sits in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    /// Member of one of the three inner teams
    Inner(TeamId),
    /// Member of the outer coordination layer
    Outer,
}

/// Static description of a single agent
#[derive(Debug, Clone, Serialize)]
pub struct AgentSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub membership: Membership,
    pub role: &'static str,
    /// Static capability description shown in prompts and reports
    pub charter: &'static str,
}

/// Mutable per-agent performance counters.
///
/// Updated after each task, reset with the roster, never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentStats {
    pub tasks_completed: u32,
    pub interventions: u32,
    pub approvals: u32,
    pub average_response_time_ms: f64,
}

impl AgentStats {
    /// Record one completed task and fold its response time into the
    /// running average.
    pub fn record_task(&mut self, approved: bool, response_time_ms: f64) {
        let prior = self.average_response_time_ms * f64::from(self.tasks_completed);
        self.tasks_completed += 1;
        if approved {
            self.approvals += 1;
        }
        self.average_response_time_ms = (prior + response_time_ms) / f64::from(self.tasks_completed);
    }

    pub fn record_intervention(&mut self) {
        self.interventions += 1;
    }

    /// Fraction of completed tasks that were approved
    pub fn approval_rate(&self) -> f64 {
        if self.tasks_completed == 0 {
            0.0
        } else {
            f64::from(self.approvals) / f64::from(self.tasks_completed)
        }
    }
}

/// An agent descriptor paired with its performance counters
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    pub spec: AgentSpec,
    pub stats: AgentStats,
}

impl Agent {
    fn new(spec: AgentSpec) -> Self {
        Self {
            spec,
            stats: AgentStats::default(),
        }
    }
}

/// The full agent roster, created once at process start
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    agents: Vec<Agent>,
}

impl Roster {
    /// The standard roster: three specialist triads, one human-expert
    /// liaison per inner team, and the three outer coordination agents.
    pub fn standard() -> Self {
        let agents = standard_specs().into_iter().map(Agent::new).collect();
        Self { agents }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Agents belonging to one inner team, in roster order
    pub fn team_members(&self, team: TeamId) -> Vec<&Agent> {
        self.agents
            .iter()
            .filter(|a| a.spec.membership == Membership::Inner(team))
            .collect()
    }

    /// Names of one inner team's agents
    pub fn team_member_names(&self, team: TeamId) -> Vec<String> {
        self.team_members(team)
            .iter()
            .map(|a| a.spec.name.to_string())
            .collect()
    }

    /// Agents in the outer coordination layer
    pub fn outer_members(&self) -> Vec<&Agent> {
        self.agents
            .iter()
            .filter(|a| a.spec.membership == Membership::Outer)
            .collect()
    }

    /// Fold one task outcome into the counters of every member of a team
    pub fn record_team_task(&mut self, team: TeamId, approved: bool, response_time_ms: f64) {
        for agent in &mut self.agents {
            if agent.spec.membership == Membership::Inner(team) {
                agent.stats.record_task(approved, response_time_ms);
                agent.stats.record_intervention();
            }
        }
    }
}

fn standard_specs() -> Vec<AgentSpec> {
    use Membership::{Inner, Outer};
    use TeamId::*;

    vec![
        // === Research & Analysis ===
        AgentSpec {
            id: "research_specialist",
            name: "ResearchSpecialist",
            membership: Inner(ResearchAnalysis),
            role: "Research Specialist",
            charter: "Conducts market research and competitive analysis, identifies \
                      trends and insights, and presents evidence-based findings in \
                      structured, actionable formats.",
        },
        AgentSpec {
            id: "data_analyst",
            name: "DataAnalyst",
            membership: Inner(ResearchAnalysis),
            role: "Data Analyst",
            charter: "Performs statistical analysis and predictive modeling, \
                      validates research findings with data, and defines the key \
                      performance indicators a project is measured against.",
        },
        AgentSpec {
            id: "report_writer",
            name: "ReportWriter",
            membership: Inner(ResearchAnalysis),
            role: "Report Writer",
            charter: "Synthesizes research and analysis into executive summaries \
                      and recommendation reports written for decision-makers.",
        },
        AgentSpec {
            id: "research_expert",
            name: "Research_Analysis_HumanExpert",
            membership: Inner(ResearchAnalysis),
            role: "Research & Data Analysis Expert",
            charter: "Human liaison for the research team: validates findings, \
                      flags missing elements and approves the team deliverable.",
        },
        // === Creative & Design ===
        AgentSpec {
            id: "creative_strategist",
            name: "CreativeStrategist",
            membership: Inner(CreativeDesign),
            role: "Creative Strategist",
            charter: "Develops brand positioning, value propositions and messaging \
                      frameworks aligned with the project objectives.",
        },
        AgentSpec {
            id: "content_creator",
            name: "ContentCreator",
            membership: Inner(CreativeDesign),
            role: "Content Creator",
            charter: "Produces campaign copy, content calendars and brand-voice \
                      guidelines across channels.",
        },
        AgentSpec {
            id: "visual_designer",
            name: "VisualDesigner",
            membership: Inner(CreativeDesign),
            role: "Visual Designer",
            charter: "Creates the visual identity system, design assets and \
                      scalable component guidelines.",
        },
        AgentSpec {
            id: "creative_expert",
            name: "Creative_Design_HumanExpert",
            membership: Inner(CreativeDesign),
            role: "Creative Strategy & Design Expert",
            charter: "Human liaison for the creative team: reviews brand and \
                      design output for quality and consistency.",
        },
        // === Technical Implementation ===
        AgentSpec {
            id: "system_architect",
            name: "SystemArchitect",
            membership: Inner(TechnicalImplementation),
            role: "System Architect",
            charter: "Designs scalable, secure architectures and selects the \
                      technical stack and infrastructure for delivery.",
        },
        AgentSpec {
            id: "developer",
            name: "Developer",
            membership: Inner(TechnicalImplementation),
            role: "Developer",
            charter: "Plans development phases, implementation standards and the \
                      engineering deliverables for each milestone.",
        },
        AgentSpec {
            id: "qa_engineer",
            name: "QAEngineer",
            membership: Inner(TechnicalImplementation),
            role: "QA Engineer",
            charter: "Defines the testing strategy, quality gates and deployment \
                      verification procedures.",
        },
        AgentSpec {
            id: "technical_expert",
            name: "Technical_Implementation_HumanExpert",
            membership: Inner(TechnicalImplementation),
            role: "Technical Architecture & Development Expert",
            charter: "Human liaison for the technical team: validates architecture \
                      and implementation plans before they proceed.",
        },
        // === Outer coordination layer ===
        AgentSpec {
            id: "team_coordinator",
            name: "TeamCoordinator",
            membership: Outer,
            role: "Team Coordinator",
            charter: "Maps dependencies between team deliverables, plans their \
                      integration order and escalates conflicts to human \
                      oversight.",
        },
        AgentSpec {
            id: "resource_manager",
            name: "ResourceManager",
            membership: Outer,
            role: "Resource Manager",
            charter: "Analyzes resource requirements across teams, allocates \
                      budget and time within the project caps and escalates \
                      over-cap requests to human decision-makers.",
        },
        AgentSpec {
            id: "quality_assurance",
            name: "QualityAssurance",
            membership: Outer,
            role: "Quality Assurance",
            charter: "Scores each team deliverable against fixed quality criteria, \
                      flags issues below threshold and compiles the quality \
                      report.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_roster_composition() {
        let roster = Roster::standard();
        assert_eq!(roster.agents().len(), 15);
        assert_eq!(roster.outer_members().len(), 3);
        for team in TeamId::all() {
            assert_eq!(roster.team_members(team).len(), 4);
        }
    }

    #[test]
    fn test_stats_running_average() {
        let mut stats = AgentStats::default();
        stats.record_task(true, 100.0);
        stats.record_task(false, 300.0);
        assert_eq!(stats.tasks_completed, 2);
        assert_eq!(stats.approvals, 1);
        assert!((stats.approval_rate() - 0.5).abs() < f64::EPSILON);
        assert!((stats.average_response_time_ms - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_team_task_only_touches_members() {
        let mut roster = Roster::standard();
        roster.record_team_task(TeamId::ResearchAnalysis, true, 50.0);

        for agent in roster.team_members(TeamId::ResearchAnalysis) {
            assert_eq!(agent.stats.tasks_completed, 1);
        }
        for agent in roster.team_members(TeamId::CreativeDesign) {
            assert_eq!(agent.stats.tasks_completed, 0);
        }
        for agent in roster.outer_members() {
            assert_eq!(agent.stats.tasks_completed, 0);
        }
    }
}
