//! # Inner Teams
//!
//! Team identity, deliverables and the orchestrator that runs each
//! specialized team against a requirements brief.

pub mod orchestrator;
pub mod templates;

pub use orchestrator::{ExecutionRecord, InnerTeamOrchestrator, TeamPerformanceMetrics};
pub use templates::{DeliverableGenerator, TemplateGenerator};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the three specialized inner teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamId {
    /// Market research, data analysis and reporting
    ResearchAnalysis,
    /// Brand strategy, content and visual design
    CreativeDesign,
    /// Architecture, development and QA planning
    TechnicalImplementation,
}

impl TeamId {
    /// All inner teams in their fixed execution order
    pub fn all() -> [TeamId; 3] {
        [
            TeamId::ResearchAnalysis,
            TeamId::CreativeDesign,
            TeamId::TechnicalImplementation,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamId::ResearchAnalysis => "research_analysis",
            TeamId::CreativeDesign => "creative_design",
            TeamId::TechnicalImplementation => "technical_implementation",
        }
    }

    /// Human-readable name for reports and prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            TeamId::ResearchAnalysis => "Research & Analysis",
            TeamId::CreativeDesign => "Creative & Design",
            TeamId::TechnicalImplementation => "Technical Implementation",
        }
    }
}

/// The deliverable produced by one inner team for one project cycle.
///
/// Immutable after creation; owned by the orchestrator's execution history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResult {
    pub team: TeamId,
    /// Generated deliverable text (or an in-band error marker on failure)
    pub deliverable: String,
    /// Names of the agents involved in producing the deliverable
    pub agents: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_serialization() {
        let json = serde_json::to_string(&TeamId::CreativeDesign).unwrap();
        assert_eq!(json, "\"creative_design\"");
    }

    #[test]
    fn test_team_order_is_fixed() {
        let teams = TeamId::all();
        assert_eq!(teams[0], TeamId::ResearchAnalysis);
        assert_eq!(teams[2], TeamId::TechnicalImplementation);
    }
}
