//! # Scenarios
//!
//! The canned business scenarios a run can exercise, their requirement
//! payloads, and the per-team requirement briefs rendered from them.

use crate::outer::resources::ResourceCaps;
use crate::teams::TeamId;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    ProductLaunch,
    CrisisManagement,
    Interactive,
}

impl ScenarioId {
    /// Parse a scenario identifier; unknown identifiers fall back to the
    /// interactive default.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "product_launch" => ScenarioId::ProductLaunch,
            "crisis_management" => ScenarioId::CrisisManagement,
            _ => ScenarioId::Interactive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::ProductLaunch => "product_launch",
            ScenarioId::CrisisManagement => "crisis_management",
            ScenarioId::Interactive => "interactive",
        }
    }

    pub fn all() -> [ScenarioId; 3] {
        [
            ScenarioId::ProductLaunch,
            ScenarioId::CrisisManagement,
            ScenarioId::Interactive,
        ]
    }
}

/// Static metadata about a scenario
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: &'static str,
    pub description: &'static str,
    pub expected_duration_secs: u64,
    pub complexity: &'static str,
    pub expected_interventions: u32,
}

pub fn scenario(id: ScenarioId) -> Scenario {
    match id {
        ScenarioId::ProductLaunch => Scenario {
            id,
            name: "Product Launch Planning",
            description: "Plan comprehensive launch strategy for a new product",
            expected_duration_secs: 1800,
            complexity: "medium",
            expected_interventions: 8,
        },
        ScenarioId::CrisisManagement => Scenario {
            id,
            name: "Crisis Management Response",
            description: "Develop rapid response to a business crisis",
            expected_duration_secs: 1200,
            complexity: "high",
            expected_interventions: 12,
        },
        ScenarioId::Interactive => Scenario {
            id,
            name: "Interactive Demonstration",
            description: "Custom interactive demonstration",
            expected_duration_secs: 2400,
            complexity: "variable",
            expected_interventions: 10,
        },
    }
}

/// The project requirements a run starts from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRequirements {
    pub objective: String,
    /// Scenario-specific payload (product facts, incident facts, ...)
    pub details: serde_json::Value,
    /// Resource ceilings the allocation step works within
    pub caps: ResourceCaps,
}

impl ProjectRequirements {
    /// Crisis-shaped requirements switch the timeline recommendation to
    /// rapid-response mode.
    pub fn is_crisis(&self) -> bool {
        let haystack = format!("{} {}", self.objective, self.details).to_lowercase();
        haystack.contains("crisis") || haystack.contains("incident")
    }
}

/// Build the requirement payload for a scenario
pub fn requirements(id: ScenarioId, caps: ResourceCaps) -> ProjectRequirements {
    match id {
        ScenarioId::ProductLaunch => ProjectRequirements {
            objective: "Plan comprehensive launch strategy for a new mobile app".to_string(),
            details: json!({
                "product": "AI-powered fitness tracking mobile app",
                "target_market": "Health-conscious millennials and Gen Z",
                "launch_timeline": "3 months",
                "budget": "$500,000",
                "key_objectives": [
                    "Market penetration analysis",
                    "Brand positioning and messaging",
                    "Technical launch infrastructure",
                    "Marketing campaign strategy",
                ],
            }),
            caps,
        },
        ScenarioId::CrisisManagement => ProjectRequirements {
            objective: "Develop rapid response to a data security incident".to_string(),
            details: json!({
                "incident": "Potential data breach affecting user accounts",
                "severity": "High",
                "affected_users": "~50,000 users",
                "discovery_time": "2 hours ago",
                "immediate_actions_needed": [
                    "Incident assessment and containment",
                    "Stakeholder communication strategy",
                    "Technical remediation plan",
                    "Legal and compliance response",
                ],
            }),
            caps,
        },
        ScenarioId::Interactive => ProjectRequirements {
            objective: "Address a custom project brief with all three teams".to_string(),
            details: json!({
                "format": "interactive",
                "note": "Requirements are provided at run time by the operator",
            }),
            caps,
        },
    }
}

/// Render the requirement brief one inner team works from
pub fn team_brief(team: TeamId, requirements: &ProjectRequirements) -> String {
    let context = serde_json::to_string_pretty(&requirements.details)
        .unwrap_or_else(|_| requirements.details.to_string());

    let (objectives, deliverables) = match team {
        TeamId::ResearchAnalysis => (
            "\
1. Conduct comprehensive market research and competitive analysis
2. Analyze target audience and customer segments
3. Identify market opportunities and potential risks
4. Provide data-driven insights and recommendations",
            "\
- Market analysis report with size, growth, and trends
- Competitive landscape assessment
- Customer persona and segmentation analysis
- Risk assessment and mitigation strategies",
        ),
        TeamId::CreativeDesign => (
            "\
1. Develop comprehensive brand strategy and positioning
2. Create compelling messaging and content strategy
3. Design visual identity and brand guidelines
4. Develop marketing campaign concepts and materials",
            "\
- Brand positioning and messaging framework
- Visual identity system and brand guidelines
- Marketing campaign strategy and creative concepts
- Content strategy and copywriting guidelines",
        ),
        TeamId::TechnicalImplementation => (
            "\
1. Design scalable and secure technical architecture
2. Plan development phases and implementation strategy
3. Define technical requirements and specifications
4. Create testing and quality assurance frameworks",
            "\
- Technical architecture design and documentation
- Development roadmap and implementation plan
- Testing strategy and quality assurance plan
- Deployment and operational procedures",
        ),
    };

    format!(
        "\
{team} TEAM REQUIREMENTS

Objective: {objective}

Project Context:
{context}

Your team's specific objectives:
{objectives}

Deliverables expected:
{deliverables}
",
        team = team.display_name().to_uppercase(),
        objective = requirements.objective,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scenario_falls_back_to_interactive() {
        assert_eq!(ScenarioId::parse("product_launch"), ScenarioId::ProductLaunch);
        assert_eq!(
            ScenarioId::parse("CRISIS_MANAGEMENT"),
            ScenarioId::CrisisManagement
        );
        assert_eq!(ScenarioId::parse("definitely-not-a-thing"), ScenarioId::Interactive);
        assert_eq!(ScenarioId::parse(""), ScenarioId::Interactive);
    }

    #[test]
    fn test_crisis_detection() {
        let caps = ResourceCaps::default();
        assert!(requirements(ScenarioId::CrisisManagement, caps.clone()).is_crisis());
        assert!(!requirements(ScenarioId::ProductLaunch, caps).is_crisis());
    }

    #[test]
    fn test_team_brief_embeds_context() {
        let req = requirements(ScenarioId::ProductLaunch, ResourceCaps::default());
        let brief = team_brief(TeamId::ResearchAnalysis, &req);

        assert!(brief.contains("RESEARCH & ANALYSIS TEAM REQUIREMENTS"));
        assert!(brief.contains("fitness tracking"));
        assert!(brief.contains("market research"));
    }
}
