//! # Integration Planning
//!
//! Derives a dependency relation between team deliverables from
//! shared-keyword overlap and orders teams for integration by in-degree.
//!
//! The ordering is NOT a full topological sort: it does not detect cycles
//! (the keyword heuristic happily produces mutual edges) and only
//! guarantees that teams nothing depends on sort no later than teams
//! other teams depend on. The sort is stable, so equal in-degrees keep
//! their input order.

use crate::teams::TeamId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Keywords whose co-occurrence across two deliverables marks a
/// dependency between the producing teams.
pub const DEPENDENCY_KEYWORDS: [&str; 8] = [
    "data",
    "requirements",
    "design",
    "implementation",
    "strategy",
    "analysis",
    "content",
    "technical",
];

/// Minimum shared-keyword count for a dependency edge
const DEPENDENCY_THRESHOLD: usize = 2;

/// Dependency relation, preserving the input team order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRelation {
    pub edges: Vec<DependencyEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub team: TeamId,
    pub depends_on: Vec<TeamId>,
}

/// Build the dependency relation over a set of team outputs.
///
/// Team A depends on team B when at least [`DEPENDENCY_THRESHOLD`]
/// keywords from the fixed vocabulary occur in both outputs.
pub fn analyze_dependencies(outputs: &[(TeamId, &str)]) -> DependencyRelation {
    let lowered: Vec<(TeamId, String)> = outputs
        .iter()
        .map(|(team, text)| (*team, text.to_lowercase()))
        .collect();

    let edges = lowered
        .iter()
        .map(|(team, text)| {
            let depends_on = lowered
                .iter()
                .filter(|(other, other_text)| {
                    other != team && keyword_overlap(text, other_text) >= DEPENDENCY_THRESHOLD
                })
                .map(|(other, _)| *other)
                .collect();
            DependencyEdge {
                team: *team,
                depends_on,
            }
        })
        .collect();

    DependencyRelation { edges }
}

fn keyword_overlap(a: &str, b: &str) -> usize {
    DEPENDENCY_KEYWORDS
        .iter()
        .filter(|kw| a.contains(*kw) && b.contains(*kw))
        .count()
}

/// Order teams for integration: ascending in-degree, stable on ties.
pub fn integration_order(relation: &DependencyRelation) -> Vec<TeamId> {
    let in_degree = |team: TeamId| {
        relation
            .edges
            .iter()
            .filter(|e| e.team != team && e.depends_on.contains(&team))
            .count()
    };

    let mut order: Vec<TeamId> = relation.edges.iter().map(|e| e.team).collect();
    order.sort_by_key(|team| in_degree(*team));
    order
}

/// Render the integration plan document
pub fn render_plan(relation: &DependencyRelation, order: &[TeamId]) -> String {
    let mut plan = format!(
        "\
TEAM INTEGRATION PLAN
Generated: {}

TEAM DEPENDENCIES:
",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
    );

    for edge in &relation.edges {
        let deps = if edge.depends_on.is_empty() {
            "none".to_string()
        } else {
            edge.depends_on
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        plan.push_str(&format!("- {}: depends on {deps}\n", edge.team.as_str()));
    }

    plan.push_str(
        "\nINTEGRATION STRATEGY:\n\
         1. Sequential integration: start with teams nothing depends on,\n\
            then integrate dependent teams in dependency order\n\
         2. Conflict resolution: merge complementary outputs and resolve\n\
            contradictory recommendations\n\
         3. Quality assurance: validate the integrated output against the\n\
            original requirements\n\n\
         RECOMMENDED INTEGRATION ORDER:\n",
    );
    for (i, team) in order.iter().enumerate() {
        plan.push_str(&format!("{}. {}\n", i + 1, team.as_str()));
    }

    plan.push_str(
        "\nHUMAN INTERVENTION POINTS:\n\
         - Approve dependency analysis\n\
         - Validate integration strategy\n\
         - Resolve complex conflicts\n\
         - Approve final integrated output\n",
    );

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> [TeamId; 3] {
        TeamId::all()
    }

    #[test]
    fn test_overlap_threshold_creates_edges() {
        let [research, creative, technical] = teams();
        // research/creative share "strategy" and "analysis"; technical
        // shares nothing with either.
        let outputs = vec![
            (research, "market analysis informs the strategy"),
            (creative, "brand strategy built on audience analysis"),
            (technical, "deployment pipeline and monitoring"),
        ];

        let relation = analyze_dependencies(&outputs);
        assert_eq!(relation.edges[0].depends_on, vec![creative]);
        assert_eq!(relation.edges[1].depends_on, vec![research]);
        assert!(relation.edges[2].depends_on.is_empty());
    }

    #[test]
    fn test_single_shared_keyword_is_not_a_dependency() {
        let [research, creative, _] = teams();
        let outputs = vec![
            (research, "the data speaks"),
            (creative, "data informs the visuals"),
        ];
        let relation = analyze_dependencies(&outputs);
        assert!(relation.edges.iter().all(|e| e.depends_on.is_empty()));
    }

    #[test]
    fn test_integration_order_is_permutation_and_respects_in_degree() {
        let [research, creative, technical] = teams();
        let outputs = vec![
            (research, "analysis and strategy and design notes"),
            (creative, "strategy and analysis for the design team"),
            (technical, "independent build tooling"),
        ];

        let relation = analyze_dependencies(&outputs);
        let order = integration_order(&relation);

        assert_eq!(order.len(), 3);
        for team in teams() {
            assert!(order.contains(&team));
        }
        // technical has in-degree 0 and must not sort after either
        // positive in-degree team.
        assert_eq!(order[0], technical);
    }

    #[test]
    fn test_order_is_stable_under_equal_in_degrees() {
        let [research, creative, technical] = teams();
        let outputs = vec![
            (research, "nothing shared"),
            (creative, "still nothing"),
            (technical, "also nothing"),
        ];

        let relation = analyze_dependencies(&outputs);
        let order = integration_order(&relation);
        assert_eq!(order, vec![research, creative, technical]);
    }

    #[test]
    fn test_plan_lists_every_team() {
        let [research, creative, technical] = teams();
        let outputs = vec![
            (research, "analysis strategy"),
            (creative, "strategy analysis"),
            (technical, "implementation"),
        ];
        let relation = analyze_dependencies(&outputs);
        let order = integration_order(&relation);
        let plan = render_plan(&relation, &order);

        assert!(plan.contains("TEAM INTEGRATION PLAN"));
        for team in teams() {
            assert!(plan.contains(team.as_str()));
        }
    }
}
