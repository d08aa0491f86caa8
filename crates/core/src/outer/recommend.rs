//! # Recommendation Synthesis
//!
//! Pure function of the team outputs and coordination artifacts: keyword
//! co-occurrences map to canned strategic recommendations, followed by
//! resource, quality and timeline checks and a fixed generic tail.

use super::quality::QualityAssessment;
use super::resources::{ResourceCaps, ResourceRequest};
use crate::teams::TeamId;

/// Keyword pairs whose co-occurrence across the combined outputs
/// triggers a strategic recommendation.
const KEYWORD_RECOMMENDATIONS: [((&str, &str), &str); 4] = [
    (
        ("ai", "personalization"),
        "Prioritize AI-powered personalization as core differentiator",
    ),
    (
        ("market", "growth"),
        "Focus on rapid market entry to capitalize on growth opportunity",
    ),
    (
        ("user", "experience"),
        "Invest heavily in user experience optimization and testing",
    ),
    (
        ("technical", "scalability"),
        "Implement scalable architecture from launch to support growth",
    ),
];

const GENERIC_TAIL: [&str; 4] = [
    "Establish cross-team communication protocols",
    "Implement shared project management and tracking systems",
    "Create integrated testing and validation procedures",
    "Plan for post-launch monitoring and optimization",
];

/// Synthesize the final recommendation list.
///
/// Deterministic and idempotent: identical inputs always produce the
/// identical list.
pub fn synthesize(
    outputs: &[(TeamId, &str)],
    requests: &[ResourceRequest],
    caps: &ResourceCaps,
    assessments: &[QualityAssessment],
    crisis: bool,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let combined = outputs
        .iter()
        .map(|(_, text)| text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    for ((first, second), recommendation) in KEYWORD_RECOMMENDATIONS {
        if combined.contains(first) && combined.contains(second) {
            recommendations.push(recommendation.to_string());
        }
    }

    let total_requested: u64 = requests.iter().map(|r| r.budget).sum();
    if total_requested > caps.budget {
        recommendations
            .push("Consider phased implementation to manage budget constraints".to_string());
    }

    let low_quality: Vec<&str> = assessments
        .iter()
        .filter(|a| !a.passed())
        .map(|a| a.team.as_str())
        .collect();
    if !low_quality.is_empty() {
        recommendations.push(format!(
            "Provide additional support and review for: {}",
            low_quality.join(", ")
        ));
    }

    if crisis {
        recommendations
            .push("Implement rapid response protocols with 24/7 monitoring".to_string());
    } else {
        recommendations
            .push("Establish regular milestone reviews and progress checkpoints".to_string());
    }

    recommendations.extend(GENERIC_TAIL.iter().map(|r| r.to_string()));
    recommendations
}
