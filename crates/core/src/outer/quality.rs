//! # Quality Assessment
//!
//! Scores each team deliverable against five fixed-weight criteria and
//! compiles the quality report. Scoring is pluggable via
//! [`QualityScorer`]; the default [`HeuristicScorer`] keeps the
//! simplified scheme where only completeness is measured and the other
//! criteria carry documented placeholder constants.

use crate::teams::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall score at or above this passes review
pub const PASS_THRESHOLD: f64 = 80.0;

/// A scoring criterion with its fixed weight
#[derive(Debug, Clone, Copy)]
pub struct QualityCriterion {
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f64,
}

/// The five criteria; weights sum to 1.0.
pub const QUALITY_CRITERIA: [QualityCriterion; 5] = [
    QualityCriterion {
        name: "completeness",
        description: "All required elements are present",
        weight: 0.25,
    },
    QualityCriterion {
        name: "accuracy",
        description: "Information is correct and validated",
        weight: 0.25,
    },
    QualityCriterion {
        name: "consistency",
        description: "Consistent style, format, and messaging",
        weight: 0.20,
    },
    QualityCriterion {
        name: "clarity",
        description: "Clear, understandable communication",
        weight: 0.15,
    },
    QualityCriterion {
        name: "alignment",
        description: "Aligned with project objectives",
        weight: 0.15,
    },
];

/// Scores one criterion for one deliverable
pub trait QualityScorer: Send + Sync {
    fn score(&self, criterion: &str, team: TeamId, output: &str) -> f64;
}

/// The simplified default scheme: completeness tracks output length,
/// every other criterion is a placeholder constant.
#[derive(Debug, Default)]
pub struct HeuristicScorer;

impl QualityScorer for HeuristicScorer {
    fn score(&self, criterion: &str, _team: TeamId, output: &str) -> f64 {
        match criterion {
            "completeness" => (output.len() as f64 / 10.0).min(100.0),
            "accuracy" => 85.0,
            "consistency" => 90.0,
            "clarity" => 80.0,
            "alignment" => 88.0,
            _ => 85.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub score: f64,
}

/// The weighted assessment of one team's deliverable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub team: TeamId,
    pub timestamp: DateTime<Utc>,
    pub scores: Vec<CriterionScore>,
    pub overall_score: f64,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl QualityAssessment {
    pub fn passed(&self) -> bool {
        self.overall_score >= PASS_THRESHOLD
    }
}

/// Score one deliverable across all criteria.
///
/// The overall score is the weighted sum of the criterion scores; any
/// criterion below the pass threshold becomes an issue with a matching
/// improvement recommendation.
pub fn assess(scorer: &dyn QualityScorer, team: TeamId, output: &str) -> QualityAssessment {
    let mut scores = Vec::with_capacity(QUALITY_CRITERIA.len());
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    let mut overall = 0.0;

    for criterion in QUALITY_CRITERIA {
        let score = scorer.score(criterion.name, team, output);
        overall += score * criterion.weight;

        if score < PASS_THRESHOLD {
            issues.push(format!("Low {} score: {score:.1}", criterion.name));
            recommendations.push(format!(
                "Improve {}: {}",
                criterion.name, criterion.description
            ));
        }

        scores.push(CriterionScore {
            criterion: criterion.name.to_string(),
            score,
        });
    }

    QualityAssessment {
        team,
        timestamp: Utc::now(),
        scores,
        overall_score: overall,
        issues,
        recommendations,
    }
}

/// Render the comprehensive quality report
pub fn render_report(assessments: &[QualityAssessment]) -> String {
    let mut report = format!(
        "\
QUALITY ASSURANCE REPORT
Generated: {}

QUALITY CRITERIA:
",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
    );
    for criterion in QUALITY_CRITERIA {
        report.push_str(&format!(
            "- {} (weight {:.2}): {}\n",
            criterion.name, criterion.weight, criterion.description
        ));
    }

    report.push_str("\nTEAM ASSESSMENTS:\n");
    for assessment in assessments {
        let status = if assessment.passed() {
            "PASS"
        } else {
            "NEEDS_IMPROVEMENT"
        };
        report.push_str(&format!(
            "\n{}:\n- Overall Score: {:.1}/100\n- Issues: {}\n- Status: {status}\n",
            assessment.team.as_str().to_uppercase(),
            assessment.overall_score,
            assessment.issues.len(),
        ));
    }

    let passing = assessments.iter().filter(|a| a.passed()).count();
    let average = if assessments.is_empty() {
        0.0
    } else {
        assessments.iter().map(|a| a.overall_score).sum::<f64>() / assessments.len() as f64
    };
    let all_issues: Vec<&String> = assessments.iter().flat_map(|a| &a.issues).collect();

    report.push_str(&format!(
        "\nSUMMARY:\n\
         - Average Quality Score: {average:.1}/100\n\
         - Teams Passing (>=80): {passing}\n\
         - Teams Needing Improvement: {}\n\
         - Total Issues Identified: {}\n",
        assessments.len() - passing,
        all_issues.len(),
    ));

    if !all_issues.is_empty() {
        report.push_str("\nCRITICAL ISSUES:\n");
        for issue in all_issues.iter().take(10) {
            report.push_str(&format!("- {issue}\n"));
        }
    }

    report.push_str(
        "\nHUMAN VALIDATION REQUIRED:\n\
         - Review quality criteria and weights\n\
         - Approve teams with borderline scores\n\
         - Prioritize improvement recommendations\n\
         - Make final quality acceptance decision\n",
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = QUALITY_CRITERIA.iter().map(|c| c.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_equals_weighted_sum() {
        let output = "x".repeat(1200);
        let assessment = assess(&HeuristicScorer, TeamId::ResearchAnalysis, &output);

        let expected: f64 = assessment
            .scores
            .iter()
            .zip(QUALITY_CRITERIA.iter())
            .map(|(s, c)| s.score * c.weight)
            .sum();
        assert!((assessment.overall_score - expected).abs() < 1e-9);

        // 1200 chars caps completeness at 100; constants fill the rest:
        // 100*.25 + 85*.25 + 90*.20 + 80*.15 + 88*.15 = 89.45
        assert!((assessment.overall_score - 89.45).abs() < 1e-9);
        assert!(assessment.passed());
    }

    #[test]
    fn test_short_output_raises_completeness_issue() {
        let assessment = assess(&HeuristicScorer, TeamId::CreativeDesign, "tiny");
        assert!(!assessment.passed());
        assert!(assessment
            .issues
            .iter()
            .any(|i| i.contains("completeness")));
        assert_eq!(assessment.issues.len(), assessment.recommendations.len());
    }

    #[test]
    fn test_scorer_is_injectable() {
        struct Flat;
        impl QualityScorer for Flat {
            fn score(&self, _criterion: &str, _team: TeamId, _output: &str) -> f64 {
                70.0
            }
        }

        let assessment = assess(&Flat, TeamId::TechnicalImplementation, "anything");
        assert!((assessment.overall_score - 70.0).abs() < 1e-9);
        assert_eq!(assessment.issues.len(), QUALITY_CRITERIA.len());
    }

    #[test]
    fn test_report_lists_every_team() {
        let output = "y".repeat(900);
        let assessments: Vec<_> = TeamId::all()
            .into_iter()
            .map(|team| assess(&HeuristicScorer, team, &output))
            .collect();
        let report = render_report(&assessments);

        assert!(report.contains("QUALITY ASSURANCE REPORT"));
        for team in TeamId::all() {
            assert!(report.contains(&team.as_str().to_uppercase()));
        }
    }
}
