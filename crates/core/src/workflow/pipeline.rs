//! # Workflow Phases
//!
//! The phase machine one project cycle moves through.

use serde::{Deserialize, Serialize};

/// Phase of the project workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    /// Inner teams producing their deliverables
    InnerExecution,
    /// Outer coordination over the team deliverables
    OuterCoordination,
    /// Assembling the final consolidated deliverable
    FinalAssembly,
    /// Computing performance metrics
    PerformanceAnalysis,
    /// Complete
    Complete,
    /// Failed
    Failed,
}

/// Tracks the current phase of a run
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub phase: WorkflowPhase,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            phase: WorkflowPhase::InnerExecution,
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next phase
    pub fn advance(&mut self) {
        self.phase = match self.phase {
            WorkflowPhase::InnerExecution => WorkflowPhase::OuterCoordination,
            WorkflowPhase::OuterCoordination => WorkflowPhase::FinalAssembly,
            WorkflowPhase::FinalAssembly => WorkflowPhase::PerformanceAnalysis,
            WorkflowPhase::PerformanceAnalysis => WorkflowPhase::Complete,
            WorkflowPhase::Complete => WorkflowPhase::Complete,
            WorkflowPhase::Failed => WorkflowPhase::Failed,
        };
    }

    /// Fail the workflow
    pub fn fail(&mut self) {
        self.phase = WorkflowPhase::Failed;
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, WorkflowPhase::Complete | WorkflowPhase::Failed)
    }

    pub fn is_success(&self) -> bool {
        self.phase == WorkflowPhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_advances_through_phases() {
        let mut pipeline = Pipeline::new();
        assert_eq!(pipeline.phase, WorkflowPhase::InnerExecution);

        pipeline.advance();
        assert_eq!(pipeline.phase, WorkflowPhase::OuterCoordination);

        pipeline.advance();
        pipeline.advance();
        pipeline.advance();
        assert_eq!(pipeline.phase, WorkflowPhase::Complete);
        assert!(pipeline.is_complete());
        assert!(pipeline.is_success());

        // Complete is terminal
        pipeline.advance();
        assert_eq!(pipeline.phase, WorkflowPhase::Complete);
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut pipeline = Pipeline::new();
        pipeline.fail();
        assert!(pipeline.is_complete());
        assert!(!pipeline.is_success());

        pipeline.advance();
        assert_eq!(pipeline.phase, WorkflowPhase::Failed);
    }
}
