//! # Workflow
//!
//! Top-level project orchestration: the phase machine, the event stream
//! and the coordinator driving one full cycle.

pub mod coordinator;
pub mod events;
pub mod pipeline;

pub use coordinator::{MosaicCoordinator, PerformanceMetrics, SystemState, WorkflowResult};
pub use events::{WorkflowEvent, WorkflowEventKind};
pub use pipeline::{Pipeline, WorkflowPhase};
