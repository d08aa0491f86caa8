//! # Mosaic Core
//!
//! The "Brain" of the Mosaic system - a hierarchical multi-team
//! coordination demo with human-in-the-loop checkpoints.
//!
//! ## Architecture
//!
//! - `agents` - flat data-driven roster of inner-team and coordination agents
//! - `gate/` - human-intervention checkpoints with pluggable response handlers
//! - `teams/` - inner-team orchestration and deliverable templates
//! - `outer/` - cross-team integration, resource, quality and recommendation steps
//! - `workflow/` - the top-level coordinator, phase machine and event stream
//! - `scenario` - canned business scenarios and per-team briefs
//! - `state/` - timestamped JSON persistence of run results
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mosaic_core::config::MosaicConfig;
//! use mosaic_core::gate::{DemoHandler, Gate};
//! use mosaic_core::scenario::ScenarioId;
//! use mosaic_core::workflow::MosaicCoordinator;
//!
//! let config = MosaicConfig::default();
//! let gate = Gate::new(Box::new(DemoHandler), config.intervention_timeout);
//! let mut coordinator = MosaicCoordinator::new(config, gate);
//! let result = coordinator.run_project(ScenarioId::ProductLaunch).await;
//! ```

pub mod agents;
pub mod config;
pub mod gate;
pub mod outer;
pub mod scenario;
pub mod state;
pub mod teams;
pub mod workflow;
