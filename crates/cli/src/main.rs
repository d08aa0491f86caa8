//! Mosaic CLI
//!
//! Runs one full project cycle for a selected scenario, prints the
//! summary and report, and saves the run result to a timestamped JSON
//! file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mosaic_core::agents::{Membership, Roster};
use mosaic_core::config::MosaicConfig;
use mosaic_core::gate::{ConsoleHandler, DemoHandler, Gate, InterventionHandler};
use mosaic_core::scenario::{self, ScenarioId};
use mosaic_core::state::RunStore;
use mosaic_core::workflow::{MosaicCoordinator, WorkflowResult};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mosaic", about = "Hierarchical multi-team coordination demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one project cycle for a scenario
    Run {
        /// Scenario identifier (unknown values fall back to the
        /// interactive default)
        #[arg(long, default_value = "product_launch")]
        scenario: String,
        /// Prompt on the console at every human gate instead of using
        /// canned demo approvals
        #[arg(long)]
        console: bool,
        /// Directory for saved run results (defaults to the runtime
        /// directory)
        #[arg(long)]
        runs_dir: Option<PathBuf>,
    },
    /// List the available scenarios
    Scenarios,
    /// List the agent roster
    Agents,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            scenario,
            console,
            runs_dir,
        } => run(&scenario, console, runs_dir).await,
        Command::Scenarios => {
            for id in ScenarioId::all() {
                let meta = scenario::scenario(id);
                println!("{:<20} {}", id.as_str(), meta.description);
            }
            Ok(())
        }
        Command::Agents => {
            let roster = Roster::standard();
            for agent in roster.agents() {
                let placement = match agent.spec.membership {
                    Membership::Inner(team) => team.display_name(),
                    Membership::Outer => "Outer Coordination",
                };
                println!("{:<40} {} [{placement}]", agent.spec.name, agent.spec.role);
                println!("    {}", agent.spec.charter);
            }
            Ok(())
        }
    }
}

async fn run(scenario_raw: &str, console: bool, runs_dir: Option<PathBuf>) -> Result<()> {
    let scenario_id = ScenarioId::parse(scenario_raw);
    if scenario_id.as_str() != scenario_raw.trim().to_lowercase() {
        tracing::warn!(requested = scenario_raw, "unknown scenario, using interactive default");
    }
    let meta = scenario::scenario(scenario_id);

    let config = MosaicConfig::from_env();
    let handler: Box<dyn InterventionHandler> = if console {
        Box::new(ConsoleHandler::new(
            "Project Director",
            "Outer Team: Project Coordination",
        ))
    } else {
        Box::new(DemoHandler)
    };
    let gate = Gate::new(handler, config.intervention_timeout);

    println!("Scenario: {} - {}", meta.name, meta.description);
    println!("{}", "=".repeat(60));

    let mut coordinator = MosaicCoordinator::new(config, gate);
    let result = coordinator.run_project(scenario_id).await;

    print_summary(&result);
    println!("\n{}", coordinator.system_report());

    let store = match runs_dir {
        Some(dir) => RunStore::at(dir),
        None => RunStore::new(),
    };
    let path = store.save(&result).await?;
    println!("Results saved to: {}", path.display());

    Ok(())
}

fn print_summary(result: &WorkflowResult) {
    println!("\nRESULTS");
    println!("{}", "=".repeat(60));
    println!(
        "Status: {}",
        if result.success { "SUCCESS" } else { "FAILED" }
    );
    if let Some(error) = &result.error {
        println!("Error: {error}");
    }

    if let Some(metrics) = &result.metrics {
        println!("\nPerformance Summary:");
        println!("  Teams Executed: {}", metrics.teams_executed);
        println!("  Human Interventions: {}", metrics.human_interventions);
        println!("  Execution Time: {:.2}s", metrics.execution_time_seconds);
        println!(
            "  Average Quality Score: {:.1}/100",
            metrics.average_quality_score
        );
    }

    println!("\nHuman Interventions:");
    for record in &result.interventions {
        let status = if record.approved { "approved" } else { "rejected" };
        println!("  [{status}] {}", record.label);
    }

    let preview: String = result.final_deliverable.chars().take(400).collect();
    println!("\nFinal Output Preview:\n{preview}...");
}
