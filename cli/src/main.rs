//! Terminal driver for the lending workflow simulator
//!
//! Submits one loan request and pumps the engine in real time, printing
//! log lines as they appear, stage transitions as banners, and the
//! receipt at the end. `--json` swaps the stream for a final snapshot.

use anyhow::Result;
use clap::Parser;
use lending_workflow_core_rs::services::fixed::DEFAULT_MAX_LTV_BPS;
use lending_workflow_core_rs::{
    LoanRequest, RiskPolicyConfig, Stage, WorkflowConfig, WorkflowEngine,
};
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "lending-workflow",
    about = "Run the simulated privacy-preserving loan approval workflow",
    version
)]
struct Args {
    /// Requested loan amount (minor units)
    #[arg(long, default_value_t = 50_000)]
    loan_amount: i64,

    /// Posted collateral value (minor units)
    #[arg(long, default_value_t = 65_000)]
    collateral: i64,

    /// Pump interval in milliseconds
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Score risk from the request's loan-to-value ratio instead of
    /// the fixed reference outcome
    #[arg(long)]
    ltv_risk: bool,

    /// Print the final state as JSON instead of streaming the console
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let risk_policy = if args.ltv_risk {
        RiskPolicyConfig::LtvThreshold {
            max_ltv_bps: DEFAULT_MAX_LTV_BPS,
        }
    } else {
        RiskPolicyConfig::default()
    };

    let mut engine = WorkflowEngine::new(WorkflowConfig {
        risk_policy,
        ..WorkflowConfig::default()
    });

    let run_id = engine.submit(LoanRequest::new(args.loan_amount, args.collateral))?;

    if !args.json {
        println!("run {run_id}");
        println!(
            "loan {} against collateral {}",
            args.loan_amount, args.collateral
        );
        println!();
    }

    let started = Instant::now();
    let mut simulated = Duration::ZERO;
    let mut printed = 0;
    let mut last_stage = Stage::Idle;

    loop {
        printed = print_new_lines(&engine, printed, args.json);
        if engine.stage() != last_stage {
            last_stage = engine.stage();
            print_stage_banner(last_stage, args.json);
        }
        if !engine.is_in_flight() {
            break;
        }

        thread::sleep(Duration::from_millis(args.tick_ms));
        let target = started.elapsed();
        engine.advance(target - simulated);
        simulated = target;
    }

    if args.json {
        println!("{}", engine.snapshot().to_json()?);
        return Ok(());
    }

    if let Some(receipt) = engine.receipt() {
        println!();
        println!("Transaction ID: {}", receipt.transaction_id());
        println!("Status:         {}", receipt.status());
    }

    Ok(())
}

/// Print log entries not yet shown, oldest of the new batch first.
/// Returns the updated printed count.
fn print_new_lines(engine: &WorkflowEngine, printed: usize, quiet: bool) -> usize {
    let total = engine.log().len();
    if !quiet {
        for entry in engine.log().in_emission_order().skip(printed) {
            println!("{entry}");
        }
    }
    total
}

fn print_stage_banner(stage: Stage, quiet: bool) {
    if !quiet {
        println!("── {} ({}/4)", stage.label(), stage.index());
    }
}
