use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use spl_payment_client::config::HarnessArgs;
use spl_payment_client::harness::Harness;
use spl_payment_client::telemetry::setup_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_telemetry();

    let args = HarnessArgs::parse();
    let harness = Harness::from_args(&args).context("failed to set up harness")?;

    match harness.run(&args.plan()).await {
        Ok(report) => {
            info!(
                initialized = report.initialized,
                total_in_vault = report.withdraw.total_in_vault,
                "payment harness finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "payment harness failed");
            Err(e).context("payment harness failed")
        }
    }
}
