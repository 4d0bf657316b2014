//! # Custody Node
//!
//! Command-line entry point: runs one custody operation as a ledger
//! transaction and prints its JSON response on stdout.
//!
//! ```text
//! custody-node --data-file ./custody.db invoke CreateEvidence C1 E1 cid <hash> '{}'
//! custody-node --caller bob --org Org2MSP invoke TransferCustody C1 E1 carol "lab"
//! custody-node invoke GetCustodyChain C1 E1
//! custody-node invoke --print-metrics ArchiveToCold C1 E1 "case closed"
//! ```
//!
//! Logs go to stderr. The exit code is non-zero when the operation fails.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use cl_02_custody::ipc::functions;
use custody_node::{Caller, Ledger, NodeConfig, TransactionReceipt};
use custody_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use shared_bus::InMemoryEventBus;

#[derive(Debug, Parser)]
#[command(name = "custody-node", version, about = "Evidence custody ledger node")]
struct Cli {
    /// State file; overrides CL_DATA_FILE. Without one, state is not kept.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Submitter identity; overrides CL_CALLER_ID.
    #[arg(long, global = true)]
    caller: Option<String>,

    /// Submitter organization; overrides CL_CALLER_ORG.
    #[arg(long, global = true)]
    org: Option<String>,

    /// Emit JSON log lines; overrides CL_JSON_LOGS.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one operation as a transaction.
    Invoke {
        /// Operation name, e.g. CreateEvidence.
        function: String,
        /// Positional string arguments of the operation.
        args: Vec<String>,
        /// Write the Prometheus metrics to stderr after the response.
        #[arg(long)]
        print_metrics: bool,
    },
    /// List the operation names.
    Functions,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if cli.json_logs {
        telemetry.json_logs = true;
    }
    telemetry.validate().context("invalid telemetry configuration")?;
    let _telemetry = init_telemetry(telemetry).context("failed to initialize telemetry")?;

    let config = load_config(&cli)?;

    match cli.command {
        Command::Functions => {
            for name in functions::ALL {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Invoke {
            function,
            args,
            print_metrics,
        } => {
            let receipt = run(&config, &function, &args)?;
            println!("{}", receipt.response.to_json());
            if print_metrics {
                eprint!("{}", encode_metrics().context("failed to encode metrics")?);
            }
            Ok(if receipt.is_committed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Environment first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<NodeConfig> {
    let mut config = NodeConfig::from_env().context("invalid node environment")?;
    if let Some(path) = &cli.data_file {
        config.storage.data_file = Some(path.clone());
    }
    if let Some(caller) = &cli.caller {
        config.caller.identity = caller.clone();
    }
    if let Some(org) = &cli.org {
        config.caller.org = org.clone();
    }
    config.validate().context("invalid node configuration")?;
    debug!(?config, "[cl-node] Configuration loaded");
    Ok(config)
}

fn run(config: &NodeConfig, function: &str, args: &[String]) -> Result<TransactionReceipt> {
    let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus.capacity));
    let caller = Caller::new(&config.caller.identity, &config.caller.org);

    let receipt = match &config.storage.data_file {
        Some(path) => {
            let ledger = Ledger::open(path, bus)
                .with_context(|| format!("cannot open ledger at {}", path.display()))?;
            ledger.submit(&caller, function, args)
        }
        None => {
            info!("[cl-node] No data file configured, state will not be kept");
            Ledger::in_memory(bus).submit(&caller, function, args)
        }
    };

    if let Some(failure) = receipt.response.failure() {
        info!(
            tx_id = %receipt.transaction_id,
            kind = %failure.kind,
            "[cl-node] Transaction rejected"
        );
    }
    Ok(receipt)
}
