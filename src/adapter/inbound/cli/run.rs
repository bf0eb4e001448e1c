//! Handlers for `run`, `once` and `preview`.

use serde_json::json;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use super::command::{ConfigPathArg, DeliveryArgs};
use super::output;
use crate::domain::DispatchOutcome;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::orchestration::runtime;
use crate::port::inbound::digest::CycleOutcome;

fn load(path: &std::path::Path) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    config.init_logging();
    Ok(config)
}

/// Execute the long-running service until Ctrl-C.
pub async fn execute_run(args: &DeliveryArgs) -> Result<()> {
    let config = load(&args.config)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", args.config.display());
    output::field("Registry", config.registry.path());
    match config.schedule.interval_secs {
        Some(secs) => output::field("Schedule", format!("every {secs}s")),
        None => output::field(
            "Schedule",
            format!(
                "daily at {} (UTC{:+})",
                config.schedule.daily_at, config.schedule.utc_offset_hours
            ),
        ),
    }
    if args.dry_run {
        output::warning("Dry run: deliveries are logged, not sent");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        } else {
            warn!("Could not listen for Ctrl-C, stopping");
        }
        let _ = shutdown_tx.send(true);
    });

    runtime::run_with_shutdown(config, args.dry_run, shutdown_rx).await
}

/// Execute a single broadcast and print its summary.
pub async fn execute_once(args: &DeliveryArgs) -> Result<()> {
    let config = load(&args.config)?;
    let outcome = runtime::run_once(&config, args.dry_run).await?;

    if output::is_json() {
        output::json_output(outcome_json(&outcome, args.dry_run));
        return Ok(());
    }

    match &outcome {
        CycleOutcome::NoSubscribers => output::warning("No subscribers, nothing sent"),
        CycleOutcome::Broadcast {
            report_available,
            summary,
        } => {
            if !report_available {
                output::warning("Market data unavailable, sent maintenance notice");
            }
            output::success(&format!(
                "Delivered to {}/{} subscribers",
                summary.succeeded(),
                summary.total()
            ));
            for failure in summary.failures() {
                if let DispatchOutcome::Failure(reason) = &failure.outcome {
                    output::error(&format!("{}: {reason}", failure.recipient.id));
                }
            }
        }
    }
    Ok(())
}

fn outcome_json(outcome: &CycleOutcome, dry_run: bool) -> serde_json::Value {
    match outcome {
        CycleOutcome::NoSubscribers => json!({
            "command": "once",
            "dry_run": dry_run,
            "status": "no_subscribers",
        }),
        CycleOutcome::Broadcast {
            report_available,
            summary,
        } => json!({
            "command": "once",
            "dry_run": dry_run,
            "status": "broadcast",
            "report_available": report_available,
            "succeeded": summary.succeeded(),
            "failed": summary.failed(),
        }),
    }
}

/// Print a freshly produced report.
pub async fn execute_preview(args: &ConfigPathArg) -> Result<()> {
    let config = load(&args.config)?;
    let text = runtime::preview(&config).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "preview", "report": text }));
    } else {
        println!("{text}");
    }
    Ok(())
}
