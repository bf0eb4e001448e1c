//! Runtime entry points used by the CLI.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::info;

use super::scheduler::{log_outcome, Scheduler};
use crate::application::render::PlainTextFormatter;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_aggregator, build_cycle, Channel};
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::digest::{CycleOutcome, DigestService};
use crate::port::outbound::messenger::ReportFormatter;

/// Run the timer trigger, plus the Telegram command listener when enabled,
/// until `shutdown` turns true.
///
/// # Errors
///
/// Returns an error if the components cannot be built.
pub async fn run_with_shutdown(
    config: Config,
    dry_run: bool,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let channel = Channel::from_config(&config, dry_run)?;
    let cycle = build_cycle(&config, &channel)?;
    let service: Arc<dyn DigestService> = cycle;

    #[cfg(feature = "telegram")]
    let listener = match &channel {
        Channel::Telegram(bot) if config.telegram.commands => Some(tokio::spawn(
            crate::adapter::inbound::telegram::run_listener(bot.clone(), Arc::clone(&service)),
        )),
        _ => None,
    };

    let scheduler = Scheduler::new(
        Arc::clone(&service),
        config.schedule.cadence()?,
        config.schedule.cycle_timeout(),
    );
    info!("marketpulse running");
    scheduler.run(shutdown).await;

    #[cfg(feature = "telegram")]
    if let Some(handle) = listener {
        handle.abort();
    }

    Ok(())
}

/// Produce one report, broadcast it and return the outcome.
///
/// # Errors
///
/// Returns an error if the components cannot be built or the subscriber
/// list cannot be read.
pub async fn run_once(config: &Config, dry_run: bool) -> Result<CycleOutcome> {
    let channel = Channel::from_config(config, dry_run)?;
    let cycle = build_cycle(config, &channel)?;

    let outcome = cycle.run_cycle(Utc::now()).await?;
    log_outcome(&outcome);
    Ok(outcome)
}

/// Produce one report and render it as plain text without sending it.
///
/// # Errors
///
/// Returns an error if the aggregator cannot be built.
pub async fn preview(config: &Config) -> Result<String> {
    let aggregator = build_aggregator(config)?;
    let report = aggregator.produce_report(Utc::now()).await;
    Ok(PlainTextFormatter::new(config.schedule.offset()?).format(&report))
}
