use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use crate::shutdown::Shutdown;
use ingest_service::{CycleOutcome, Ingestor};

/// Runs one cycle right away, then one per `period` measured from start.
///
/// Cycles run back to back on this task, so they never overlap; ticks that fall due while a cycle
/// is still running are dropped. On shutdown an in-flight cycle is abandoned at its next await
/// point. Returns the number of cycles that ran to completion.
pub async fn run(ingestor: Ingestor, period: Duration, shutdown: Shutdown) -> u64 {
	let mut ticker = time::interval(period);

	ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

	tracing::info!(?period, "Scheduler started.");

	let mut completed = 0_u64;

	loop {
		tokio::select! {
			biased;
			_ = shutdown.wait() => break,
			_ = ticker.tick() => {},
		}

		let outcome = tokio::select! {
			biased;
			_ = shutdown.wait() => {
				tracing::warn!("Abandoning in-flight ingestion cycle for shutdown.");

				break;
			},
			outcome = ingestor.run_cycle() => outcome,
		};

		completed += 1;

		match outcome {
			CycleOutcome::Succeeded { count, .. } =>
				tracing::debug!(cycle = completed, count, "Cycle finished."),
			CycleOutcome::Failed { error } =>
				tracing::debug!(cycle = completed, error = %error, "Cycle finished with failure."),
		}
	}

	tracing::info!(completed, "Scheduler stopped.");

	completed
}
