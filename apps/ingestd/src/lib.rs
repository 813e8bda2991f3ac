pub mod routes;
pub mod scheduler;
pub mod shutdown;
pub mod state;

use std::{future::Future, io, path::PathBuf, sync::Arc, time::Duration};

use clap::{
	Parser,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use color_eyre::eyre::WrapErr;
use tokio::{net::TcpListener, time};
use tracing_subscriber::EnvFilter;

use crate::{shutdown::Shutdown, state::AppState};
use ingest_domain::Transformer;
use ingest_providers::HttpFetcher;
use ingest_service::Ingestor;

pub const VERSION: &str = concat!(
	env!("CARGO_PKG_VERSION"),
	"-",
	env!("VERGEN_GIT_SHA"),
	"-",
	env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

#[derive(Debug, Parser)]
#[command(
	version = VERSION,
	rename_all = "kebab",
	styles = styles(),
)]
pub struct Args {
	/// TOML config file. Environment variables override its values.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Red.on_default() | Effects::BOLD)
		.usage(AnsiColor::Red.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = ingest_config::load(args.config.as_deref())?;

	init_tracing(&config);

	let fetcher = HttpFetcher::new(&config.source)?;
	let state = AppState::connect(&config.storage).await?;
	let ingestor = Ingestor::new(
		Arc::new(fetcher),
		Transformer::new(config.source.name.clone()),
		state.records.clone(),
		state.status.clone(),
	);
	let http_addr = config.service.bind_addr();
	let listener = TcpListener::bind(http_addr)
		.await
		.wrap_err_with(|| format!("Failed to bind the query API on {http_addr}."))?;

	tracing::info!(%http_addr, endpoint = %config.source.endpoint, "HTTP server listening.");

	let lifecycle = Lifecycle {
		interval: config.source.interval,
		shutdown_grace: config.service.shutdown_grace,
	};

	serve(listener, ingestor, state, lifecycle, shutdown::os_signal()).await
}

#[derive(Clone, Copy, Debug)]
pub struct Lifecycle {
	pub interval: Duration,
	pub shutdown_grace: Duration,
}

/// Runs the scheduler and the query API until `signal` resolves or the server fails, then drains
/// both and closes the collaborators, all within `shutdown_grace`.
///
/// Errors from closing are logged, not returned. A `signal` that fails still drains, then surfaces
/// its error so the process exits non-zero.
pub async fn serve<F>(
	listener: TcpListener,
	ingestor: Ingestor,
	state: AppState,
	lifecycle: Lifecycle,
	signal: F,
) -> color_eyre::Result<()>
where
	F: Future<Output = io::Result<()>>,
{
	let shutdown = Shutdown::new();
	let app = routes::router(state.clone());
	let server = {
		let shutdown = shutdown.clone();

		tokio::spawn(async move {
			let graceful = shutdown.clone();
			let result = axum::serve(listener, app)
				.with_graceful_shutdown(async move { graceful.wait().await })
				.await;

			if let Err(err) = result {
				tracing::error!(error = %err, "Query API failed.");
				shutdown.trigger();
			}
		})
	};
	let scheduler = tokio::spawn(scheduler::run(ingestor, lifecycle.interval, shutdown.clone()));

	let signal_error = tokio::select! {
		result = signal => match result {
			Ok(()) => {
				tracing::info!("Received shutdown signal.");

				None
			},
			Err(err) => {
				tracing::error!(error = %err, "Failed to listen for shutdown signals.");

				Some(err)
			},
		},
		_ = shutdown.wait() => {
			tracing::info!("Shutting down after a task failure.");

			None
		},
	};

	shutdown.trigger();

	let deadline = time::Instant::now() + lifecycle.shutdown_grace;

	if time::timeout_at(deadline, async {
		if let Err(err) = scheduler.await {
			tracing::error!(error = %err, "Scheduler task panicked.");
		}
		if let Err(err) = server.await {
			tracing::error!(error = %err, "Query API task panicked.");
		}
	})
	.await
	.is_err()
	{
		tracing::warn!("Tasks did not stop within the shutdown grace period.");
	}

	close_collaborators(&state, deadline).await;

	tracing::info!("Shutdown complete.");

	match signal_error {
		Some(err) => Err(err).wrap_err("Failed to listen for shutdown signals."),
		None => Ok(()),
	}
}

async fn close_collaborators(state: &AppState, deadline: time::Instant) {
	for (collaborator, close) in
		[("record store", state.records.close()), ("status tracker", state.status.close())]
	{
		match time::timeout_at(deadline, close).await {
			Ok(Ok(())) => tracing::info!(collaborator, "Closed connection."),
			Ok(Err(err)) =>
				tracing::warn!(collaborator, error = %err, "Failed to close connection."),
			Err(_) => tracing::warn!(collaborator, "Timed out closing connection."),
		}
	}
}

fn init_tracing(config: &ingest_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	// A second `run` in the same process keeps the subscriber it already installed.
	let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
