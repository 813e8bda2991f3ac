use std::{io, sync::Arc};

use tokio::sync::watch;

/// Process-wide stop flag. Once triggered it stays triggered.
#[derive(Clone, Debug)]
pub struct Shutdown {
	tx: Arc<watch::Sender<bool>>,
}
impl Shutdown {
	pub fn new() -> Self {
		let (tx, _rx) = watch::channel(false);

		Self { tx: Arc::new(tx) }
	}

	pub fn trigger(&self) {
		self.tx.send_replace(true);
	}

	pub fn is_triggered(&self) -> bool {
		*self.tx.borrow()
	}

	/// Resolves once [`Shutdown::trigger`] has been called, immediately if it already was.
	pub async fn wait(&self) {
		let mut rx = self.tx.subscribe();

		while !*rx.borrow_and_update() {
			if rx.changed().await.is_err() {
				break;
			}
		}
	}
}
impl Default for Shutdown {
	fn default() -> Self {
		Self::new()
	}
}

/// Waits for SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn os_signal() -> io::Result<()> {
	use tokio::signal::unix::{SignalKind, signal};

	let mut sigint = signal(SignalKind::interrupt())?;
	let mut sigterm = signal(SignalKind::terminate())?;

	tokio::select! {
		_ = sigint.recv() => {},
		_ = sigterm.recv() => {},
	}

	Ok(())
}

#[cfg(not(unix))]
pub async fn os_signal() -> io::Result<()> {
	tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[tokio::test]
	async fn wait_returns_after_trigger() {
		let shutdown = Shutdown::new();
		let waiter = {
			let shutdown = shutdown.clone();

			tokio::spawn(async move { shutdown.wait().await })
		};

		assert!(!shutdown.is_triggered());

		shutdown.trigger();

		tokio::time::timeout(Duration::from_secs(1), waiter)
			.await
			.expect("Waiter did not observe the trigger.")
			.expect("Waiter panicked.");
	}

	#[tokio::test]
	async fn wait_is_immediate_once_triggered() {
		let shutdown = Shutdown::new();

		shutdown.trigger();
		shutdown.trigger();

		tokio::time::timeout(Duration::from_millis(100), shutdown.wait())
			.await
			.expect("Triggered shutdown should not block.");
		assert!(shutdown.is_triggered());
	}
}
