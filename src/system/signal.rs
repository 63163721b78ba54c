//! Shutdown signal handling
//!
//! Lookups race against Ctrl+C; whichever finishes first wins and the
//! loser is dropped, which aborts any in-flight provider tasks.

use std::future::Future;

use tokio::signal;
use tracing::{info, warn};

/// Outcome of racing a future against Ctrl+C
#[derive(Debug)]
pub enum Interruptible<T> {
    Completed(T),
    Interrupted,
}

/// Wait for Ctrl+C
///
/// If the handler cannot be installed this never resolves, so callers
/// simply run to completion.
pub async fn ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Interrupt signal received, cancelling lookup"),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Run `fut` until it completes or `shutdown` resolves
pub async fn run_until<F, S>(fut: F, shutdown: S) -> Interruptible<F::Output>
where
    F: Future,
    S: Future<Output = ()>,
{
    tokio::select! {
        output = fut => Interruptible::Completed(output),
        _ = shutdown => Interruptible::Interrupted,
    }
}
