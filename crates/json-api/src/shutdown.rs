//! Graceful shutdown

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to listen for interrupt: {0}")]
    Interrupt(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to listen for SIGTERM: {0}")]
    Terminate(#[source] io::Error),
}

/// Which signal asked the server to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Interrupt,
    Terminate,
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

async fn wait_for_stop() -> Result<Stop, ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => result
            .map(|()| Stop::Interrupt)
            .map_err(ShutdownSignalError::Interrupt),
        result = terminate() => result.map(|()| Stop::Terminate),
    }
}

/// Stop the server gracefully once Ctrl+C or SIGTERM arrives.
///
/// In-flight requests, including checkouts, are allowed to finish.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let stop = wait_for_stop().await?;

    info!(signal = ?stop, "shutting down");

    handle.stop_graceful(None);

    Ok(())
}
