//! Graceful shutdown

use std::time::Duration;

use axum_server::Handle;
use tokio::signal;

/// How long in-flight requests get to finish after a terminate signal
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Handler for graceful shutdown
///
/// Will listen to Ctrl+C and SIGTERM to initiate a shutdown
pub async fn handler() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Valid CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Valid terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Terminate signal received, starting graceful shutdown");
}

/// Wait for a terminate signal, then stop all listeners at once
pub async fn shutdown(handles: Vec<Handle>) {
    shutdown_on(handler(), handles).await;
}

/// Stop all listeners at once when `trigger` completes
///
/// Listeners stop accepting connections right away, open connections are closed after the
/// grace period
pub async fn shutdown_on<T>(trigger: T, handles: Vec<Handle>)
where
    T: Future<Output = ()>,
{
    trigger.await;

    for handle in &handles {
        handle.graceful_shutdown(Some(GRACE_PERIOD));
    }
}
