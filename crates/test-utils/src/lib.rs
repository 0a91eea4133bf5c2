//! Shared helpers for tiddlytime's integration tests.

pub mod builders;
pub mod recording_backend;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

pub use builders::SettingsBuilder;
pub use recording_backend::RecordingBackend;

/// Upper bound for any single awaited step in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

static TRACING: Once = Once::new();

/// Route `tracing` output through the harness's captured writer.
///
/// `RUST_LOG` applies when set. Otherwise tiddlytime logs at `debug` and
/// everything else (notify, tokio) at `warn`. Output is shown only for
/// failing tests unless run with `--nocapture`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,tiddlytime=debug"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `f`, panicking after [`TEST_TIMEOUT`].
pub async fn with_timeout<F: Future>(f: F) -> F::Output {
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(out) => out,
        Err(_) => panic!("test step did not finish within {TEST_TIMEOUT:?}"),
    }
}

/// Re-check `done` every 20ms until it holds, for at most [`TEST_TIMEOUT`].
pub async fn wait_until<F: FnMut() -> bool>(mut done: F) {
    with_timeout(async {
        while !done() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
}
