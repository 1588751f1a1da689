//! Shared setup for the end-to-end suites.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness; `RUST_LOG` filters it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_test_writer()
            .try_init();
    });
}

/// Start the mock service on a random port and return its base URL.
///
/// The server runs on its own thread with a current-thread runtime and lives
/// until the test process exits.
pub fn spawn_mock(store: petfriends_mock::Store) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            petfriends_mock::run_with_store(listener, store).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Path of a sample photo under `tests/images/`.
pub fn image(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("images")
        .join(name)
}
