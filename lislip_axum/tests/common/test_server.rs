use std::net::SocketAddr;
use std::sync::{Arc, Once};

use lislip::dashboard::HttpFetcher;
use lislip::{AccountStore, AdvisorConfig, DashboardConfig, StoreConfig, bootstrap, connect};
use lislip_axum::{AppState, lislip_router};
use tokio::task::JoinHandle;

use super::MockServices;

pub const TEST_API_KEY: &str = "test-api-key";

fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A private in-memory store with no tables
pub async fn empty_store() -> AccountStore {
    let store = connect(&StoreConfig::sqlite_in_memory())
        .await
        .expect("Failed to open in-memory SQLite store");
    AccountStore::new(Arc::from(store))
}

/// A private in-memory store after the normal startup sequence
pub async fn seeded_store() -> AccountStore {
    let store = empty_store().await;
    bootstrap(&store).await.expect("Bootstrap failed");
    store
}

/// The lislip router served on an ephemeral port
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(store: AccountStore, mock: &MockServices) -> Self {
        init_test_tracing();

        let dashboard = DashboardConfig {
            earthquake_url: mock.url("/earthquakes?limit=1"),
            weather_url: mock.url("/forecast"),
            air_quality_url: mock.url("/air-quality"),
            latitude: 10.675,
            longitude: 122.95,
        };
        let advisor = AdvisorConfig {
            api_url: mock.url("/generate"),
            api_key: TEST_API_KEY.to_string(),
        };
        let state = AppState::new(
            Arc::new(store),
            Arc::new(HttpFetcher::new().expect("HTTP client")),
            dashboard,
            advisor,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Test server address");
        let app = lislip_router(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server stopped unexpectedly");
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
