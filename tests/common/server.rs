//! Test server lifecycle management
//!
//! Each test gets an isolated adapter instance pointed at its own stub CMS,
//! both bound to OS-assigned ports before their serve tasks start, so no
//! readiness polling is needed.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use podhaven_mcp_server::cms::CmsClient;
use podhaven_mcp_server::mcp::handler::create_mcp_state;
use podhaven_mcp_server::mcp::session::{InMemorySessionStore, SessionStore};
use podhaven_mcp_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use tokio::net::TcpListener;

use super::cms_stub::{make_cms_stub, StubState};
use super::constants::*;

/// Test server instance with its own stub CMS
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the adapter is listening on
    #[allow(dead_code)]
    pub port: u16,

    /// Base URL of the stub CMS, for direct pokes in tests
    #[allow(dead_code)]
    pub cms_base_url: String,

    stub_state: StubState,
}

impl TestServer {
    /// Spawns the stub CMS and the adapter on random ports
    pub async fn spawn() -> Self {
        let (stub_router, stub_state) = make_cms_stub();
        let stub_listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub CMS port");
        let stub_addr = stub_listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(stub_listener, stub_router)
                .await
                .expect("Stub CMS server failed");
        });
        let cms_base_url = format!("http://{}", stub_addr);

        let cms = Arc::new(
            CmsClient::new(cms_base_url.clone(), TEST_TOKEN, TEST_CREDENTIAL)
                .expect("Failed to create CMS client"),
        );
        let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let mcp_state = Arc::new(create_mcp_state());

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port: 0,
        };
        let app = make_app(config, cms, session_store, mcp_state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind adapter port");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Adapter server failed");
        });

        TestServer {
            base_url: format!("http://{}", addr),
            port: addr.port(),
            cms_base_url,
            stub_state,
        }
    }

    /// Number of episode listing requests the stub CMS has served
    pub fn episode_list_requests(&self) -> usize {
        self.stub_state.episode_list_requests.load(Ordering::SeqCst)
    }
}
