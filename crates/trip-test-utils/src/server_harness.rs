//! Test server harness for E2E testing
//!
//! Provides `TestTripServer` for spawning real trip backend instances in
//! tests. Storage is in-process, so each spawned server starts empty and is
//! fully isolated from other tests.

use common::jwt::TokenPair;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use trip_service::config::Config;
use trip_service::routes::{self, AppState};

/// Shared secret used by every test server.
pub const TEST_JWT_SECRET: &str = "trip-test-secret-0123456789abcdef-0123";

/// Test harness for spawning the trip backend in E2E tests.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_health_flow_e2e() -> Result<(), anyhow::Error> {
///     let server = TestTripServer::spawn().await?;
///     let client = reqwest::Client::new();
///
///     let response = client
///         .get(format!("{}/v1/health", server.url()))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestTripServer {
    addr: SocketAddr,
    state: Arc<AppState>,
    _handle: JoinHandle<()>,
}

impl TestTripServer {
    /// Spawn a new test server instance with empty stores.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let vars = HashMap::from([
            ("JWT_SECRET_KEY".to_string(), TEST_JWT_SECRET.to_string()),
            ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        ]);
        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        let state = Arc::new(AppState::new(config));
        let app = routes::build_routes(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;
        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, make_service).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the shared application state (stores, token provider, config).
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Register an account and log in, returning the issued pair.
    ///
    /// Panics on failure; this is a test fixture, not an API client.
    pub async fn signup_and_login(
        &self,
        client: &reqwest::Client,
        email: &str,
        name: &str,
        password: &str,
    ) -> TokenPair {
        let signup = client
            .post(format!("{}/auth/signup", self.url()))
            .json(&serde_json::json!({
                "email": email,
                "name": name,
                "password": password,
            }))
            .send()
            .await
            .expect("signup request failed");
        assert_eq!(signup.status(), 201, "signup rejected for {email}");

        let login = client
            .post(format!("{}/auth/login", self.url()))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("login request failed");
        assert_eq!(login.status(), 200, "login rejected for {email}");

        login.json().await.expect("login response was not a token pair")
    }
}

impl Drop for TestTripServer {
    fn drop(&mut self) {
        // Abort the HTTP server task so the port is released as soon as the
        // test completes.
        self._handle.abort();
    }
}
