mod cors;
mod health;
mod home;
mod sts;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use perugo_config::Config;
use perugo_rdf::RdfState;
use tower_http::trace::TraceLayer;

pub use home::HOME_MESSAGE;
pub use sts::{StsError, StsResponse, StsState};

/// Default port of the backend
pub const DEFAULT_PORT: u16 = 5000;

pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Assemble the service from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a provider or the destination store fails to initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let rdf_state = perugo_rdf::build_state(config)?;
        Self::with_rdf_state(config, rdf_state)
    }

    /// Assemble the service with an explicit graph state instead of the configured database
    ///
    /// # Errors
    ///
    /// Returns an error if a provider fails to initialize
    pub fn with_rdf_state(config: &Config, rdf_state: Option<Arc<RdfState>>) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));

        let stt_state = stt::build_server(config)?;
        let llm_state = perugo_llm::build_server(config)?;
        let tts_state = tts::build_server(config)?;

        if stt_state.is_configured() != llm_state.is_configured() {
            tracing::warn!("/sts needs both an STT and an LLM provider, it will answer 404 until both are configured");
        }

        let sts_state = Arc::new(StsState {
            stt: Arc::clone(&stt_state),
            llm: Arc::clone(&llm_state),
            tts: Arc::clone(&tts_state),
        });

        let mut app = Router::new().route("/", axum::routing::get(home::home_handler));

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.merge(stt::endpoint_router().with_state(stt_state));

        app = app.merge(perugo_llm::endpoint_router().with_state(llm_state));

        app = app.merge(tts::endpoint_router().with_state(tts_state));

        app = app.merge(sts::endpoint_router().with_state(sts_state));

        if let Some(rdf_state) = rdf_state {
            app = app.merge(perugo_rdf::endpoint_router().with_state(rdf_state));
        }

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the router, for embedding or tests
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` is cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or the server fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
